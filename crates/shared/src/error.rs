use serde::{Deserialize, Serialize};

/// Error body returned by the content backend on non-2xx responses.
///
/// Backends disagree on the field name, so both `message` and `error` are accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|message| !message.trim().is_empty())
    }
}
