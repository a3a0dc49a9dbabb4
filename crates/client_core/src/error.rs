use shared::error::ApiError;
use thiserror::Error;

/// Any failure surfaced by an [`HttpTransport`](crate::transport::HttpTransport).
///
/// The `Display` output of every variant is the normalized message carried by
/// `*_FAILURE` notifications.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("invalid response payload: {0}")]
    Decode(String),
    #[error("invalid request url: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    /// Builds a status error, preferring the message from the backend's JSON error body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiError>(body)
            .ok()
            .and_then(ApiError::into_message)
            .unwrap_or_else(|| format!("request failed with status {status}"));
        Self::Status { status, message }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid api base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("api base url '{0}' cannot carry a path")]
    NotHierarchical(String),
    #[error("failed to build http client: {0}")]
    HttpClient(String),
}
