use serde::{Deserialize, Serialize};

use crate::domain::{Metadata, Page};

/// Body of `PUT /pages/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PutPagePayload {
    pub front_matter: Metadata,
    pub raw_content: String,
    /// New location of the page; lets an update move the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&Page> for PutPagePayload {
    fn from(page: &Page) -> Self {
        Self {
            front_matter: page.metadata.clone(),
            raw_content: page.content.clone(),
            path: page.path().map(str::to_owned),
        }
    }
}
