use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Front matter attached to a page, keyed by field name (`title`, `layout`, ...).
pub type Metadata = Map<String, Value>;

/// Pages in the order the backend returned them.
pub type PageCollection = Vec<Page>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Identifier of a persisted page. `None` for a page that was never saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Location of the page relative to the site root, e.g. `_pages/about.md`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, rename = "front_matter")]
    pub metadata: Metadata,
    #[serde(default, rename = "raw_content")]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_url: Option<String>,
}

impl Page {
    pub fn new_draft(path: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The persisted identifier, ignoring blank values.
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// The filesystem location, ignoring blank values.
    pub fn path(&self) -> Option<&str> {
        non_blank(self.path.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(Value::as_str)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
