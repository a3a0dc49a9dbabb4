use std::sync::Arc;

use url::Url;

use crate::{
    error::{ConfigError, TransportError},
    transport::{HttpTransport, ReqwestTransport},
};

const PAGES_SEGMENT: &str = "pages";

/// Where the backend lives and how to reach it.
#[derive(Clone)]
pub struct ClientConfig {
    base_url: Url,
    transport: Arc<dyn HttpTransport>,
}

impl ClientConfig {
    pub fn new(base_url: &str, transport: Arc<dyn HttpTransport>) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url.trim()).map_err(|source| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::NotHierarchical(base_url.to_string()));
        }
        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn with_reqwest(base_url: &str) -> Result<Self, ConfigError> {
        Self::new(base_url, Arc::new(ReqwestTransport::new()))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// `{base}/pages`
    pub fn pages_url(&self) -> Result<Url, TransportError> {
        self.endpoint(&[])
    }

    /// `{base}/pages/{id}`, keeping `/` inside `id` as path separators.
    ///
    /// Empty, `.` and `..` segments would be collapsed by URL normalization
    /// and address a different page, so they are refused.
    pub fn page_url(&self, id: &str) -> Result<Url, TransportError> {
        let segments: Vec<&str> = id.split('/').collect();
        if segments
            .iter()
            .any(|segment| matches!(*segment, "" | "." | ".."))
        {
            return Err(TransportError::InvalidUrl(format!(
                "page id '{id}' has an empty or relative path segment"
            )));
        }
        self.endpoint(&segments)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| TransportError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().push(PAGES_SEGMENT).extend(segments);
        }
        Ok(url)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
