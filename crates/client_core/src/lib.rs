use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    domain::{Page, PageCollection},
    protocol::PutPagePayload,
};
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

pub mod config;
pub mod error;
pub mod notification;
pub mod sink;
pub mod transport;
pub mod validation;

pub use config::ClientConfig;
pub use error::{ConfigError, TransportError};
pub use notification::{Notification, NotificationKind};
pub use sink::{FnSink, NotificationSink, RecordingSink};
pub use transport::{HttpTransport, ReqwestTransport};
pub use validation::{FieldRule, FILENAME_REQUIRED};

pub const PAGE_ID_REQUIRED: &str = "The page id is required.";

/// Steps of a create-or-update call, in the order they can occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PutPhase {
    Validating,
    ValidationFailed,
    Cleared,
    Requesting,
    Succeeded,
    Failed,
}

/// Issues page requests against the backend and reports every outcome to a sink.
///
/// Operations never return errors: a failed request is delivered as a
/// `*_FAILURE` notification and the returned future still completes.
pub struct PagesClient {
    config: ClientConfig,
    sink: Arc<dyn NotificationSink>,
    rules: Vec<FieldRule>,
}

impl PagesClient {
    pub fn new(config: ClientConfig, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            config,
            sink,
            rules: validation::PAGE_RULES.to_vec(),
        }
    }

    /// Replaces the required-field rules checked by [`put_page`](Self::put_page).
    pub fn with_validation_rules(mut self, rules: Vec<FieldRule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn emit(&self, notification: Notification) {
        debug!(kind = %notification.kind(), "dispatching notification");
        self.sink.dispatch(notification);
    }

    pub async fn fetch_pages(&self) {
        let request_id = Uuid::new_v4();
        self.emit(Notification::FetchPagesRequest);

        match self.get_json::<PageCollection>(self.config.pages_url()).await {
            Ok(pages) => {
                info!(%request_id, count = pages.len(), "pages: list fetched");
                self.emit(Notification::FetchPagesSuccess { pages });
            }
            Err(err) => {
                warn!(%request_id, "pages: list fetch failed: {err}");
                self.emit(Notification::FetchPagesFailure {
                    error: err.message(),
                });
            }
        }
    }

    pub async fn fetch_page(&self, id: &str) {
        let request_id = Uuid::new_v4();
        self.emit(Notification::FetchPageRequest);

        let Some(id) = non_blank(Some(id)) else {
            warn!(%request_id, "pages: fetch rejected, empty id");
            self.emit(Notification::FetchPageFailure {
                error: PAGE_ID_REQUIRED.to_string(),
            });
            return;
        };

        match self.get_json::<Page>(self.config.page_url(id)).await {
            Ok(page) => {
                info!(%request_id, page = id, "pages: page fetched");
                self.emit(Notification::FetchPageSuccess { page });
            }
            Err(err) => {
                warn!(%request_id, page = id, "pages: page fetch failed: {err}");
                self.emit(Notification::FetchPageFailure {
                    error: err.message(),
                });
            }
        }
    }

    /// Deletes a page. No request notification precedes the outcome.
    pub async fn delete_page(&self, id: &str) {
        let request_id = Uuid::new_v4();
        let Some(id) = non_blank(Some(id)) else {
            warn!(%request_id, "pages: delete rejected, empty id");
            self.emit(Notification::DeletePageFailure {
                error: PAGE_ID_REQUIRED.to_string(),
            });
            return;
        };

        let outcome = match self.config.page_url(id) {
            Ok(url) => self.config.transport().delete(url).await,
            Err(err) => Err(err),
        };

        match outcome {
            Ok(_) => {
                info!(%request_id, page = id, "pages: page deleted");
                self.emit(Notification::DeletePageSuccess { id: id.to_string() });
            }
            Err(err) => {
                warn!(%request_id, page = id, "pages: delete failed: {err}");
                self.emit(Notification::DeletePageFailure {
                    error: err.message(),
                });
            }
        }
    }

    /// Creates or updates a page from the editor's current `snapshot`.
    ///
    /// A non-blank `id` selects the update target even when the snapshot's
    /// own name differs; otherwise the page is created at the snapshot's path,
    /// falling back to its name.
    pub async fn put_page(&self, snapshot: &Page, id: Option<&str>) {
        let request_id = Uuid::new_v4();
        trace_put(request_id, PutPhase::Validating);

        let errors = validation::validate_with(snapshot, &self.rules);
        if !errors.is_empty() {
            trace_put(request_id, PutPhase::ValidationFailed);
            self.emit(Notification::ValidationError { errors });
            return;
        }

        self.emit(Notification::ClearErrors);
        trace_put(request_id, PutPhase::Cleared);

        // Custom rule sets may drop the filename requirement.
        let Some(target) = non_blank(id)
            .or_else(|| snapshot.path())
            .or_else(|| snapshot.name())
        else {
            trace_put(request_id, PutPhase::Failed);
            self.emit(Notification::PutPageFailure {
                error: PAGE_ID_REQUIRED.to_string(),
            });
            return;
        };
        let payload = PutPagePayload::from(snapshot);

        trace_put(request_id, PutPhase::Requesting);
        let outcome = match (self.config.page_url(target), serde_json::to_value(&payload)) {
            (Ok(url), Ok(body)) => self.config.transport().put(url, body).await,
            (Err(err), _) => Err(err),
            (_, Err(err)) => Err(TransportError::Decode(err.to_string())),
        }
        .and_then(decode::<Page>);

        match outcome {
            Ok(page) => {
                trace_put(request_id, PutPhase::Succeeded);
                info!(%request_id, page = target, "pages: page saved");
                self.emit(Notification::PutPageSuccess { page });
            }
            Err(err) => {
                trace_put(request_id, PutPhase::Failed);
                warn!(%request_id, page = target, "pages: save failed: {err}");
                self.emit(Notification::PutPageFailure {
                    error: err.message(),
                });
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Result<Url, TransportError>,
    ) -> Result<T, TransportError> {
        let value = self.config.transport().get(url?).await?;
        decode(value)
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, TransportError> {
    serde_json::from_value(value).map_err(|err| TransportError::Decode(err.to_string()))
}

/// Ids are used verbatim; whitespace only decides whether one was given.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn trace_put(request_id: Uuid, phase: PutPhase) {
    debug!(%request_id, ?phase, "pages: put transition");
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;
