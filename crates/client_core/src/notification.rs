//! Notifications emitted by [`PagesClient`](crate::PagesClient) operations.

use serde::{Deserialize, Serialize};
use shared::domain::{Page, PageCollection};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Notification {
    FetchPagesRequest,
    FetchPagesSuccess { pages: PageCollection },
    FetchPagesFailure { error: String },
    FetchPageRequest,
    FetchPageSuccess { page: Page },
    FetchPageFailure { error: String },
    DeletePageSuccess { id: String },
    DeletePageFailure { error: String },
    ValidationError { errors: Vec<String> },
    ClearErrors,
    PutPageSuccess { page: Page },
    PutPageFailure { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    FetchPagesRequest,
    FetchPagesSuccess,
    FetchPagesFailure,
    FetchPageRequest,
    FetchPageSuccess,
    FetchPageFailure,
    DeletePageSuccess,
    DeletePageFailure,
    ValidationError,
    ClearErrors,
    PutPageSuccess,
    PutPageFailure,
}

impl NotificationKind {
    /// Wire name, identical to the `type` tag of the serialized notification.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FetchPagesRequest => "FETCH_PAGES_REQUEST",
            Self::FetchPagesSuccess => "FETCH_PAGES_SUCCESS",
            Self::FetchPagesFailure => "FETCH_PAGES_FAILURE",
            Self::FetchPageRequest => "FETCH_PAGE_REQUEST",
            Self::FetchPageSuccess => "FETCH_PAGE_SUCCESS",
            Self::FetchPageFailure => "FETCH_PAGE_FAILURE",
            Self::DeletePageSuccess => "DELETE_PAGE_SUCCESS",
            Self::DeletePageFailure => "DELETE_PAGE_FAILURE",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::ClearErrors => "CLEAR_ERRORS",
            Self::PutPageSuccess => "PUT_PAGE_SUCCESS",
            Self::PutPageFailure => "PUT_PAGE_FAILURE",
        }
    }

    /// True for kinds that end an operation.
    pub const fn is_terminal(self) -> bool {
        !matches!(
            self,
            Self::FetchPagesRequest | Self::FetchPageRequest | Self::ClearErrors
        )
    }

    pub const fn is_failure(self) -> bool {
        matches!(
            self,
            Self::FetchPagesFailure
                | Self::FetchPageFailure
                | Self::DeletePageFailure
                | Self::ValidationError
                | Self::PutPageFailure
        )
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::FetchPagesRequest => NotificationKind::FetchPagesRequest,
            Self::FetchPagesSuccess { .. } => NotificationKind::FetchPagesSuccess,
            Self::FetchPagesFailure { .. } => NotificationKind::FetchPagesFailure,
            Self::FetchPageRequest => NotificationKind::FetchPageRequest,
            Self::FetchPageSuccess { .. } => NotificationKind::FetchPageSuccess,
            Self::FetchPageFailure { .. } => NotificationKind::FetchPageFailure,
            Self::DeletePageSuccess { .. } => NotificationKind::DeletePageSuccess,
            Self::DeletePageFailure { .. } => NotificationKind::DeletePageFailure,
            Self::ValidationError { .. } => NotificationKind::ValidationError,
            Self::ClearErrors => NotificationKind::ClearErrors,
            Self::PutPageSuccess { .. } => NotificationKind::PutPageSuccess,
            Self::PutPageFailure { .. } => NotificationKind::PutPageFailure,
        }
    }

    /// The normalized transport message of a failure notification.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::FetchPagesFailure { error }
            | Self::FetchPageFailure { error }
            | Self::DeletePageFailure { error }
            | Self::PutPageFailure { error } => Some(error),
            _ => None,
        }
    }
}
