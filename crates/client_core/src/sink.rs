//! Destinations for notifications.
//!
//! A sink only has to accept notifications in the order it receives them. Channel
//! adapters never block the orchestrator: a closed or full channel drops the
//! notification and logs a warning.

use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc};
use tracing::warn;

use crate::notification::{Notification, NotificationKind};

pub trait NotificationSink: Send + Sync {
    fn dispatch(&self, notification: Notification);
}

impl<S: NotificationSink + ?Sized> NotificationSink for Arc<S> {
    fn dispatch(&self, notification: Notification) {
        (**self).dispatch(notification);
    }
}

/// Adapts a plain callback into a sink.
pub struct FnSink<F>(F);

impl<F> FnSink<F>
where
    F: Fn(Notification) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F> NotificationSink for FnSink<F>
where
    F: Fn(Notification) + Send + Sync,
{
    fn dispatch(&self, notification: Notification) {
        (self.0)(notification);
    }
}

impl NotificationSink for mpsc::UnboundedSender<Notification> {
    fn dispatch(&self, notification: Notification) {
        if let Err(err) = self.send(notification) {
            warn!(
                kind = %err.0.kind(),
                "notification dropped: receiver closed"
            );
        }
    }
}

impl NotificationSink for broadcast::Sender<Notification> {
    fn dispatch(&self, notification: Notification) {
        let kind = notification.kind();
        if self.send(notification).is_err() {
            warn!(%kind, "notification dropped: no subscribers");
        }
    }
}

impl NotificationSink for crossbeam_channel::Sender<Notification> {
    fn dispatch(&self, notification: Notification) {
        match self.try_send(notification) {
            Ok(()) => {}
            Err(crossbeam_channel::TrySendError::Full(notification)) => {
                warn!(kind = %notification.kind(), "notification dropped: queue is full");
            }
            Err(crossbeam_channel::TrySendError::Disconnected(notification)) => {
                warn!(
                    kind = %notification.kind(),
                    "notification dropped: queue disconnected"
                );
            }
        }
    }
}

/// Keeps every notification in memory, in dispatch order.
#[derive(Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    pub fn kinds(&self) -> Vec<NotificationKind> {
        self.lock().iter().map(Notification::kind).collect()
    }

    /// Returns the recorded notifications and starts over with an empty log.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl NotificationSink for RecordingSink {
    fn dispatch(&self, notification: Notification) {
        self.lock().push(notification);
    }
}
