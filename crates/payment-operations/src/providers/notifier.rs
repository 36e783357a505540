use std::sync::{Mutex, PoisonError};

use tracing::info;

use crate::error::FailureReason;
use crate::traits::{Notification, Notifier};
use crate::types::PaymentStep;

/// Prints every notification on its own line to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&self, notification: &Notification) {
        println!("{notification}");
    }
}

/// Emits notifications as `tracing` events at `INFO` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        match notification {
            Notification::Confirmation { transaction_id } => {
                info!(%transaction_id, "{notification}");
            }
            Notification::Rollback { step, reason, .. } => {
                info!(%step, reason = reason.as_str(), "{notification}");
            }
        }
    }
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Keeps every notification in memory, in emission order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Rendered messages, in emission order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(ToString::to_string).collect()
    }

    /// `(step, reason)` of each rollback notification, in emission order.
    #[must_use]
    pub fn rollbacks(&self) -> Vec<(PaymentStep, FailureReason)> {
        self.lock()
            .iter()
            .filter_map(|notification| match notification {
                Notification::Rollback { step, reason, .. } => Some((*step, *reason)),
                Notification::Confirmation { .. } => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.lock().push(notification.clone());
    }
}
