use std::fmt;

use crate::error::FailureReason;
use crate::types::{PaymentStep, TransactionId};

/// A message emitted on the notification side-channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// The confirmation for a processed payment went out.
    Confirmation { transaction_id: TransactionId },
    /// A previously succeeded step was compensated.
    Rollback {
        step: PaymentStep,
        reason: FailureReason,
        description: String,
    },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmation { transaction_id } => {
                write!(f, "Confirmation email sent for Transaction ID: {transaction_id}")
            }
            Self::Rollback {
                reason,
                description,
                ..
            } => write!(f, "Rollback: {description} due to {}.", reason.as_str()),
        }
    }
}

/// Sink for confirmation and rollback notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}
