use payment_saga::SagaError;
use thiserror::Error;

use crate::types::PaymentStep;

/// Why a payment did not complete. Each reason belongs to exactly one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FailureReason {
    #[error("invalid payment details")]
    InvalidPaymentDetails,

    #[error("payment failed")]
    PaymentFailed,

    #[error("confirmation failed")]
    ConfirmationFailed,
}

impl FailureReason {
    /// Stable tag, e.g. `payment_failed`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidPaymentDetails => "invalid_payment_details",
            Self::PaymentFailed => "payment_failed",
            Self::ConfirmationFailed => "confirmation_failed",
        }
    }

    /// The step that reports this reason.
    #[must_use]
    pub fn step(self) -> PaymentStep {
        match self {
            Self::InvalidPaymentDetails => PaymentStep::Validate,
            Self::PaymentFailed => PaymentStep::Process,
            Self::ConfirmationFailed => PaymentStep::Confirm,
        }
    }
}

/// Why a compensation could not undo its step, e.g. a refund the gateway
/// refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RollbackError {
    message: String,
}

impl RollbackError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Details about a failed compensation during rollback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompensationFailure {
    /// Step whose compensation failed.
    pub step: PaymentStep,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The error the compensation reported.
    pub error: RollbackError,
}

/// Malformed transaction input. Never reported as a [`FailureReason`].
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed transaction input")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse payment options")]
    Parse(#[from] toml::de::Error),
}

impl From<SagaError<PaymentStep, FailureReason, RollbackError>> for FailureReason {
    fn from(err: SagaError<PaymentStep, FailureReason, RollbackError>) -> Self {
        err.into_reason()
    }
}
