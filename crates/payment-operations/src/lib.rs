mod config;
mod error;
pub mod operations;
pub mod providers;
pub mod traits;
mod types;

#[cfg(test)]
pub mod mocks;

pub use config::PaymentOptions;
pub use error::{CompensationFailure, ConfigError, FailureReason, InputError, RollbackError};
pub use operations::{PaymentOperation, PaymentReport};
pub use types::{AccountId, PaymentStep, TransactionContext, TransactionId};
