use std::fmt::{Debug, Display};

use thiserror::Error;

/// Error from a failed compensation operation.
#[derive(Debug, Error)]
#[error("compensation failed for step '{step}': {description}")]
pub struct CompensationError<Id: Debug + Display, E> {
    /// Step whose compensation failed.
    pub step: Id,
    /// Description of what the compensation was trying to do.
    pub description: String,
    /// The underlying error.
    #[source]
    pub error: E,
}

/// Error from saga execution.
///
/// Both variants carry the error of the step that failed unchanged; use
/// [`reason`](SagaError::reason) or [`into_reason`](SagaError::into_reason)
/// to get at it regardless of how rollback went.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SagaError<Id: Debug + Display, E: Debug, C: Debug = E> {
    /// A step failed and all compensations succeeded.
    #[error("step '{step}' failed")]
    StepFailed {
        /// Step that failed.
        step: Id,
        /// The error that caused the step to fail.
        #[source]
        source: E,
    },

    /// A step failed and some compensations also failed.
    #[error("step '{failed_step}' failed, and {} compensation(s) also failed", compensation_errors.len())]
    CompensationFailed {
        /// Step that originally failed.
        failed_step: Id,
        /// The error from the failed step.
        step_error: E,
        /// Errors from failed compensations, in the order they occurred.
        compensation_errors: Vec<CompensationError<Id, C>>,
    },
}

impl<Id: Copy + Debug + Display, E: Debug, C: Debug> SagaError<Id, E, C> {
    /// The step whose failure stopped forward execution.
    #[must_use]
    pub fn failed_step(&self) -> Id {
        match self {
            Self::StepFailed { step, .. } => *step,
            Self::CompensationFailed { failed_step, .. } => *failed_step,
        }
    }

    /// The error returned by the failed step.
    #[must_use]
    pub fn reason(&self) -> &E {
        match self {
            Self::StepFailed { source, .. } => source,
            Self::CompensationFailed { step_error, .. } => step_error,
        }
    }

    /// Consume the error, keeping only the failed step's error.
    #[must_use]
    pub fn into_reason(self) -> E {
        match self {
            Self::StepFailed { source, .. } => source,
            Self::CompensationFailed { step_error, .. } => step_error,
        }
    }

    /// Compensations that failed during rollback, if any.
    #[must_use]
    pub fn compensation_errors(&self) -> &[CompensationError<Id, C>] {
        match self {
            Self::StepFailed { .. } => &[],
            Self::CompensationFailed {
                compensation_errors,
                ..
            } => compensation_errors,
        }
    }
}
