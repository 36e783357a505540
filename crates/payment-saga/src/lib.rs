//! Sequential compensable step engine.
//!
//! A [`StepRegistry`] holds an ordered list of steps, each pairing forward
//! work with a compensation. [`run`] feeds a record through the steps in
//! order; if any step fails, the steps that already succeeded are
//! compensated in reverse order of success (LIFO) and the original failure
//! is returned.

mod audit;
mod engine;
mod error;
mod registry;
mod step;

pub use audit::{SagaAuditLog, StepRecord, StepStatus};
pub use engine::{SagaRun, execute, run};
pub use error::{CompensationError, SagaError};
pub use registry::{BoxedStep, StepRegistry};
pub use step::{FnStep, SagaStep};
