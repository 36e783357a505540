use std::fmt::{Debug, Display};

use tracing::{debug, warn};

use crate::audit::SagaAuditLog;
use crate::error::{CompensationError, SagaError};
use crate::registry::{BoxedStep, StepRegistry};

/// Everything observable about one run of a registry.
#[derive(Debug)]
pub struct SagaRun<Id: Debug + Display, Data, Err: Debug, CErr: Debug = Err> {
    /// Final record on success, or the failure with rollback details.
    pub result: Result<Data, SagaError<Id, Err, CErr>>,
    /// Steps that succeeded, in the order they succeeded. Always a prefix of
    /// the registry order and never touched by rollback.
    pub executed_steps: Vec<Id>,
    /// Compensations invoked, in invocation order. Empty unless a step
    /// failed.
    pub compensations: Vec<Id>,
    /// Per-step status record.
    pub audit_log: SagaAuditLog<Id>,
}

type CompensationStack<'a, Id, Data, Ctx, Err, CErr> =
    Vec<(usize, &'a BoxedStep<Id, Data, Ctx, Err, CErr>, Data)>;

/// Run every step of `registry` in order, threading `data` through them.
///
/// When a step fails, no later step runs. The steps that already succeeded
/// are compensated in reverse order of success, each with the record it
/// produced and the failing step's error. A failed compensation does not
/// stop the remaining ones.
pub fn run<Id, Data, Ctx, Err, CErr>(
    registry: &StepRegistry<Id, Data, Ctx, Err, CErr>,
    ctx: &Ctx,
    data: Data,
) -> SagaRun<Id, Data, Err, CErr>
where
    Id: Copy + Eq + Debug + Display + Send + Sync + 'static,
    Data: Clone + Send + 'static,
    Err: Debug,
    CErr: Debug,
{
    let mut audit_log = SagaAuditLog::new();
    let mut executed_steps = Vec::with_capacity(registry.len());
    let mut compensation_stack: CompensationStack<'_, Id, Data, Ctx, Err, CErr> = Vec::new();

    let mut current = data;

    for (index, step) in registry.iter().enumerate() {
        let id = step.id();
        audit_log.record_start(id);
        debug!(step = %id, index, "executing step");

        match step.execute(ctx, current) {
            Ok(output) => {
                audit_log.record_success(step.compensation_description());
                executed_steps.push(id);
                compensation_stack.push((index, step, output.clone()));
                current = output;
            }
            Err(error) => {
                audit_log.record_failure();
                debug!(
                    step = %id,
                    ?error,
                    to_compensate = compensation_stack.len(),
                    "step failed, rolling back"
                );
                let (compensations, saga_error) =
                    compensate(ctx, &mut audit_log, compensation_stack, id, error);
                return SagaRun {
                    result: Err(saga_error),
                    executed_steps,
                    compensations,
                    audit_log,
                };
            }
        }
    }

    SagaRun {
        result: Ok(current),
        executed_steps,
        compensations: Vec::new(),
        audit_log,
    }
}

/// Run `registry` and return only the outcome.
///
/// # Errors
///
/// Returns `SagaError::StepFailed` if a step fails and all compensations succeed.
/// Returns `SagaError::CompensationFailed` if a step fails and some compensations also fail.
pub fn execute<Id, Data, Ctx, Err, CErr>(
    registry: &StepRegistry<Id, Data, Ctx, Err, CErr>,
    ctx: &Ctx,
    data: Data,
) -> Result<Data, SagaError<Id, Err, CErr>>
where
    Id: Copy + Eq + Debug + Display + Send + Sync + 'static,
    Data: Clone + Send + 'static,
    Err: Debug,
    CErr: Debug,
{
    run(registry, ctx, data).result
}

fn compensate<Id, Data, Ctx, Err, CErr>(
    ctx: &Ctx,
    audit_log: &mut SagaAuditLog<Id>,
    mut compensation_stack: CompensationStack<'_, Id, Data, Ctx, Err, CErr>,
    failed_step: Id,
    step_error: Err,
) -> (Vec<Id>, SagaError<Id, Err, CErr>)
where
    Id: Copy + Eq + Debug + Display + Send + Sync + 'static,
    Data: Clone + Send + 'static,
    Err: Debug,
    CErr: Debug,
{
    let mut compensations = Vec::with_capacity(compensation_stack.len());
    let mut compensation_errors = Vec::new();

    while let Some((index, step, snapshot)) = compensation_stack.pop() {
        let id = step.id();
        compensations.push(id);

        match step.compensate(ctx, &snapshot, &step_error) {
            Ok(()) => {
                audit_log.record_compensated(index);
                debug!(step = %id, "compensated step");
            }
            Err(error) => {
                warn!(
                    step = %id,
                    %failed_step,
                    ?error,
                    "compensation failed, continuing rollback"
                );
                audit_log.record_compensation_failed(index);
                compensation_errors.push(CompensationError {
                    step: id,
                    description: step.compensation_description(),
                    error,
                });
            }
        }
    }

    let saga_error = if compensation_errors.is_empty() {
        SagaError::StepFailed {
            step: failed_step,
            source: step_error,
        }
    } else {
        SagaError::CompensationFailed {
            failed_step,
            step_error,
            compensation_errors,
        }
    };

    (compensations, saga_error)
}
