use std::sync::Arc;

use payment_saga::{StepRegistry, run};
use tracing::{info, warn};

use super::context::PaymentSagaContext;
use super::saga_steps::{ConfirmPaymentStep, ProcessPaymentStep, ValidatePaymentStep};
use crate::config::PaymentOptions;
use crate::error::{CompensationFailure, FailureReason, RollbackError};
use crate::providers::{RandomTransactionIds, StdoutNotifier};
use crate::traits::{Notifier, TransactionIdGenerator};
use crate::types::{PaymentStep, TransactionContext, TransactionId};

pub type PaymentRegistry<N, G> = StepRegistry<
    PaymentStep,
    TransactionContext,
    PaymentSagaContext<N, G>,
    FailureReason,
    RollbackError,
>;

/// The standard pipeline: validate, process, confirm.
#[must_use]
pub fn payment_registry<N, G>() -> PaymentRegistry<N, G>
where
    N: Notifier + 'static,
    G: TransactionIdGenerator + 'static,
{
    StepRegistry::new()
        .with_step(ValidatePaymentStep::new())
        .with_step(ProcessPaymentStep::new())
        .with_step(ConfirmPaymentStep::new())
}

/// Outcome of one payment call together with its execution history.
#[derive(Debug)]
pub struct PaymentReport {
    pub result: Result<TransactionContext, FailureReason>,
    /// Steps that succeeded, in order.
    pub executed_steps: Vec<PaymentStep>,
    /// Compensations invoked, in order.
    pub compensations: Vec<PaymentStep>,
    pub compensation_failures: Vec<CompensationFailure>,
    /// One line per step with its final status.
    pub audit_summary: String,
}

/// Entry point for running payments.
///
/// Holds only immutable collaborators; every call builds its own context and
/// history, so one operation can serve concurrent calls.
pub struct PaymentOperation<N, G> {
    notifier: Arc<N>,
    id_generator: Arc<G>,
    registry: PaymentRegistry<N, G>,
}

impl PaymentOperation<StdoutNotifier, RandomTransactionIds> {
    /// Standard pipeline printing notifications to standard output.
    #[must_use]
    pub fn with_stdout() -> Self {
        Self::new(Arc::new(StdoutNotifier), Arc::new(RandomTransactionIds))
    }
}

impl<N, G> PaymentOperation<N, G>
where
    N: Notifier + 'static,
    G: TransactionIdGenerator + 'static,
{
    pub fn new(notifier: Arc<N>, id_generator: Arc<G>) -> Self {
        Self::with_registry(notifier, id_generator, payment_registry())
    }

    /// Use a custom pipeline instead of the standard one.
    pub fn with_registry(
        notifier: Arc<N>,
        id_generator: Arc<G>,
        registry: PaymentRegistry<N, G>,
    ) -> Self {
        Self {
            notifier,
            id_generator,
            registry,
        }
    }

    /// Step order of the pipeline.
    #[must_use]
    pub fn steps(&self) -> Vec<PaymentStep> {
        self.registry.ids()
    }

    /// Run the pipeline once.
    ///
    /// # Errors
    ///
    /// Returns the reason reported by the step that failed, after the steps
    /// that had succeeded were compensated.
    pub fn call(
        &self,
        input: TransactionContext,
        options: PaymentOptions,
    ) -> Result<TransactionContext, FailureReason> {
        self.call_with_report(input, options).result
    }

    /// Run the pipeline once and keep the execution history.
    pub fn call_with_report(
        &self,
        input: TransactionContext,
        options: PaymentOptions,
    ) -> PaymentReport {
        let ctx = PaymentSagaContext::new(
            Arc::clone(&self.notifier),
            Arc::clone(&self.id_generator),
            options,
        );

        let saga_run = run(&self.registry, &ctx, input);
        let audit_summary = saga_run.audit_log.summary();

        let (result, compensation_failures) = match saga_run.result {
            Ok(context) => {
                info!(
                    transaction_id = context.transaction_id.as_ref().map(TransactionId::as_str),
                    "payment completed"
                );
                (Ok(context), Vec::new())
            }
            Err(err) => {
                let compensation_failures: Vec<CompensationFailure> = err
                    .compensation_errors()
                    .iter()
                    .map(|e| CompensationFailure {
                        step: e.step,
                        description: e.description.clone(),
                        error: e.error.clone(),
                    })
                    .collect();
                for failure in &compensation_failures {
                    warn!(
                        step = %failure.step,
                        error = %failure.error,
                        "compensation did not complete"
                    );
                }

                let reason = FailureReason::from(err);
                info!(
                    reason = reason.as_str(),
                    compensations = saga_run.compensations.len(),
                    "payment failed"
                );
                (Err(reason), compensation_failures)
            }
        };

        PaymentReport {
            result,
            executed_steps: saga_run.executed_steps,
            compensations: saga_run.compensations,
            compensation_failures,
            audit_summary,
        }
    }
}
