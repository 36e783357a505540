//! Pipelines assembled from custom step functions.

use std::sync::Arc;

use payment_operations::operations::{
    ConfirmPaymentStep, PaymentRegistry, PaymentSagaContext, ValidatePaymentStep,
};
use payment_operations::providers::{RecordingNotifier, SequentialTransactionIds};
use payment_operations::traits::TransactionIdGenerator;
use payment_operations::{
    AccountId, CompensationFailure, FailureReason, PaymentOperation, PaymentOptions, PaymentStep,
    RollbackError, TransactionContext, TransactionId,
};

type N = RecordingNotifier;
type G = SequentialTransactionIds;

fn valid_input() -> TransactionContext {
    TransactionContext::new(100, Some(AccountId::from("acc_456")))
}

/// Processing whose refund cannot be carried out.
fn registry_with_failing_refund() -> PaymentRegistry<N, G> {
    PaymentRegistry::<N, G>::new()
        .with_step(ValidatePaymentStep::new())
        .with_fn(
            PaymentStep::Process,
            |ctx: &PaymentSagaContext<N, G>, mut data: TransactionContext| {
                data.transaction_id = Some(ctx.id_generator().next_id());
                Ok(data)
            },
            |_ctx, _data, _reason| Err(RollbackError::new("refund gateway unavailable")),
        )
        .with_step(ConfirmPaymentStep::new())
}

#[test]
fn failing_compensation_is_reported_and_rollback_continues() {
    let notifier = Arc::new(RecordingNotifier::new());
    let operation = PaymentOperation::with_registry(
        Arc::clone(&notifier),
        Arc::new(SequentialTransactionIds::starting_at(123)),
        registry_with_failing_refund(),
    );

    let report = operation.call_with_report(
        valid_input(),
        PaymentOptions::default().with_confirmation_failure(),
    );

    assert_eq!(report.result, Err(FailureReason::ConfirmationFailed));
    assert_eq!(
        report.compensations,
        vec![PaymentStep::Process, PaymentStep::Validate]
    );
    assert_eq!(
        report.compensation_failures,
        vec![CompensationFailure {
            step: PaymentStep::Process,
            description: "undo process_payment".to_string(),
            error: RollbackError::new("refund gateway unavailable"),
        }]
    );
    assert_eq!(
        notifier.rollbacks(),
        vec![(PaymentStep::Validate, FailureReason::ConfirmationFailed)]
    );
    assert!(report.audit_summary.contains("⚠ process_payment"));
}

#[test]
fn custom_step_order_is_reported() -> anyhow::Result<()> {
    let notifier = Arc::new(RecordingNotifier::new());
    let operation = PaymentOperation::with_registry(
        Arc::clone(&notifier),
        Arc::new(SequentialTransactionIds::starting_at(123)),
        registry_with_failing_refund(),
    );

    let context = operation.call(valid_input(), PaymentOptions::default())?;

    assert_eq!(
        operation.steps(),
        vec![
            PaymentStep::Validate,
            PaymentStep::Process,
            PaymentStep::Confirm
        ]
    );
    assert_eq!(context.transaction_id, Some(TransactionId::from_number(123)));
    assert_eq!(
        notifier.messages(),
        vec!["Confirmation email sent for Transaction ID: txn_123"]
    );
    Ok(())
}
