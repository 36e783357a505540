use std::marker::PhantomData;

use payment_saga::SagaStep;
use tracing::{debug, warn};

use super::context::PaymentSagaContext;
use crate::error::{FailureReason, RollbackError};
use crate::traits::{Notification, Notifier, TransactionIdGenerator};
use crate::types::{PaymentStep, TransactionContext};

fn notify_rollback<N, G>(
    ctx: &PaymentSagaContext<N, G>,
    step: PaymentStep,
    reason: FailureReason,
    description: String,
) where
    N: Notifier,
    G: TransactionIdGenerator,
{
    debug!(%step, reason = reason.as_str(), "rolling back step");
    ctx.notifier().notify(&Notification::Rollback {
        step,
        reason,
        description,
    });
}

pub struct ValidatePaymentStep<N, G> {
    _marker: PhantomData<(N, G)>,
}

impl<N, G> ValidatePaymentStep<N, G> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<N, G> Default for ValidatePaymentStep<N, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, G> SagaStep for ValidatePaymentStep<N, G>
where
    N: Notifier + Send + Sync,
    G: TransactionIdGenerator + Send + Sync,
{
    type Id = PaymentStep;
    type Data = TransactionContext;
    type Context = PaymentSagaContext<N, G>;
    type Error = FailureReason;
    type CompensationError = RollbackError;

    fn id(&self) -> Self::Id {
        PaymentStep::Validate
    }

    fn execute(&self, _ctx: &Self::Context, data: Self::Data) -> Result<Self::Data, Self::Error> {
        let has_account = data
            .account_id
            .as_ref()
            .is_some_and(|account| !account.as_str().trim().is_empty());

        if data.amount > 0 && has_account {
            debug!(amount = data.amount, "payment details valid");
            Ok(data)
        } else {
            debug!(amount = data.amount, has_account, "rejecting payment details");
            Err(FailureReason::InvalidPaymentDetails)
        }
    }

    fn compensate(
        &self,
        ctx: &Self::Context,
        _data: &Self::Data,
        reason: &Self::Error,
    ) -> Result<(), Self::CompensationError> {
        notify_rollback(ctx, self.id(), *reason, self.compensation_description());
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "cancel payment validation".to_string()
    }
}

pub struct ProcessPaymentStep<N, G> {
    _marker: PhantomData<(N, G)>,
}

impl<N, G> ProcessPaymentStep<N, G> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<N, G> Default for ProcessPaymentStep<N, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, G> SagaStep for ProcessPaymentStep<N, G>
where
    N: Notifier + Send + Sync,
    G: TransactionIdGenerator + Send + Sync,
{
    type Id = PaymentStep;
    type Data = TransactionContext;
    type Context = PaymentSagaContext<N, G>;
    type Error = FailureReason;
    type CompensationError = RollbackError;

    fn id(&self) -> Self::Id {
        PaymentStep::Process
    }

    fn execute(
        &self,
        ctx: &Self::Context,
        mut data: Self::Data,
    ) -> Result<Self::Data, Self::Error> {
        if ctx.options().force_payment_failure {
            debug!("payment processing forced to fail");
            return Err(FailureReason::PaymentFailed);
        }

        let transaction_id = ctx.id_generator().next_id();
        debug!(%transaction_id, amount = data.amount, "payment processed");
        data.transaction_id = Some(transaction_id);
        Ok(data)
    }

    fn compensate(
        &self,
        ctx: &Self::Context,
        data: &Self::Data,
        reason: &Self::Error,
    ) -> Result<(), Self::CompensationError> {
        let mut description = format!("refund {}", data.amount);
        if let Some(account_id) = &data.account_id {
            description.push_str(&format!(" to account {account_id}"));
        }
        if let Some(transaction_id) = &data.transaction_id {
            description.push_str(&format!(" for transaction {transaction_id}"));
        }
        notify_rollback(ctx, self.id(), *reason, description);
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "refund the processed payment to the account".to_string()
    }
}

pub struct ConfirmPaymentStep<N, G> {
    _marker: PhantomData<(N, G)>,
}

impl<N, G> ConfirmPaymentStep<N, G> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<N, G> Default for ConfirmPaymentStep<N, G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, G> SagaStep for ConfirmPaymentStep<N, G>
where
    N: Notifier + Send + Sync,
    G: TransactionIdGenerator + Send + Sync,
{
    type Id = PaymentStep;
    type Data = TransactionContext;
    type Context = PaymentSagaContext<N, G>;
    type Error = FailureReason;
    type CompensationError = RollbackError;

    fn id(&self) -> Self::Id {
        PaymentStep::Confirm
    }

    fn execute(&self, ctx: &Self::Context, data: Self::Data) -> Result<Self::Data, Self::Error> {
        if ctx.options().force_confirmation_failure {
            debug!("confirmation forced to fail");
            return Err(FailureReason::ConfirmationFailed);
        }

        let Some(transaction_id) = data.transaction_id.clone() else {
            warn!("no transaction id to confirm; was the payment processed?");
            return Err(FailureReason::ConfirmationFailed);
        };

        debug!(%transaction_id, "sending confirmation");
        ctx.notifier()
            .notify(&Notification::Confirmation { transaction_id });
        Ok(data)
    }

    fn compensate(
        &self,
        ctx: &Self::Context,
        data: &Self::Data,
        reason: &Self::Error,
    ) -> Result<(), Self::CompensationError> {
        let description = match &data.transaction_id {
            Some(transaction_id) => format!("retract confirmation for transaction {transaction_id}"),
            None => self.compensation_description(),
        };
        notify_rollback(ctx, self.id(), *reason, description);
        Ok(())
    }

    fn compensation_description(&self) -> String {
        "retract the confirmation".to_string()
    }
}
