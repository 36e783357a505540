use std::sync::Arc;

use crate::config::PaymentOptions;
use crate::operations::PaymentSagaContext;
use crate::providers::{RecordingNotifier, SequentialTransactionIds};

pub type TestSagaContext = PaymentSagaContext<RecordingNotifier, SequentialTransactionIds>;

/// Context whose identifiers start at `txn_123`, plus a handle on its notifier.
pub fn test_context(options: PaymentOptions) -> (TestSagaContext, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let ctx = PaymentSagaContext::new(
        Arc::clone(&notifier),
        Arc::new(SequentialTransactionIds::starting_at(123)),
        options,
    );
    (ctx, notifier)
}
