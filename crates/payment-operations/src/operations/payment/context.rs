use std::sync::Arc;

use crate::config::PaymentOptions;
use crate::traits::{Notifier, TransactionIdGenerator};

/// Dependencies and switches shared by the steps of one payment call.
pub struct PaymentSagaContext<N, G> {
    notifier: Arc<N>,
    id_generator: Arc<G>,
    options: PaymentOptions,
}

impl<N, G> Clone for PaymentSagaContext<N, G> {
    fn clone(&self) -> Self {
        Self {
            notifier: Arc::clone(&self.notifier),
            id_generator: Arc::clone(&self.id_generator),
            options: self.options,
        }
    }
}

impl<N, G> PaymentSagaContext<N, G>
where
    N: Notifier,
    G: TransactionIdGenerator,
{
    pub fn new(notifier: Arc<N>, id_generator: Arc<G>, options: PaymentOptions) -> Self {
        Self {
            notifier,
            id_generator,
            options,
        }
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    #[must_use]
    pub fn id_generator(&self) -> &G {
        &self.id_generator
    }

    #[must_use]
    pub fn options(&self) -> PaymentOptions {
        self.options
    }
}
