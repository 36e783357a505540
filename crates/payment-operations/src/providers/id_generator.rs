use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;

use crate::traits::TransactionIdGenerator;
use crate::types::TransactionId;

const RANDOM_ID_UPPER_BOUND: u64 = 1_000_000;

/// Draws identifiers uniformly from `txn_0` to `txn_999999`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomTransactionIds;

impl TransactionIdGenerator for RandomTransactionIds {
    fn next_id(&self) -> TransactionId {
        let number = rand::thread_rng().gen_range(0..RANDOM_ID_UPPER_BOUND);
        TransactionId::from_number(number)
    }
}

/// Hands out consecutive identifiers, for reproducible runs.
#[derive(Debug)]
pub struct SequentialTransactionIds {
    next: AtomicU64,
}

impl SequentialTransactionIds {
    #[must_use]
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialTransactionIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl TransactionIdGenerator for SequentialTransactionIds {
    fn next_id(&self) -> TransactionId {
        TransactionId::from_number(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_are_well_formed() {
        let ids = RandomTransactionIds;

        for _ in 0..100 {
            let id = ids.next_id();
            let number = id.number().expect("txn_<digits>");
            assert!(number < RANDOM_ID_UPPER_BOUND);
        }
    }

    #[test]
    fn sequential_ids_count_up_from_start() {
        let ids = SequentialTransactionIds::starting_at(123);

        assert_eq!(ids.next_id().as_str(), "txn_123");
        assert_eq!(ids.next_id().as_str(), "txn_124");
    }

    #[test]
    fn sequential_ids_default_to_one() {
        assert_eq!(SequentialTransactionIds::default().next_id().as_str(), "txn_1");
    }
}
