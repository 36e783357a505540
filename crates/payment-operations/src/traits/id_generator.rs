use crate::types::TransactionId;

/// Source of identifiers for processed payments.
pub trait TransactionIdGenerator: Send + Sync {
    fn next_id(&self) -> TransactionId;
}
