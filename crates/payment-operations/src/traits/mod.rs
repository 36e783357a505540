mod id_generator;
mod notifier;

pub use id_generator::TransactionIdGenerator;
pub use notifier::{Notification, Notifier};
