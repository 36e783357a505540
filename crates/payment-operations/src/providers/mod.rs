mod id_generator;
mod notifier;

pub use id_generator::{RandomTransactionIds, SequentialTransactionIds};
pub use notifier::{NoopNotifier, RecordingNotifier, StdoutNotifier, TracingNotifier};
