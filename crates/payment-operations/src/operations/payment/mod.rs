mod context;
mod operation;
mod saga_steps;

pub use context::PaymentSagaContext;
pub use operation::{PaymentOperation, PaymentRegistry, PaymentReport, payment_registry};
pub use saga_steps::{ConfirmPaymentStep, ProcessPaymentStep, ValidatePaymentStep};
