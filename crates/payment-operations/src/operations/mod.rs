mod payment;

pub use payment::{
    ConfirmPaymentStep, PaymentOperation, PaymentRegistry, PaymentReport, PaymentSagaContext,
    ProcessPaymentStep, ValidatePaymentStep, payment_registry,
};
