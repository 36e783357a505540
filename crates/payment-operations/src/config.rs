use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Per-call switches that force a step's failure branch.
///
/// Both default to `false`. Read from TOML with kebab-case keys:
///
/// ```toml
/// force-payment-failure = true
/// force-confirmation-failure = false
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PaymentOptions {
    pub force_payment_failure: bool,
    pub force_confirmation_failure: bool,
}

impl PaymentOptions {
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or contains
    /// unknown keys.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    #[must_use]
    pub fn with_payment_failure(mut self) -> Self {
        self.force_payment_failure = true;
        self
    }

    #[must_use]
    pub fn with_confirmation_failure(mut self) -> Self {
        self.force_confirmation_failure = true;
        self
    }
}
