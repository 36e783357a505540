use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::error::InputError;

/// Identifier of the account a payment is drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier assigned to a processed payment, formatted `txn_<digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub const PREFIX: &'static str = "txn_";

    #[must_use]
    pub fn from_number(number: u64) -> Self {
        Self(format!("{}{number}", Self::PREFIX))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric part of the identifier, if it has the `txn_<digits>` shape.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        let digits = self.0.strip_prefix(Self::PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The record a payment carries through the pipeline.
///
/// Fields other than `amount`, `account_id` and `transaction_id` are kept in
/// `extra` and handed back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionContext {
    /// Amount in minor currency units.
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: i64,
    pub account_id: Option<AccountId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<TransactionId>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl TransactionContext {
    /// Keys held by the named fields; never stored in `extra`.
    pub const RESERVED_KEYS: [&'static str; 3] = ["amount", "account_id", "transaction_id"];

    #[must_use]
    pub fn new(amount: i64, account_id: Option<AccountId>) -> Self {
        Self {
            amount,
            account_id,
            transaction_id: None,
            extra: IndexMap::new(),
        }
    }

    /// Attach a pass-through field.
    ///
    /// Keys in [`RESERVED_KEYS`](Self::RESERVED_KEYS) are ignored; set the
    /// named field instead.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        let key = key.into();
        if Self::RESERVED_KEYS.contains(&key.as_str()) {
            warn!(%key, "ignoring pass-through field that shadows a named field");
            return self;
        }
        self.extra.insert(key, value.into());
        self
    }

    /// Parse a JSON object such as `{"amount": 100, "account_id": "acc_456"}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not an object with a whole-number
    /// `amount` (`100` and `100.0` both qualify) and a string or `null`
    /// `account_id`.
    pub fn from_json(input: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Like [`from_json`](Self::from_json), for an already parsed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not have the expected shape.
    pub fn from_value(input: serde_json::Value) -> Result<Self, InputError> {
        Ok(serde_json::from_value(input)?)
    }

    /// Serialize back to a JSON object, extra fields included.
    ///
    /// # Errors
    ///
    /// Returns an error if an extra field cannot be serialized.
    pub fn to_json(&self) -> Result<String, InputError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Accepts integers and whole-valued floats such as `100.0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::float_cmp)]
fn deserialize_amount<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    if let Some(amount) = number.as_i64() {
        return Ok(amount);
    }

    match number.as_f64() {
        Some(value)
            if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 =>
        {
            Ok(value as i64)
        }
        Some(value) => Err(de::Error::invalid_value(
            Unexpected::Float(value),
            &"a whole number of minor units",
        )),
        None => Err(de::Error::invalid_value(
            Unexpected::Other("number"),
            &"a whole number of minor units",
        )),
    }
}

/// The steps of the payment pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStep {
    Validate,
    Process,
    Confirm,
}

impl PaymentStep {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validate => "validate_payment",
            Self::Process => "process_payment",
            Self::Confirm => "send_confirmation",
        }
    }
}

impl fmt::Display for PaymentStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
