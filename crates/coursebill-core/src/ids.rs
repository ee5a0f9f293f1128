//! Identifier types for coursebill.
//!
//! The only externally issued identifier is the billing id: the payment
//! provider assigns it to a single charge attempt and every webhook refers
//! back to it. It is the join key between local purchase records and the
//! provider's own bookkeeping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A payment provider charge identifier.
///
/// Opaque to this system; the only guarantee is that the provider issues a
/// distinct value per charge. Must be non-empty.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BillingId(String);

impl BillingId {
    /// Create a billing id from a provider-issued string.
    ///
    /// # Errors
    ///
    /// Returns `IdError::Empty` if the input is empty or whitespace-only.
    pub fn new(id: impl Into<String>) -> Result<Self, IdError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(id))
    }

    /// Return the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for BillingId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for BillingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BillingId({})", self.0)
    }
}

impl fmt::Display for BillingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for BillingId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BillingId> for String {
    fn from(id: BillingId) -> Self {
        id.0
    }
}

impl AsRef<str> for BillingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The identifier is empty.
    #[error("billing id is empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_id_roundtrip() {
        let id = BillingId::new("pay_abc").unwrap();
        assert_eq!(id.as_str(), "pay_abc");
        assert_eq!(id.to_string(), "pay_abc");

        let parsed: BillingId = "pay_abc".parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn billing_id_rejects_empty() {
        assert_eq!(BillingId::new(""), Err(IdError::Empty));
        assert_eq!(BillingId::new("   "), Err(IdError::Empty));
    }

    #[test]
    fn billing_id_serde_json() {
        let id = BillingId::new("pay_abc").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"pay_abc\"");

        let parsed: BillingId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn billing_id_serde_rejects_empty() {
        let result: Result<BillingId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
