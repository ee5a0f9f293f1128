//! Purchase record types.
//!
//! A `PurchaseRecord` is the local, authoritative row tracking a course
//! purchase's payment status, independent of the provider's bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::BillingId;

/// Status of a purchase attempt.
///
/// The lifecycle is monotonic: a record is created `Pending` and may move to
/// `Success` exactly once; nothing transitions out of `Success`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseStatus {
    /// Charge created at the provider, confirmation not yet received.
    Pending,

    /// The provider confirmed the charge via webhook.
    Success,
}

impl PurchaseStatus {
    /// String form used in the database and on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
        }
    }

    /// Whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether a transition to `next` preserves monotonicity.
    ///
    /// Re-applying the current status is always allowed (webhook redelivery).
    #[must_use]
    pub const fn can_become(self, next: Self) -> bool {
        match self {
            Self::Pending => true,
            Self::Success => matches!(next, Self::Success),
        }
    }
}

impl fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PurchaseStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "success" => Ok(Self::Success),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized purchase status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown purchase status: {0}")]
pub struct UnknownStatus(pub String);

/// A course purchase attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRecord {
    /// Store-assigned surrogate key.
    pub id: i64,

    /// The buying user, as identified by the gateway service.
    pub user_id: i64,

    /// The purchased course.
    pub course_id: i64,

    /// The provider-issued charge identifier. Unique across all records.
    pub billing_id: BillingId,

    /// Current payment status.
    pub status: PurchaseStatus,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the status was last written.
    pub updated_at: DateTime<Utc>,
}

impl PurchaseRecord {
    /// Whether the provider has confirmed this purchase.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_monotonic() {
        assert!(PurchaseStatus::Pending.can_become(PurchaseStatus::Success));
        assert!(PurchaseStatus::Pending.can_become(PurchaseStatus::Pending));
        assert!(PurchaseStatus::Success.can_become(PurchaseStatus::Success));
        assert!(!PurchaseStatus::Success.can_become(PurchaseStatus::Pending));
    }

    #[test]
    fn status_string_roundtrip() {
        for status in [PurchaseStatus::Pending, PurchaseStatus::Success] {
            let parsed: PurchaseStatus = status.as_str().parse().unwrap();
            assert_eq!(status, parsed);
        }
        assert!("cancelled".parse::<PurchaseStatus>().is_err());
    }

    #[test]
    fn status_serde_snake_case() {
        let json = serde_json::to_string(&PurchaseStatus::Pending).unwrap();
        assert_eq!(json, "\"pending\"");
        let parsed: PurchaseStatus = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(parsed, PurchaseStatus::Success);
    }

    #[test]
    fn settled_only_when_success() {
        let now = Utc::now();
        let mut record = PurchaseRecord {
            id: 1,
            user_id: 7,
            course_id: 3,
            billing_id: BillingId::new("pay_abc").unwrap(),
            status: PurchaseStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        assert!(!record.is_settled());

        record.status = PurchaseStatus::Success;
        assert!(record.is_settled());
    }
}
