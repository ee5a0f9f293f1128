//! Error types for coursebill storage.

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
///
/// Every variant is a recoverable error value. In particular an insert
/// failure must never abort the process: by the time the store is called the
/// remote charge already exists, and the caller needs the chance to log and
/// compensate.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A lock or statement timed out under the constrained connection
    /// budget. Retryable by the caller with backoff; the store itself never
    /// retries.
    #[error("store busy: {0}")]
    Busy(String),

    /// No purchase record matches the billing id. Distinct from success:
    /// the webhook may have arrived before the local insert became visible,
    /// or the id was never issued to this system.
    #[error("purchase not found: {billing_id}")]
    NotFound {
        /// The billing id that matched zero rows.
        billing_id: String,
    },

    /// A record with this billing id already exists (one provider charge
    /// maps to exactly one local record).
    #[error("duplicate billing id: {billing_id}")]
    DuplicateBillingId {
        /// The conflicting billing id.
        billing_id: String,
    },

    /// Database statement failed.
    #[error("database error: {0}")]
    Database(String),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Whether the caller may retry the operation with backoff.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Busy(_))
    }
}
