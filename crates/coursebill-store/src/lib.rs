//! Purchase record storage for coursebill.
//!
//! One table, owned exclusively by this crate: a row per purchase attempt,
//! created `pending` when the payment provider accepts a charge and moved to
//! `success` when the provider's webhook confirms it.
//!
//! The PostgreSQL backend runs under a deliberately scarce resource budget:
//! at most two open connections, a 3-second statement timeout, and a
//! 400-millisecond lock-wait timeout. Operations that cannot acquire a lock
//! in time fail fast with a retryable error instead of queueing; retry policy
//! belongs to the caller.
//!
//! # Example
//!
//! ```no_run
//! use coursebill_core::{BillingId, PurchaseStatus};
//! use coursebill_store::{PgPurchaseStore, PurchaseStore};
//!
//! # async fn example() -> Result<(), coursebill_store::StoreError> {
//! let store = PgPurchaseStore::connect("postgres://localhost/coursebill").await?;
//!
//! let billing_id: BillingId = "pay_abc".parse().unwrap();
//! let record_id = store.add_purchase(7, 3, &billing_id).await?;
//!
//! // Later, on webhook confirmation:
//! store.mark_status(&billing_id, PurchaseStatus::Success).await?;
//! # let _ = record_id;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod postgres;

pub use error::{Result, StoreError};
pub use memory::MemoryPurchaseStore;
pub use postgres::PgPurchaseStore;

use async_trait::async_trait;
use coursebill_core::{BillingId, PurchaseRecord, PurchaseStatus};

/// The storage trait for purchase records.
///
/// Abstracts the backend so the facade can run against PostgreSQL in
/// production and an in-memory store in tests.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Insert a new `pending` purchase record, returning its surrogate key.
    ///
    /// # Errors
    ///
    /// - `StoreError::DuplicateBillingId` if a record with this billing id
    ///   already exists.
    /// - `StoreError::Busy` on lock or statement timeout; retryable.
    /// - `StoreError::Database` on any other statement failure.
    async fn add_purchase(
        &self,
        user_id: i64,
        course_id: i64,
        billing_id: &BillingId,
    ) -> Result<i64>;

    /// Set the status of the record matching `billing_id`, refreshing
    /// `updated_at`.
    ///
    /// Idempotent with respect to final state: re-applying `Success` to an
    /// already-successful row is a no-op.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if zero rows matched; never reported as
    ///   success.
    /// - `StoreError::Busy` on lock or statement timeout; retryable.
    async fn mark_status(&self, billing_id: &BillingId, status: PurchaseStatus) -> Result<()>;

    /// Look up a purchase record by billing id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn find_by_billing_id(&self, billing_id: &BillingId) -> Result<Option<PurchaseRecord>>;
}
