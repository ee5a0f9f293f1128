//! In-memory purchase store.
//!
//! Backs facade and handler tests; keeps the same observable semantics as
//! the PostgreSQL store (unique billing ids, zero-match reporting,
//! idempotent status writes).

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use coursebill_core::{BillingId, PurchaseRecord, PurchaseStatus};

use crate::error::{Result, StoreError};
use crate::PurchaseStore;

/// In-memory implementation of [`PurchaseStore`].
#[derive(Debug, Default)]
pub struct MemoryPurchaseStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    records: Vec<PurchaseRecord>,
}

impl MemoryPurchaseStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.records.len()
    }

    /// Whether the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl PurchaseStore for MemoryPurchaseStore {
    async fn add_purchase(
        &self,
        user_id: i64,
        course_id: i64,
        billing_id: &BillingId,
    ) -> Result<i64> {
        let mut inner = self.inner.lock().await;

        if inner.records.iter().any(|r| &r.billing_id == billing_id) {
            return Err(StoreError::DuplicateBillingId {
                billing_id: billing_id.to_string(),
            });
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let now = Utc::now();

        inner.records.push(PurchaseRecord {
            id,
            user_id,
            course_id,
            billing_id: billing_id.clone(),
            status: PurchaseStatus::Pending,
            created_at: now,
            updated_at: now,
        });

        Ok(id)
    }

    async fn mark_status(&self, billing_id: &BillingId, status: PurchaseStatus) -> Result<()> {
        let mut inner = self.inner.lock().await;

        let record = inner
            .records
            .iter_mut()
            .find(|r| &r.billing_id == billing_id)
            .ok_or_else(|| StoreError::NotFound {
                billing_id: billing_id.to_string(),
            })?;

        record.status = status;
        record.updated_at = Utc::now();

        Ok(())
    }

    async fn find_by_billing_id(&self, billing_id: &BillingId) -> Result<Option<PurchaseRecord>> {
        let inner = self.inner.lock().await;
        Ok(inner
            .records
            .iter()
            .find(|r| &r.billing_id == billing_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn billing_id(s: &str) -> BillingId {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn add_then_find() {
        let store = MemoryPurchaseStore::new();
        let id = store.add_purchase(7, 3, &billing_id("pay_abc")).await.unwrap();
        assert_eq!(id, 1);

        let record = store
            .find_by_billing_id(&billing_id("pay_abc"))
            .await
            .unwrap()
            .expect("record should exist");
        assert_eq!(record.user_id, 7);
        assert_eq!(record.course_id, 3);
        assert_eq!(record.status, PurchaseStatus::Pending);
    }

    #[tokio::test]
    async fn duplicate_billing_id_rejected() {
        let store = MemoryPurchaseStore::new();
        store.add_purchase(7, 3, &billing_id("pay_abc")).await.unwrap();

        let err = store
            .add_purchase(8, 4, &billing_id("pay_abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateBillingId { .. }));
    }

    #[tokio::test]
    async fn mark_status_reports_zero_matches() {
        let store = MemoryPurchaseStore::new();
        let err = store
            .mark_status(&billing_id("pay_missing"), PurchaseStatus::Success)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn mark_status_is_idempotent() {
        let store = MemoryPurchaseStore::new();
        store.add_purchase(7, 3, &billing_id("pay_abc")).await.unwrap();

        store
            .mark_status(&billing_id("pay_abc"), PurchaseStatus::Success)
            .await
            .unwrap();
        store
            .mark_status(&billing_id("pay_abc"), PurchaseStatus::Success)
            .await
            .unwrap();

        let record = store
            .find_by_billing_id(&billing_id("pay_abc"))
            .await
            .unwrap()
            .expect("record should exist");
        assert_eq!(record.status, PurchaseStatus::Success);
    }
}
