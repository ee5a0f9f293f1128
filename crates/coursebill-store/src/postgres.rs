//! PostgreSQL purchase store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Executor, PgPool, Row};

use coursebill_core::{BillingId, PurchaseRecord, PurchaseStatus};

use crate::error::{Result, StoreError};
use crate::PurchaseStore;

/// Connection budget: two open connections, one kept idle.
const MAX_CONNECTIONS: u32 = 2;
const MIN_CONNECTIONS: u32 = 1;

/// How long to wait for a pooled connection before failing fast.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(3);

/// Session settings applied to every new connection. Statements are bounded
/// at 3 seconds and lock waits at 400 milliseconds; an operation that cannot
/// take a row lock in time fails with SQLSTATE 55P03 and surfaces as the
/// retryable `StoreError::Busy`.
const SESSION_SETTINGS: &str = "SET statement_timeout = '3s'; SET lock_timeout = '400ms'";

// SQLSTATE codes interpreted by the error mapping.
const LOCK_NOT_AVAILABLE: &str = "55P03";
const QUERY_CANCELED: &str = "57014";
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed purchase store.
#[derive(Debug, Clone)]
pub struct PgPurchaseStore {
    pool: PgPool,
}

impl PgPurchaseStore {
    /// Connect to PostgreSQL, apply the session budget to every connection,
    /// and run pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be established or a migration
    /// fails.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .min_connections(MIN_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    conn.execute(SESSION_SETTINGS).await?;
                    Ok(())
                })
            })
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        tracing::info!(
            max_connections = MAX_CONNECTIONS,
            "Connected to PostgreSQL purchase store"
        );

        Ok(Self { pool })
    }

    /// Build a store around an existing pool. The pool is expected to carry
    /// the session settings already; used by integration tests.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PurchaseStore for PgPurchaseStore {
    async fn add_purchase(
        &self,
        user_id: i64,
        course_id: i64,
        billing_id: &BillingId,
    ) -> Result<i64> {
        let row = sqlx::query(
            "INSERT INTO purchases (user_id, course_id, billing_id, status) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(billing_id.as_str())
        .bind(PurchaseStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_err(&e, Some(billing_id)))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| StoreError::Database(e.to_string()))?;

        tracing::debug!(
            record_id = id,
            user_id,
            course_id,
            billing_id = %billing_id,
            "Inserted pending purchase"
        );

        Ok(id)
    }

    async fn mark_status(&self, billing_id: &BillingId, status: PurchaseStatus) -> Result<()> {
        let result = sqlx::query(
            "UPDATE purchases SET status = $2, updated_at = now() WHERE billing_id = $1",
        )
        .bind(billing_id.as_str())
        .bind(status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_err(&e, Some(billing_id)))?;

        // Zero matched rows is a distinct outcome, never a silent success.
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                billing_id: billing_id.to_string(),
            });
        }

        tracing::debug!(billing_id = %billing_id, status = %status, "Updated purchase status");

        Ok(())
    }

    async fn find_by_billing_id(&self, billing_id: &BillingId) -> Result<Option<PurchaseRecord>> {
        let row = sqlx::query(
            "SELECT id, user_id, course_id, billing_id, status, created_at, updated_at \
             FROM purchases WHERE billing_id = $1",
        )
        .bind(billing_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_err(&e, Some(billing_id)))?;

        row.map(|r| record_from_row(&r)).transpose()
    }
}

/// Decode a purchase row.
fn record_from_row(row: &PgRow) -> Result<PurchaseRecord> {
    let billing_id: String = try_column(row, "billing_id")?;
    let status: String = try_column(row, "status")?;
    let created_at: DateTime<Utc> = try_column(row, "created_at")?;
    let updated_at: DateTime<Utc> = try_column(row, "updated_at")?;

    Ok(PurchaseRecord {
        id: try_column(row, "id")?,
        user_id: try_column(row, "user_id")?,
        course_id: try_column(row, "course_id")?,
        billing_id: billing_id
            .parse::<BillingId>()
            .map_err(|e| StoreError::Database(e.to_string()))?,
        status: status
            .parse::<PurchaseStatus>()
            .map_err(|e| StoreError::Database(e.to_string()))?,
        created_at,
        updated_at,
    })
}

fn try_column<'r, T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>>(
    row: &'r PgRow,
    name: &str,
) -> Result<T> {
    row.try_get(name)
        .map_err(|e| StoreError::Database(e.to_string()))
}

/// Classify a sqlx error into the store taxonomy.
fn map_db_err(err: &sqlx::Error, billing_id: Option<&BillingId>) -> StoreError {
    if let sqlx::Error::Database(db) = err {
        match db.code().as_deref() {
            Some(LOCK_NOT_AVAILABLE | QUERY_CANCELED) => {
                return StoreError::Busy(db.message().to_string());
            }
            Some(UNIQUE_VIOLATION) => {
                if let Some(id) = billing_id {
                    return StoreError::DuplicateBillingId {
                        billing_id: id.to_string(),
                    };
                }
            }
            _ => {}
        }
    }

    if matches!(err, sqlx::Error::PoolTimedOut) {
        return StoreError::Busy("connection pool exhausted".into());
    }

    StoreError::Database(err.to_string())
}
