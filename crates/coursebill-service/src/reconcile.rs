//! Webhook reconciliation.
//!
//! The reconciler owns the whole confirm-and-persist step: it classifies a
//! parsed notification and, for terminal successes, writes the status change
//! itself. Callers get a definitive [`WebhookOutcome`] back, so no caller
//! can classify a payment as confirmed and then forget to persist it.
//!
//! Providers deliver webhooks at least once; because the status write is
//! idempotent, applying the same notification twice converges on the same
//! record state and reports `Applied` both times.

use coursebill_core::{PaymentNotification, PurchaseStatus, WebhookOutcome};
use coursebill_store::{PurchaseStore, StoreError};

/// Apply a parsed provider notification to the store.
///
/// # Errors
///
/// Propagates store failures other than the zero-match case, which is
/// reported as `WebhookOutcome::UnknownBillingId`. A `StoreError::Busy` in
/// particular bubbles up so the HTTP boundary can ask the provider to
/// redeliver.
pub async fn apply(
    store: &dyn PurchaseStore,
    notification: &PaymentNotification,
) -> Result<WebhookOutcome, StoreError> {
    if !notification.is_terminal_success() {
        tracing::info!(
            event = %notification.event,
            billing_id = %notification.payment_id,
            status = %notification.status,
            "Ignoring non-terminal payment notification"
        );
        return Ok(WebhookOutcome::Ignored);
    }

    match store
        .mark_status(&notification.payment_id, PurchaseStatus::Success)
        .await
    {
        Ok(()) => {
            tracing::info!(
                billing_id = %notification.payment_id,
                event = %notification.event,
                "Purchase confirmed"
            );
            Ok(WebhookOutcome::Applied)
        }
        Err(StoreError::NotFound { .. }) => {
            // Either the local insert is not yet visible or the id was never
            // ours. Log the raw payload for operator follow-up; the provider
            // will redeliver.
            tracing::warn!(
                billing_id = %notification.payment_id,
                event = %notification.event,
                raw = notification.raw(),
                "Webhook for unknown billing id"
            );
            Ok(WebhookOutcome::UnknownBillingId)
        }
        Err(other) => Err(other),
    }
}
