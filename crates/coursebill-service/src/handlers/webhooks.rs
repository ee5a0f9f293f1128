//! Provider webhook handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use coursebill_core::WebhookOutcome;

use crate::error::ApiError;
use crate::state::AppState;

/// Webhook acknowledgment body.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Whether the notification changed (or re-confirmed) local state.
    pub applied: bool,
}

/// Handle a payment provider notification.
///
/// The raw body is handed to the facade unparsed so it can be preserved for
/// audit. Acknowledgment mapping:
///
/// - `Applied` / `Ignored` → 200, delivery acknowledged
/// - `UnknownBillingId` → 404, provider redelivers until the local insert
///   is visible (the webhook may race ahead of payment creation)
/// - malformed payload → 400
/// - store busy → 503, provider retries later
pub async fn payment_webhook(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<WebhookResponse>, ApiError> {
    let outcome = state.facade.handle_webhook(&body).await?;

    match outcome {
        WebhookOutcome::Applied | WebhookOutcome::Ignored => Ok(Json(WebhookResponse {
            applied: outcome.applied(),
        })),
        WebhookOutcome::UnknownBillingId => {
            Err(ApiError::NotFound("purchase record not yet visible".into()))
        }
    }
}
