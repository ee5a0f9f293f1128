//! Provider webhook notifications.
//!
//! The payment provider reports a charge's state asynchronously by POSTing a
//! JSON notification. Delivery is at-least-once: the provider redelivers
//! until acknowledged, so everything downstream of parsing must be
//! idempotent.
//!
//! Payload shape:
//!
//! ```json
//! {
//!   "event": "payment.succeeded",
//!   "object": { "id": "pay_abc", "status": "succeeded" }
//! }
//! ```
//!
//! Only the event name, payment id, and status are interpreted; the raw body
//! is preserved on the parsed value for audit.

use serde::Deserialize;

use crate::BillingId;

/// The provider status string that marks a charge as settled.
const SUCCEEDED: &str = "succeeded";

/// Wire shape of a provider notification.
#[derive(Debug, Deserialize)]
struct WireNotification {
    event: Option<String>,
    object: Option<WireObject>,
}

#[derive(Debug, Deserialize)]
struct WireObject {
    id: Option<String>,
    status: Option<String>,
}

/// A parsed provider notification.
#[derive(Debug, Clone)]
pub struct PaymentNotification {
    /// Provider event name, e.g. `payment.succeeded`.
    pub event: String,

    /// The charge this notification refers to.
    pub payment_id: BillingId,

    /// Provider-reported charge status.
    pub status: String,

    raw: String,
}

impl PaymentNotification {
    /// Parse a raw webhook body.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError` if the body is not JSON or any of the three
    /// interpreted fields is missing or empty. Rejection happens before any
    /// persistence is attempted.
    pub fn parse(raw: &str) -> Result<Self, WebhookError> {
        let wire: WireNotification = serde_json::from_str(raw)?;

        let event = wire
            .event
            .filter(|e| !e.is_empty())
            .ok_or(WebhookError::MissingField("event"))?;

        let object = wire.object.ok_or(WebhookError::MissingField("object"))?;

        let payment_id = object
            .id
            .ok_or(WebhookError::MissingField("object.id"))?
            .parse::<BillingId>()
            .map_err(|_| WebhookError::MissingField("object.id"))?;

        let status = object
            .status
            .filter(|s| !s.is_empty())
            .ok_or(WebhookError::MissingField("object.status"))?;

        Ok(Self {
            event,
            payment_id,
            status,
            raw: raw.to_string(),
        })
    }

    /// Whether this notification reports the terminal success state.
    ///
    /// Any other status (`canceled`, `waiting_for_capture`, ...) must never
    /// mutate a purchase record.
    #[must_use]
    pub fn is_terminal_success(&self) -> bool {
        self.status == SUCCEEDED
    }

    /// The raw body as delivered, preserved for audit.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Outcome of reconciling a webhook notification against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Terminal success; the purchase record is now `Success`.
    /// Redelivery of the same notification also yields `Applied`.
    Applied,

    /// Non-terminal status; no record was mutated.
    Ignored,

    /// No purchase record matches the payment id: the local insert is not
    /// yet visible, or the id was never issued to this system.
    UnknownBillingId,
}

impl WebhookOutcome {
    /// Whether the notification changed (or re-confirmed) local state.
    #[must_use]
    pub const fn applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Errors that can occur while parsing a webhook payload.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The body is not valid JSON.
    #[error("invalid webhook payload: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A required field is absent or empty.
    #[error("webhook payload missing field: {0}")]
    MissingField(&'static str),
}
