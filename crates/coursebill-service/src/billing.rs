//! The billing facade.
//!
//! Single entry point for the two billing operations: payment creation and
//! webhook reconciliation. Orchestrates the provider client, the purchase
//! store, and the reconciler.

use std::sync::Arc;

use coursebill_core::{BillingId, PaymentNotification, WebhookError, WebhookOutcome};
use coursebill_gateway::{ChargeRequest, GatewayClient, GatewayError, NewCharge};
use coursebill_store::{PurchaseStore, StoreError};

use crate::reconcile;

/// Errors surfaced at the facade boundary. All four kinds are distinct and
/// inspectable; none are swallowed.
#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    /// The provider call failed; no state exists anywhere.
    #[error("payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// The provider accepted the charge but the local insert failed. The
    /// charge is stranded remotely and needs out-of-band reconciliation
    /// against the provider's payment-status API.
    #[error("charge {billing_id} created at provider but not recorded: {source}")]
    Stranded {
        /// The provider-issued id of the stranded charge.
        billing_id: BillingId,
        /// The store failure that caused the stranding.
        source: StoreError,
    },

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The webhook payload could not be parsed.
    #[error(transparent)]
    Webhook(#[from] WebhookError),
}

/// The billing facade.
#[derive(Clone)]
pub struct BillingFacade {
    store: Arc<dyn PurchaseStore>,
    gateway: Arc<GatewayClient>,
}

impl BillingFacade {
    /// Create a facade over a store and a provider client.
    #[must_use]
    pub fn new(store: Arc<dyn PurchaseStore>, gateway: Arc<GatewayClient>) -> Self {
        Self { store, gateway }
    }

    /// Create a payment: charge at the provider, then record it locally as
    /// `pending`.
    ///
    /// If the local insert fails after the provider call succeeded, the
    /// error names the stranded billing id: the caller sees an explicit
    /// failure, never a silent success, and the id is logged for manual
    /// reconciliation.
    ///
    /// # Errors
    ///
    /// See [`BillingError`].
    pub async fn create_payment(&self, request: &ChargeRequest) -> Result<NewCharge, BillingError> {
        let charge = self.gateway.create_payment(request).await?;

        match self
            .store
            .add_purchase(request.user_id, request.course_id, &charge.billing_id)
            .await
        {
            Ok(record_id) => {
                tracing::info!(
                    record_id,
                    user_id = request.user_id,
                    course_id = request.course_id,
                    billing_id = %charge.billing_id,
                    "Payment created, awaiting provider confirmation"
                );
                Ok(charge)
            }
            Err(source) => {
                tracing::error!(
                    billing_id = %charge.billing_id,
                    user_id = request.user_id,
                    course_id = request.course_id,
                    error = %source,
                    "Charge exists at the provider but has no local record; \
                     needs reconciliation against the provider"
                );
                Err(BillingError::Stranded {
                    billing_id: charge.billing_id,
                    source,
                })
            }
        }
    }

    /// Reconcile an inbound provider notification.
    ///
    /// Parses the raw body, classifies it, and applies terminal successes to
    /// the store. The returned outcome tells the HTTP boundary how to
    /// acknowledge the delivery.
    ///
    /// # Errors
    ///
    /// `BillingError::Webhook` on a malformed payload (rejected before any
    /// persistence), `BillingError::Store` on a store failure.
    pub async fn handle_webhook(&self, raw_body: &str) -> Result<WebhookOutcome, BillingError> {
        let notification = PaymentNotification::parse(raw_body).map_err(|e| {
            tracing::warn!(error = %e, "Rejected malformed payment webhook");
            e
        })?;

        let outcome = reconcile::apply(self.store.as_ref(), &notification).await?;
        Ok(outcome)
    }
}
