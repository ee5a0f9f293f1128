//! Payment provider client implementation.

use std::time::Duration;

use reqwest::Client;

use coursebill_core::BillingId;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::types::{AmountBody, ChargeBody, ChargeResponse, ConfirmationBody};

/// Bound on the provider round trip. A hung provider must not hold the
/// caller's request open indefinitely.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the per-call idempotency key.
const IDEMPOTENCY_HEADER: &str = "Idempotence-Key";

/// A new charge accepted by the provider.
#[derive(Debug, Clone)]
pub struct NewCharge {
    /// Provider-issued identifier for this charge.
    pub billing_id: BillingId,

    /// URL the buyer must visit to confirm the payment.
    pub confirmation_url: String,
}

/// Parameters for creating a charge.
#[derive(Debug, Clone)]
pub struct ChargeRequest {
    /// Absolute URL the provider redirects the buyer to after payment.
    pub return_url: String,

    /// Course title, used in the charge description only.
    pub course_title: String,

    /// Buyer, used in the charge description only.
    pub user_id: i64,

    /// Course, used in the charge description only.
    pub course_id: i64,

    /// Price in whole currency units. Must be positive.
    pub amount: u64,
}

/// Payment provider API client.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Create a new provider client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Create a redirect-based charge at the provider.
    ///
    /// A fresh idempotency key is generated for every call, so repeated
    /// invocations with identical arguments create distinct charges.
    ///
    /// On success the provider holds charge state that this system only
    /// knows through the returned billing id; the caller must persist it
    /// immediately.
    ///
    /// # Errors
    ///
    /// - `GatewayError::InvalidAmount` if `amount` is zero (checked before
    ///   any network traffic).
    /// - `GatewayError::Http` on transport failure or timeout.
    /// - `GatewayError::Status` on a non-success HTTP status.
    /// - `GatewayError::MalformedResponse` if the payment id or confirmation
    ///   URL is missing from an otherwise successful response.
    pub async fn create_payment(&self, request: &ChargeRequest) -> Result<NewCharge, GatewayError> {
        if request.amount == 0 {
            return Err(GatewayError::InvalidAmount(request.amount));
        }

        let idempotency_key = uuid::Uuid::new_v4().to_string();

        let body = ChargeBody {
            amount: AmountBody {
                // Whole currency units rendered with two decimal places.
                value: format!("{}.00", request.amount),
                currency: self.config.currency.clone(),
            },
            confirmation: ConfirmationBody {
                kind: "redirect",
                return_url: request.return_url.clone(),
            },
            capture: true,
            description: format!(
                "Course \"{}\" (course {}) purchase by user {}",
                request.course_title, request.course_id, request.user_id
            ),
        };

        tracing::debug!(
            user_id = request.user_id,
            course_id = request.course_id,
            amount = request.amount,
            idempotency_key = %idempotency_key,
            "Creating provider charge"
        );

        let response = self
            .client
            .post(format!("{}/v3/payments", self.config.api_url))
            .basic_auth(&self.config.shop_id, Some(&self.config.secret_key))
            .header(IDEMPOTENCY_HEADER, idempotency_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let charge: ChargeResponse = response.json().await?;

        let billing_id = charge
            .id
            .and_then(|id| id.parse::<BillingId>().ok())
            .ok_or(GatewayError::MalformedResponse("payment id"))?;

        let confirmation_url = charge
            .confirmation
            .and_then(|c| c.confirmation_url)
            .filter(|url| !url.is_empty())
            .ok_or(GatewayError::MalformedResponse("confirmation URL"))?;

        tracing::info!(billing_id = %billing_id, "Provider accepted charge");

        Ok(NewCharge {
            billing_id,
            confirmation_url,
        })
    }
}
