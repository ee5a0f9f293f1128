//! Payment creation handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use coursebill_gateway::ChargeRequest;

use crate::auth::ServiceAuth;
use crate::error::ApiError;
use crate::state::AppState;

/// Payment creation request from the gateway service.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    /// Absolute URL the provider redirects the buyer to after payment.
    pub return_url: String,
    /// The authenticated buyer, as established by the gateway service.
    pub user_id: i64,
    /// The course being purchased.
    pub course_id: i64,
    /// Course title for the charge description.
    pub course_title: String,
    /// Price in whole currency units.
    pub amount: u64,
}

/// Payment creation response.
#[derive(Debug, Serialize)]
pub struct CreatePaymentResponse {
    /// URL to send the buyer to.
    pub confirmation_url: String,
    /// Provider-issued charge identifier.
    pub billing_id: String,
}

/// Create a payment: charge at the provider, record locally as pending.
pub async fn create_payment(
    State(state): State<Arc<AppState>>,
    auth: ServiceAuth,
    Json(request): Json<CreatePaymentRequest>,
) -> Result<Json<CreatePaymentResponse>, ApiError> {
    if !request.return_url.starts_with("http://") && !request.return_url.starts_with("https://") {
        return Err(ApiError::BadRequest("return_url must be absolute".into()));
    }

    tracing::debug!(
        service = %auth.caller(),
        user_id = request.user_id,
        course_id = request.course_id,
        amount = request.amount,
        "Payment creation requested"
    );

    let charge = state
        .facade
        .create_payment(&ChargeRequest {
            return_url: request.return_url,
            course_title: request.course_title,
            user_id: request.user_id,
            course_id: request.course_id,
            amount: request.amount,
        })
        .await?;

    Ok(Json(CreatePaymentResponse {
        confirmation_url: charge.confirmation_url,
        billing_id: charge.billing_id.into_inner(),
    }))
}
