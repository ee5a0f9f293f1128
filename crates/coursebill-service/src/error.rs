//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use coursebill_gateway::GatewayError;
use coursebill_store::StoreError;

use crate::billing::BillingError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Unauthorized - missing or invalid credentials.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store is at its connection or lock budget; retry with backoff.
    #[error("unavailable: {0}")]
    Unavailable(String),

    /// A charge exists at the provider with no local purchase record.
    #[error("charge {billing_id} not recorded locally")]
    PaymentUnrecorded {
        /// The provider charge id awaiting out-of-band reconciliation.
        billing_id: String,
    },

    /// External service error.
    #[error("external service error: {0}")]
    ExternalService(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
                None,
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone(), None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone(), None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone(), None),
            Self::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "unavailable",
                msg.clone(),
                None,
            ),
            Self::PaymentUnrecorded { billing_id } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "payment_unrecorded",
                "Charge was created at the provider but could not be recorded".to_string(),
                Some(serde_json::json!({ "billing_id": billing_id })),
            ),
            Self::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                msg.clone(),
                None,
            ),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Busy(msg) => Self::Unavailable(msg),
            StoreError::NotFound { billing_id } => {
                Self::NotFound(format!("purchase not found: {billing_id}"))
            }
            StoreError::DuplicateBillingId { billing_id } => {
                Self::Conflict(format!("billing id already recorded: {billing_id}"))
            }
            StoreError::Database(msg) => Self::Internal(msg),
            StoreError::Migration(e) => Self::Internal(e.to_string()),
        }
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        match err {
            BillingError::Gateway(GatewayError::InvalidAmount(amount)) => {
                Self::BadRequest(format!("amount must be positive, got {amount}"))
            }
            BillingError::Gateway(e) => Self::ExternalService(e.to_string()),
            BillingError::Stranded { billing_id, .. } => Self::PaymentUnrecorded {
                billing_id: billing_id.into_inner(),
            },
            BillingError::Store(e) => e.into(),
            BillingError::Webhook(e) => Self::BadRequest(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn busy_store_maps_to_unavailable() {
        let api: ApiError = StoreError::Busy("lock timeout".into()).into();
        assert!(matches!(api, ApiError::Unavailable(_)));
    }

    #[test]
    fn invalid_amount_maps_to_bad_request() {
        let api: ApiError = BillingError::Gateway(GatewayError::InvalidAmount(0)).into();
        assert!(matches!(api, ApiError::BadRequest(_)));
    }

    #[test]
    fn stranded_charge_keeps_billing_id() {
        let billing_id: coursebill_core::BillingId = "pay_abc".parse().unwrap();
        let api: ApiError = BillingError::Stranded {
            billing_id,
            source: StoreError::Busy("lock timeout".into()),
        }
        .into();
        match api {
            ApiError::PaymentUnrecorded { billing_id } => assert_eq!(billing_id, "pay_abc"),
            other => panic!("expected PaymentUnrecorded, got {other:?}"),
        }
    }
}
