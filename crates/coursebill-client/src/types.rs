//! Request and response types for the coursebill API.

use serde::{Deserialize, Serialize};

/// Payment creation parameters.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePayment {
    /// Absolute URL the provider redirects the buyer to after payment.
    pub return_url: String,

    /// The authenticated buyer.
    pub user_id: i64,

    /// The course being purchased.
    pub course_id: i64,

    /// Course title for the charge description.
    pub course_title: String,

    /// Price in whole currency units.
    pub amount: u64,
}

/// A created payment awaiting buyer confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCreated {
    /// URL to send the buyer to.
    pub confirmation_url: String,

    /// Provider-issued charge identifier.
    pub billing_id: String,
}

/// Error response body from the API.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
}
