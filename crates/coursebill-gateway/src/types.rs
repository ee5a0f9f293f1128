//! Wire types for the provider's payments API.

use serde::{Deserialize, Serialize};

/// `POST /v3/payments` request body.
#[derive(Debug, Serialize)]
pub(crate) struct ChargeBody {
    pub amount: AmountBody,
    pub confirmation: ConfirmationBody,
    pub capture: bool,
    pub description: String,
}

/// Monetary amount, rendered as a decimal string on the wire.
#[derive(Debug, Serialize)]
pub(crate) struct AmountBody {
    pub value: String,
    pub currency: String,
}

/// Redirect confirmation parameters.
#[derive(Debug, Serialize)]
pub(crate) struct ConfirmationBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub return_url: String,
}

/// `POST /v3/payments` response body. Fields are optional on the wire so
/// their absence can be reported as a protocol violation rather than a
/// generic decode failure.
#[derive(Debug, Deserialize)]
pub(crate) struct ChargeResponse {
    pub id: Option<String>,
    pub confirmation: Option<ConfirmationResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmationResponse {
    pub confirmation_url: Option<String>,
}
