//! Error type for payment provider operations.

/// Errors that can occur while creating a charge at the provider.
///
/// None of these leave local state behind; a failed call means no purchase
/// record exists and the purchasing user gets an explicit failure.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Transport failure or timeout.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("payment provider returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for the logs.
        body: String,
    },

    /// The response payload is missing a required field. A successful status
    /// without a payment id or confirmation URL is a protocol violation.
    #[error("malformed provider response: missing {0}")]
    MalformedResponse(&'static str),

    /// The requested amount is not a positive number of currency units.
    #[error("invalid amount: {0}")]
    InvalidAmount(u64),
}
