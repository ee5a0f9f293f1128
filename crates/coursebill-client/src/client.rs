//! Billing API client.

use reqwest::Client;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{ApiErrorResponse, CreatePayment, PaymentCreated};

/// Default bound on a billing API round trip.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the coursebill billing API.
///
/// Calls are authenticated with the shared service key; the optional
/// service name only labels the caller in billing's logs.
#[derive(Debug, Clone)]
pub struct BillingClient {
    http: Client,
    base_url: String,
    api_key: String,
    service_name: Option<String>,
}

impl BillingClient {
    /// Create a client with the default request timeout.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Where billing listens (e.g., `"http://coursebill:8080"`)
    /// * `api_key` - The shared service key
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed, which does not
    /// happen for timeout-only settings.
    #[must_use]
    pub fn with_timeout(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .expect("HTTP client with static settings"),
            base_url: base_url.into(),
            api_key: api_key.into(),
            service_name: None,
        }
    }

    /// Label this caller in billing's logs.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Create a payment, returning the confirmation URL to redirect the
    /// buyer to.
    ///
    /// # Errors
    ///
    /// `ClientError::Http` when billing is unreachable or times out,
    /// `ClientError::Api` for any non-success answer, carrying the error
    /// code and message from the response body.
    pub async fn create_payment(
        &self,
        request: CreatePayment,
    ) -> Result<PaymentCreated, ClientError> {
        let mut call = self
            .http
            .post(self.endpoint("v1/payments"))
            .header("x-api-key", &self.api_key)
            .json(&request);
        if let Some(name) = &self.service_name {
            call = call.header("x-service-name", name);
        }

        let response = call.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        // Billing answers errors with a structured body. When the body is
        // something else (a proxy page, truncation), keep the status and
        // mark the code unknown.
        Err(match response.json::<ApiErrorResponse>().await {
            Ok(body) => ClientError::Api {
                code: body.error.code,
                message: body.error.message,
                status: status.as_u16(),
            },
            Err(_) => ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            },
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}
