//! Payment provider configuration.

/// Configuration for the payment provider client.
///
/// Credentials are injected by the caller (environment or secrets file);
/// nothing here is ever a source-embedded constant.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the provider API, without a trailing slash.
    pub api_url: String,

    /// Shop identifier, the Basic auth username.
    pub shop_id: String,

    /// Shop secret key, the Basic auth password.
    pub secret_key: String,

    /// Charge currency (default: `"RUB"`).
    pub currency: String,
}

impl GatewayConfig {
    /// Create a configuration with the default currency.
    pub fn new(
        api_url: impl Into<String>,
        shop_id: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            shop_id: shop_id.into(),
            secret_key: secret_key.into(),
            currency: "RUB".to_string(),
        }
    }

    /// Set the charge currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}
