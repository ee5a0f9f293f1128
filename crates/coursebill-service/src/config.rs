//! Service configuration.

use serde::Deserialize;

use coursebill_gateway::GatewayConfig;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// PostgreSQL connection URL.
    pub database_url: String,

    /// Payment provider API base URL.
    pub provider_api_url: String,

    /// Payment provider shop id (Basic auth username).
    pub provider_shop_id: Option<String>,

    /// Payment provider secret key (Basic auth password).
    pub provider_secret_key: Option<String>,

    /// Charge currency (default: "RUB").
    pub provider_currency: String,

    /// API key the gateway service must present on payment creation.
    pub service_api_key: Option<String>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Candidate locations of the provider credentials file. The first entry
/// covers running from the workspace root, the second a member crate's
/// directory.
const PROVIDER_SECRET_PATHS: [&str; 2] = [".secrets/provider.json", "../.secrets/provider.json"];

/// Shop credentials as stored in the secrets file.
#[derive(Debug, Deserialize)]
struct ProviderSecrets {
    shop_id: String,
    secret_key: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let (provider_shop_id, provider_secret_key) = load_provider_secrets();

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/coursebill".into()),
            provider_api_url: std::env::var("PROVIDER_API_URL")
                .unwrap_or_else(|_| "https://api.yookassa.ru".into()),
            provider_shop_id,
            provider_secret_key,
            provider_currency: std::env::var("PROVIDER_CURRENCY").unwrap_or_else(|_| "RUB".into()),
            service_api_key: std::env::var("SERVICE_API_KEY").ok(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: std::env::var("MAX_BODY_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Build the provider client configuration, if credentials are present.
    #[must_use]
    pub fn gateway_config(&self) -> Option<GatewayConfig> {
        let shop_id = self.provider_shop_id.as_ref()?;
        let secret_key = self.provider_secret_key.as_ref()?;

        Some(
            GatewayConfig::new(&self.provider_api_url, shop_id, secret_key)
                .with_currency(&self.provider_currency),
        )
    }
}

/// Resolve the shop credentials: secrets file if one exists, environment
/// otherwise. A file that exists but does not parse is skipped with a
/// warning rather than treated as absent credentials silently.
fn load_provider_secrets() -> (Option<String>, Option<String>) {
    for path in PROVIDER_SECRET_PATHS {
        let Ok(contents) = std::fs::read_to_string(path) else {
            continue;
        };

        match serde_json::from_str::<ProviderSecrets>(&contents) {
            Ok(secrets) => {
                tracing::info!(path, "Provider credentials loaded from secrets file");
                return (Some(secrets.shop_id), Some(secrets.secret_key));
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "Provider secrets file did not parse, skipping");
            }
        }
    }

    (
        std::env::var("PROVIDER_SHOP_ID").ok(),
        std::env::var("PROVIDER_SECRET_KEY").ok(),
    )
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            database_url: "postgres://localhost/coursebill".into(),
            provider_api_url: "https://api.yookassa.ru".into(),
            provider_shop_id: None,
            provider_secret_key: None,
            provider_currency: "RUB".into(),
            service_api_key: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
