//! Caller authentication.
//!
//! Payment creation has exactly one legitimate caller: the marketplace
//! gateway, which authenticates end users itself and vouches for the
//! `user_id` it forwards. The two services share a deployment-time API key;
//! anything that cannot present it is turned away. Webhooks do not pass
//! through here, the provider delivers them directly.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the shared service key.
const API_KEY_HEADER: &str = "x-api-key";

/// Optional header naming the calling service, for the logs.
const SERVICE_NAME_HEADER: &str = "x-service-name";

/// Proof that the caller presented the shared service key.
#[derive(Debug, Clone)]
pub struct ServiceAuth {
    /// Name the caller reported about itself, if any.
    pub service_name: Option<String>,
}

impl ServiceAuth {
    /// The caller's name for log lines.
    #[must_use]
    pub fn caller(&self) -> &str {
        self.service_name.as_deref().unwrap_or("unnamed service")
    }
}

impl FromRequestParts<Arc<AppState>> for ServiceAuth {
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        state: &'life1 Arc<AppState>,
    ) -> ::core::pin::Pin<
        Box<
            dyn ::core::future::Future<Output = Result<Self, Self::Rejection>>
                + ::core::marker::Send
                + 'async_trait,
        >,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            // Without a configured key the endpoint stays closed, not open.
            let Some(expected) = state.config.service_api_key.as_deref() else {
                return Err(ApiError::Unauthorized);
            };

            let presented = header_str(parts, API_KEY_HEADER);
            let service_name = header_str(parts, SERVICE_NAME_HEADER).map(str::to_owned);

            if presented != Some(expected) {
                tracing::warn!(
                    service = service_name.as_deref().unwrap_or("unnamed service"),
                    key_present = presented.is_some(),
                    "Rejected billing call without a valid service key"
                );
                return Err(ApiError::Unauthorized);
            }

            Ok(ServiceAuth { service_name })
        })
    }
}

fn header_str<'p>(parts: &'p Parts, name: &str) -> Option<&'p str> {
    parts.headers.get(name)?.to_str().ok()
}
