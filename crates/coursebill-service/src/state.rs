//! Application state.

use std::sync::Arc;

use coursebill_gateway::GatewayClient;
use coursebill_store::PurchaseStore;

use crate::billing::BillingFacade;
use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The billing facade.
    pub facade: BillingFacade,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(
        store: Arc<dyn PurchaseStore>,
        gateway: Arc<GatewayClient>,
        config: ServiceConfig,
    ) -> Self {
        if config.service_api_key.is_none() {
            tracing::warn!("SERVICE_API_KEY not configured - payment creation will be rejected");
        }

        Self {
            facade: BillingFacade::new(store, gateway),
            config,
        }
    }
}
