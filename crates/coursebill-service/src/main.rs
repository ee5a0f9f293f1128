//! Coursebill Service - HTTP API for course payment billing.
//!
//! This is the main entry point for the coursebill service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursebill_gateway::GatewayClient;
use coursebill_service::{create_router, AppState, ServiceConfig};
use coursebill_store::PgPurchaseStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,coursebill=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Coursebill Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        provider_api_url = %config.provider_api_url,
        provider_configured = %config.provider_shop_id.is_some(),
        "Service configuration loaded"
    );

    // Payment provider credentials are mandatory: without them the service
    // cannot perform its one job.
    let gateway_config = config
        .gateway_config()
        .ok_or("provider credentials not configured (PROVIDER_SHOP_ID / PROVIDER_SECRET_KEY)")?;
    let gateway = Arc::new(GatewayClient::new(gateway_config)?);

    // Connect to PostgreSQL and run migrations
    tracing::info!("Connecting to PostgreSQL");
    let store = Arc::new(PgPurchaseStore::connect(&config.database_url).await?);

    // Build app state
    let state = AppState::new(store, gateway, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
