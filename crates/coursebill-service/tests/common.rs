//! Common test utilities for coursebill integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coursebill_core::{BillingId, PurchaseRecord, PurchaseStatus};
use coursebill_gateway::{GatewayClient, GatewayConfig};
use coursebill_service::{create_router, AppState, ServiceConfig};
use coursebill_store::{MemoryPurchaseStore, PurchaseStore, StoreError};

pub const SERVICE_API_KEY: &str = "test-service-key";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Mocked payment provider.
    pub provider: MockServer,
    /// Handle on the store backing the service.
    pub store: Arc<MemoryPurchaseStore>,
}

impl TestHarness {
    /// Create a harness over an in-memory store and a mocked provider.
    pub async fn new() -> Self {
        let store = Arc::new(MemoryPurchaseStore::new());
        Self::with_store(Arc::clone(&store) as Arc<dyn PurchaseStore>, store).await
    }

    /// Create a harness with a custom store implementation (the memory
    /// handle is still returned for assertions where applicable).
    pub async fn with_store(
        store: Arc<dyn PurchaseStore>,
        memory: Arc<MemoryPurchaseStore>,
    ) -> Self {
        let provider = MockServer::start().await;

        let gateway =
            GatewayClient::new(GatewayConfig::new(provider.uri(), "shop-test", "sk-test"))
                .expect("gateway client should build");

        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            service_api_key: Some(SERVICE_API_KEY.to_string()),
            ..ServiceConfig::default()
        };

        let state = AppState::new(store, Arc::new(gateway), config);
        let router: Router = create_router(state);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            provider,
            store: memory,
        }
    }

    /// Mount a provider mock that accepts one charge with the given id.
    pub async fn mock_one_charge(&self, billing_id: &str) {
        Mock::given(method("POST"))
            .and(path("/v3/payments"))
            .respond_with(charge_response(billing_id))
            .up_to_n_times(1)
            .mount(&self.provider)
            .await;
    }

    /// Mount a provider mock that fails every charge with a 500.
    pub async fn mock_provider_failure(&self) {
        Mock::given(method("POST"))
            .and(path("/v3/payments"))
            .respond_with(ResponseTemplate::new(500).set_body_string("provider exploded"))
            .mount(&self.provider)
            .await;
    }

    /// Look up a purchase record in the backing store.
    pub async fn record(&self, billing_id: &str) -> Option<PurchaseRecord> {
        let billing_id: BillingId = billing_id.parse().unwrap();
        self.store.find_by_billing_id(&billing_id).await.unwrap()
    }

    /// Seed a pending purchase directly into the backing store.
    pub async fn seed_pending(&self, user_id: i64, course_id: i64, billing_id: &str) {
        let billing_id: BillingId = billing_id.parse().unwrap();
        self.store
            .add_purchase(user_id, course_id, &billing_id)
            .await
            .unwrap();
    }
}

/// A provider charge-created response.
pub fn charge_response(billing_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": billing_id,
        "status": "pending",
        "confirmation": {
            "type": "redirect",
            "confirmation_url": format!("https://provider.example/confirm/{billing_id}")
        }
    }))
}

/// A well-formed payment creation body.
pub fn create_payment_body() -> serde_json::Value {
    serde_json::json!({
        "return_url": "https://market.example/return",
        "user_id": 7,
        "course_id": 3,
        "course_title": "Go Basics",
        "amount": 1999
    })
}

/// A provider webhook body for the given billing id and status.
pub fn webhook_body(billing_id: &str, status: &str) -> String {
    serde_json::json!({
        "event": format!("payment.{status}"),
        "object": { "id": billing_id, "status": status }
    })
    .to_string()
}

/// A store whose inserts always fail, for exercising the path where the
/// provider accepted a charge that cannot be recorded locally.
pub struct InsertFailingStore {
    inner: MemoryPurchaseStore,
}

impl InsertFailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryPurchaseStore::new(),
        }
    }
}

impl Default for InsertFailingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PurchaseStore for InsertFailingStore {
    async fn add_purchase(
        &self,
        _user_id: i64,
        _course_id: i64,
        _billing_id: &BillingId,
    ) -> Result<i64, StoreError> {
        Err(StoreError::Busy("lock wait timeout".into()))
    }

    async fn mark_status(
        &self,
        billing_id: &BillingId,
        status: PurchaseStatus,
    ) -> Result<(), StoreError> {
        self.inner.mark_status(billing_id, status).await
    }

    async fn find_by_billing_id(
        &self,
        billing_id: &BillingId,
    ) -> Result<Option<PurchaseRecord>, StoreError> {
        self.inner.find_by_billing_id(billing_id).await
    }
}
