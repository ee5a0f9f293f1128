//! Webhook reconciliation API tests.

mod common;

use axum::http::StatusCode;

use coursebill_core::PurchaseStatus;

use common::{create_payment_body, webhook_body, TestHarness, SERVICE_API_KEY};

#[tokio::test]
async fn succeeded_webhook_confirms_pending_purchase() {
    let harness = TestHarness::new().await;
    harness.seed_pending(7, 3, "pay_abc").await;

    let response = harness
        .server
        .post("/webhooks/payments")
        .text(webhook_body("pay_abc", "succeeded"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["applied"], true);

    let record = harness.record("pay_abc").await.expect("record should exist");
    assert_eq!(record.status, PurchaseStatus::Success);
}

#[tokio::test]
async fn redelivered_webhook_is_idempotent() {
    let harness = TestHarness::new().await;
    harness.seed_pending(7, 3, "pay_abc").await;

    for _ in 0..2 {
        let response = harness
            .server
            .post("/webhooks/payments")
            .text(webhook_body("pay_abc", "succeeded"))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["applied"], true);
    }

    let record = harness.record("pay_abc").await.expect("record should exist");
    assert_eq!(record.status, PurchaseStatus::Success);
    assert_eq!(harness.store.len().await, 1);
}

#[tokio::test]
async fn non_success_status_never_mutates_record() {
    let harness = TestHarness::new().await;
    harness.seed_pending(7, 3, "pay_abc").await;

    let response = harness
        .server
        .post("/webhooks/payments")
        .text(webhook_body("pay_abc", "canceled"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["applied"], false);

    let record = harness.record("pay_abc").await.expect("record should exist");
    assert_eq!(record.status, PurchaseStatus::Pending);
}

#[tokio::test]
async fn unknown_billing_id_asks_for_redelivery() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/webhooks/payments")
        .text(webhook_body("pay_ghost", "succeeded"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn malformed_payload_is_rejected() {
    let harness = TestHarness::new().await;
    harness.seed_pending(7, 3, "pay_abc").await;

    for body in [
        "not json",
        r#"{"object":{"id":"pay_abc","status":"succeeded"}}"#,
        r#"{"event":"payment.succeeded","object":{"status":"succeeded"}}"#,
    ] {
        let response = harness
            .server
            .post("/webhooks/payments")
            .text(body.to_string())
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    // Nothing was persisted on any of the rejected deliveries.
    let record = harness.record("pay_abc").await.expect("record should exist");
    assert_eq!(record.status, PurchaseStatus::Pending);
}

/// The full lifecycle: create a payment, receive the provider confirmation,
/// tolerate its redelivery.
#[tokio::test]
async fn full_purchase_lifecycle() {
    let harness = TestHarness::new().await;
    harness.mock_one_charge("pay_abc").await;

    // Create the payment.
    let response = harness
        .server
        .post("/v1/payments")
        .add_header("x-api-key", SERVICE_API_KEY)
        .json(&create_payment_body())
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(
        body["confirmation_url"],
        "https://provider.example/confirm/pay_abc"
    );

    let record = harness.record("pay_abc").await.expect("record should exist");
    assert_eq!(record.status, PurchaseStatus::Pending);

    // Provider confirms.
    harness
        .server
        .post("/webhooks/payments")
        .text(webhook_body("pay_abc", "succeeded"))
        .await
        .assert_status_ok();

    let record = harness.record("pay_abc").await.expect("record should exist");
    assert_eq!(record.status, PurchaseStatus::Success);
    let confirmed_at = record.updated_at;

    // Provider redelivers; nothing changes.
    harness
        .server
        .post("/webhooks/payments")
        .text(webhook_body("pay_abc", "succeeded"))
        .await
        .assert_status_ok();

    let record = harness.record("pay_abc").await.expect("record should exist");
    assert_eq!(record.status, PurchaseStatus::Success);
    assert!(record.updated_at >= confirmed_at);
}
