//! End-to-end tests for the subscription HTTP surface.
//!
//! Each test drives the full router (middleware included) with signed webhook
//! deliveries and status queries, backed by the in-memory or file store and the
//! mock payment provider.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use surf_gate::adapters::http::{app_router, apply_middleware, SubscriptionAppState};
use surf_gate::adapters::store::{FileSubscriptionStore, InMemorySubscriptionStore};
use surf_gate::adapters::stripe::MockPaymentProvider;
use surf_gate::application::handlers::subscription::CheckoutSettings;
use surf_gate::config::ServerConfig;
use surf_gate::domain::webhook::{sign_payload, StripeWebhookVerifier};
use surf_gate::ports::{CheckoutSessionDetails, Customer, SubscriptionStore};

const SECRET: &str = "whsec_integration";

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    app: Router,
    provider: MockPaymentProvider,
}

fn harness_with(store: Arc<dyn SubscriptionStore>, require_livemode: bool) -> Harness {
    let provider = MockPaymentProvider::new();
    let state = SubscriptionAppState {
        store,
        payment_provider: Arc::new(provider.clone()),
        webhook_verifier: Arc::new(
            StripeWebhookVerifier::new(SecretString::new(SECRET.to_string()))
                .with_require_livemode(require_livemode),
        ),
        checkout: CheckoutSettings::new("price_surf_monthly", "https://surf.example/"),
    };
    Harness {
        app: apply_middleware(app_router(state), &ServerConfig::default()),
        provider,
    }
}

fn harness() -> Harness {
    harness_with(Arc::new(InMemorySubscriptionStore::new()), false)
}

impl Harness {
    async fn call(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn deliver(&self, event: &Value) -> (StatusCode, String) {
        let body = event.to_string();
        let signature = sign_payload(SECRET, chrono::Utc::now().timestamp(), body.as_bytes());
        self.deliver_raw(body, signature).await
    }

    async fn deliver_raw(&self, body: String, signature: String) -> (StatusCode, String) {
        self.call(
            Request::builder()
                .method("POST")
                .uri("/api/webhooks/stripe")
                .header("content-type", "application/json")
                .header("stripe-signature", signature)
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    async fn status(&self, query: &str) -> (StatusCode, Value) {
        let (status, body) = self
            .call(
                Request::builder()
                    .uri(format!("/api/subscription/status{}", query))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        (status, serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }

    async fn status_of(&self, email: &str) -> Value {
        let (status, body) = self.status(&format!("?email={}", email.replace('@', "%40"))).await;
        assert_eq!(status, StatusCode::OK);
        body
    }
}

fn checkout_completed(email: &str) -> Value {
    json!({
        "id": "evt_checkout",
        "type": "checkout.session.completed",
        "created": chrono::Utc::now().timestamp(),
        "livemode": false,
        "data": { "object": {
            "id": "cs_test_1",
            "object": "checkout.session",
            "customer_details": { "email": email }
        } }
    })
}

fn subscription_event(event_type: &str, status: &str, customer: &str) -> Value {
    json!({
        "id": "evt_sub",
        "type": event_type,
        "livemode": false,
        "data": { "object": {
            "id": "sub_1",
            "object": "subscription",
            "status": status,
            "customer": customer
        } }
    })
}

fn rider(harness: &Harness) {
    harness.provider.add_customer(Customer {
        id: "cus_rider".to_string(),
        email: Some("Rider@Example.com".to_string()),
    });
}

// =============================================================================
// Ingestion and lookup
// =============================================================================

#[tokio::test]
async fn unseen_email_is_inactive() {
    let h = harness();

    assert_eq!(h.status_of("nobody@example.com").await, json!({ "active": false }));
}

#[tokio::test]
async fn checkout_completion_activates_case_insensitively() {
    let h = harness();

    let (status, body) = h.deliver(&checkout_completed("a@b.com")).await;
    assert_eq!((status, body.as_str()), (StatusCode::OK, "ok"));

    let record = h.status_of("A@B.COM").await;
    assert_eq!(record["active"], json!(true));
    assert_eq!(record["email"], json!("a@b.com"));
    assert!(record["updatedAt"].is_i64());
}

#[tokio::test]
async fn past_due_update_deactivates_with_status() {
    let h = harness();
    rider(&h);

    h.deliver(&checkout_completed("rider@example.com")).await;
    let (status, _) = h
        .deliver(&subscription_event(
            "customer.subscription.updated",
            "past_due",
            "cus_rider",
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    let record = h.status_of("rider@example.com").await;
    assert_eq!(record["active"], json!(false));
    assert_eq!(record["status"], json!("past_due"));
}

#[tokio::test]
async fn trialing_subscription_grants_access() {
    let h = harness();
    rider(&h);

    h.deliver(&subscription_event(
        "customer.subscription.created",
        "trialing",
        "cus_rider",
    ))
    .await;

    let record = h.status_of("rider@example.com").await;
    assert_eq!(record["active"], json!(true));
    assert_eq!(record["status"], json!("trialing"));
}

#[tokio::test]
async fn deletion_deactivates_with_later_timestamp() {
    let h = harness();
    rider(&h);

    h.deliver(&subscription_event(
        "customer.subscription.created",
        "active",
        "cus_rider",
    ))
    .await;
    let before = h.status_of("rider@example.com").await;

    tokio::time::sleep(Duration::from_millis(5)).await;
    h.deliver(&subscription_event(
        "customer.subscription.deleted",
        "canceled",
        "cus_rider",
    ))
    .await;
    let after = h.status_of("rider@example.com").await;

    assert_eq!(after["active"], json!(false));
    assert_eq!(after["status"], json!("deleted"));
    assert!(after["updatedAt"].as_i64().unwrap() > before["updatedAt"].as_i64().unwrap());
}

#[tokio::test]
async fn replayed_event_converges_to_same_record() {
    let h = harness();
    rider(&h);
    let event = subscription_event("customer.subscription.updated", "unpaid", "cus_rider");

    h.deliver(&event).await;
    let first = h.status_of("rider@example.com").await;
    h.deliver(&event).await;
    let second = h.status_of("rider@example.com").await;

    assert_eq!(first["active"], second["active"]);
    assert_eq!(first["status"], second["status"]);
    assert_eq!(first["email"], second["email"]);
}

#[tokio::test]
async fn customer_without_email_is_acknowledged_without_write() {
    let h = harness();
    h.provider.add_customer(Customer {
        id: "cus_anon".to_string(),
        email: None,
    });

    let (status, body) = h
        .deliver(&subscription_event(
            "customer.subscription.updated",
            "active",
            "cus_anon",
        ))
        .await;

    assert_eq!((status, body.as_str()), (StatusCode::OK, "ok"));
}

#[tokio::test]
async fn unknown_customer_is_retried_via_server_error() {
    let h = harness();
    h.deliver(&checkout_completed("rider@example.com")).await;
    let before = h.status_of("rider@example.com").await;

    let (status, body) = h
        .deliver(&subscription_event(
            "customer.subscription.updated",
            "canceled",
            "cus_missing",
        ))
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Customer not found");
    assert_eq!(h.status_of("rider@example.com").await, before);
}

// =============================================================================
// Trust boundary
// =============================================================================

#[tokio::test]
async fn forged_signature_leaves_existing_record_unchanged() {
    let h = harness();
    h.deliver(&checkout_completed("a@b.com")).await;
    let before = h.status_of("a@b.com").await;

    let body = subscription_event("customer.subscription.deleted", "canceled", "cus_x").to_string();
    let forged = sign_payload("whsec_attacker", chrono::Utc::now().timestamp(), body.as_bytes());
    let (status, text) = h.deliver_raw(body, forged).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(text.starts_with("Webhook Error: "));
    assert_eq!(h.status_of("a@b.com").await, before);
    assert_eq!(h.provider.call_count("retrieve_customer"), 0);
}

#[tokio::test]
async fn stale_signature_is_rejected() {
    let h = harness();
    let body = checkout_completed("a@b.com").to_string();
    let stale = sign_payload(SECRET, chrono::Utc::now().timestamp() - 600, body.as_bytes());

    let (status, _) = h.deliver_raw(body, stale).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.status_of("a@b.com").await, json!({ "active": false }));
}

#[tokio::test]
async fn livemode_required_rejects_test_events() {
    let h = harness_with(Arc::new(InMemorySubscriptionStore::new()), true);

    let (status, body) = h.deliver(&checkout_completed("a@b.com")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Webhook Error: Test mode event rejected");
}

#[tokio::test]
async fn webhook_rejects_non_post() {
    let h = harness();

    let (status, _) = h
        .call(
            Request::builder()
                .uri("/api/webhooks/stripe")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn status_without_email_is_bad_request() {
    let h = harness();

    let (status, body) = h.status("").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, Value::String("Missing email".to_string()));
}

#[tokio::test]
async fn verify_session_after_checkout_reports_active() {
    let h = harness();
    h.provider.add_checkout_session(CheckoutSessionDetails {
        id: "cs_test_1".to_string(),
        customer_details_email: Some("A@B.com".to_string()),
        ..Default::default()
    });
    h.deliver(&checkout_completed("a@b.com")).await;

    let (status, body) = h
        .call(
            Request::builder()
                .uri("/api/subscription/verify-session?session_id=cs_test_1")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "active": true, "email": "a@b.com" })
    );
}

#[tokio::test]
async fn verify_session_without_resolvable_email_is_null() {
    let h = harness();
    h.provider.add_checkout_session(CheckoutSessionDetails {
        id: "cs_anon".to_string(),
        ..Default::default()
    });

    let (status, body) = h
        .call(
            Request::builder()
                .uri("/api/subscription/verify-session?session_id=cs_anon")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "active": false, "email": null })
    );
}

#[tokio::test]
async fn checkout_session_redirects_back_to_app() {
    let h = harness();

    let (status, body) = h
        .call(
            Request::builder()
                .method("POST")
                .uri("/api/checkout/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(serde_json::from_str::<Value>(&body).unwrap()["url"].is_string());
    let calls = h.provider.calls();
    let create = calls
        .iter()
        .find(|c| c.method == "create_checkout_session")
        .unwrap();
    assert_eq!(
        create.args,
        vec![
            "price_surf_monthly".to_string(),
            "https://surf.example/?session_id={CHECKOUT_SESSION_ID}".to_string(),
            "https://surf.example/".to_string(),
        ]
    );
}

#[tokio::test]
async fn responses_carry_request_id() {
    let h = harness();

    let response = h
        .app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

// =============================================================================
// File-backed store
// =============================================================================

#[tokio::test]
async fn file_store_survives_a_new_router() {
    let dir = tempfile::tempdir().unwrap();

    let first = harness_with(Arc::new(FileSubscriptionStore::new(dir.path())), false);
    first.deliver(&checkout_completed("a@b.com")).await;

    let second = harness_with(Arc::new(FileSubscriptionStore::new(dir.path())), false);
    let record = second.status_of("a@b.com").await;

    assert_eq!(record["active"], json!(true));
}
