//! Integration tests for the Stripe adapter.
//!
//! A fake Stripe API runs on 127.0.0.1 with an ephemeral port. The tests
//! check what the adapter sends (auth, form fields, query) and how it maps
//! responses, including Stripe error envelopes and timeouts.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Form, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::json;

use bacs_setup::adapters::stripe::{StripeConfig, StripePaymentGateway};
use bacs_setup::ports::{
    CreateCustomerRequest, CreateSetupSessionRequest, GatewayErrorCode, ListCustomersRequest,
    PaymentGateway,
};

// =============================================================================
// Fake Stripe
// =============================================================================

const SECRET_KEY: &str = "sk_test_fake";

#[derive(Debug, Clone)]
struct Recorded {
    path: &'static str,
    authorization: Option<String>,
    params: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct FakeStripe {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeStripe {
    fn record(&self, path: &'static str, headers: &HeaderMap, params: HashMap<String, String>) {
        self.requests.lock().unwrap().push(Recorded {
            path,
            authorization: headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            params,
        });
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn list_customers(
    State(fake): State<FakeStripe>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.record("/v1/customers", &headers, params);
    Json(json!({
        "object": "list",
        "has_more": false,
        "data": [
            {"id": "cus_1", "object": "customer", "name": "Jane Doe", "email": "jane@x.com"},
            {"id": "cus_2", "object": "customer", "name": null, "email": null},
            {"id": "cus_3", "object": "customer", "deleted": true}
        ]
    }))
}

async fn create_customer(
    State(fake): State<FakeStripe>,
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.record("/v1/customers", &headers, params.clone());
    Json(json!({
        "id": "cus_new",
        "object": "customer",
        "name": params.get("name"),
        "email": params.get("email")
    }))
}

async fn create_checkout_session(
    State(fake): State<FakeStripe>,
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> axum::response::Response {
    fake.record("/v1/checkout/sessions", &headers, params.clone());

    match params.get("customer").map(String::as_str) {
        Some("cus_missing") => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": {
                    "code": "resource_missing",
                    "message": "No such customer: 'cus_missing'",
                    "param": "customer",
                    "type": "invalid_request_error"
                }
            })),
        )
            .into_response(),
        Some("cus_slow") => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            StatusCode::OK.into_response()
        }
        Some("cus_broken") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        _ => Json(json!({
            "id": "cs_test_1",
            "object": "checkout.session",
            "mode": "setup",
            "customer": params.get("customer"),
            "url": "https://checkout.stripe.com/c/pay/cs_test_1"
        }))
        .into_response(),
    }
}

async fn create_portal_session(
    State(fake): State<FakeStripe>,
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    fake.record("/v1/billing_portal/sessions", &headers, params);
    Json(json!({
        "id": "bps_1",
        "object": "billing_portal.session",
        "url": "https://billing.stripe.com/p/session/bps_1"
    }))
}

async fn spawn_fake_stripe() -> (FakeStripe, SocketAddr) {
    let fake = FakeStripe::default();
    let app = Router::new()
        .route("/v1/customers", get(list_customers).post(create_customer))
        .route("/v1/checkout/sessions", post(create_checkout_session))
        .route("/v1/billing_portal/sessions", post(create_portal_session))
        .with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (fake, addr)
}

fn gateway(addr: SocketAddr) -> StripePaymentGateway {
    StripePaymentGateway::new(
        StripeConfig::new(SECRET_KEY)
            .with_base_url(format!("http://{}", addr))
            .with_timeout(Duration::from_millis(500)),
    )
    .unwrap()
}

fn setup_request(customer_id: &str) -> CreateSetupSessionRequest {
    CreateSetupSessionRequest {
        customer_id: customer_id.to_string(),
        success_url: "https://dd.example.com/success.html".to_string(),
        cancel_url: "https://dd.example.com/cancel.html".to_string(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn requests_authenticate_with_secret_key() {
    let (fake, addr) = spawn_fake_stripe().await;

    gateway(addr)
        .list_customers(ListCustomersRequest::first_page())
        .await
        .unwrap();

    let expected = format!("Basic {}", STANDARD.encode(format!("{}:", SECRET_KEY)));
    assert_eq!(fake.requests()[0].authorization.as_deref(), Some(expected.as_str()));
}

#[tokio::test]
async fn list_customers_sends_limit_and_email() {
    let (fake, addr) = spawn_fake_stripe().await;

    let customers = gateway(addr)
        .list_customers(ListCustomersRequest::new(Some("jane@x.com".into()), 100))
        .await
        .unwrap();

    let params = &fake.requests()[0].params;
    assert_eq!(params.get("limit").map(String::as_str), Some("100"));
    assert_eq!(params.get("email").map(String::as_str), Some("jane@x.com"));

    // Deleted customers are dropped
    let ids: Vec<_> = customers.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["cus_1", "cus_2"]);
    assert!(customers[1].name.is_none());
}

#[tokio::test]
async fn create_customer_sends_name_and_email() {
    let (fake, addr) = spawn_fake_stripe().await;

    let customer = gateway(addr)
        .create_customer(CreateCustomerRequest {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
        })
        .await
        .unwrap();

    assert_eq!(customer.id, "cus_new");
    let params = &fake.requests()[0].params;
    assert_eq!(params.get("name").map(String::as_str), Some("Jane Doe"));
    assert_eq!(params.get("email").map(String::as_str), Some("jane@x.com"));
}

#[tokio::test]
async fn setup_session_requests_bacs_debit_in_setup_mode() {
    let (fake, addr) = spawn_fake_stripe().await;

    let session = gateway(addr)
        .create_setup_session(setup_request("cus_1"))
        .await
        .unwrap();

    assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_1");

    let recorded = &fake.requests()[0];
    assert_eq!(recorded.path, "/v1/checkout/sessions");
    let p = |k: &str| recorded.params.get(k).map(String::as_str);
    assert_eq!(p("mode"), Some("setup"));
    assert_eq!(p("payment_method_types[0]"), Some("bacs_debit"));
    assert_eq!(p("customer"), Some("cus_1"));
    assert_eq!(p("success_url"), Some("https://dd.example.com/success.html"));
    assert_eq!(p("cancel_url"), Some("https://dd.example.com/cancel.html"));
}

#[tokio::test]
async fn stripe_error_envelope_becomes_client_error() {
    let (_fake, addr) = spawn_fake_stripe().await;

    let err = gateway(addr)
        .create_setup_session(setup_request("cus_missing"))
        .await
        .unwrap_err();

    assert_eq!(err.message, "No such customer: 'cus_missing'");
    assert_eq!(err.status_hint, Some(400));
    assert_eq!(err.provider_code.as_deref(), Some("resource_missing"));
    assert!(err.is_client_error());
}

#[tokio::test]
async fn server_error_is_not_a_client_error() {
    let (_fake, addr) = spawn_fake_stripe().await;

    let err = gateway(addr)
        .create_setup_session(setup_request("cus_broken"))
        .await
        .unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::Provider);
    assert_eq!(err.status_hint, Some(500));
    assert!(!err.is_client_error());
}

#[tokio::test]
async fn slow_response_times_out() {
    let (_fake, addr) = spawn_fake_stripe().await;

    let err = gateway(addr)
        .create_setup_session(setup_request("cus_slow"))
        .await
        .unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::Timeout);
}

#[tokio::test]
async fn unreachable_host_is_network_error() {
    // Bind then drop to get a port with nothing listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = gateway(addr)
        .list_customers(ListCustomersRequest::first_page())
        .await
        .unwrap_err();

    assert_eq!(err.code, GatewayErrorCode::Network);
}

#[tokio::test]
async fn portal_session_sends_return_url() {
    let (fake, addr) = spawn_fake_stripe().await;

    let session = gateway(addr)
        .create_portal_session("cus_1", "https://dd.example.com/")
        .await
        .unwrap();

    assert_eq!(session.id, "bps_1");
    let params = &fake.requests()[0].params;
    assert_eq!(params.get("customer").map(String::as_str), Some("cus_1"));
    assert_eq!(
        params.get("return_url").map(String::as_str),
        Some("https://dd.example.com/")
    );
}
