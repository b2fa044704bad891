//! Axum router configuration for the BACS setup endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    admin_page, create_checkout_session, create_directdebit_session, create_portal_session,
    health, search_customers, BillingAppState,
};

/// Create the billing router.
///
/// # Routes
///
/// ## Admin Endpoints (behind the Basic auth gate by default)
/// - `GET /admin` - Redirect to the admin page
/// - `GET /search-customer`, `GET /search-customers` - Customer search
/// - `GET /create-directdebit-session` - Setup session for an existing customer
///
/// ## Public Endpoints
/// - `GET /` - Liveness check
/// - `POST /create-checkout-session` - Customer sign-up
/// - `GET /create-portal-session` - Billing portal redirect
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/", get(health))
        // Admin endpoints
        .route("/admin", get(admin_page))
        .route("/search-customer", get(search_customers))
        .route("/search-customers", get(search_customers))
        .route("/create-directdebit-session", get(create_directdebit_session))
        // Public endpoints
        .route("/create-checkout-session", post(create_checkout_session))
        .route("/create-portal-session", get(create_portal_session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::stripe::MockPaymentGateway;
    use crate::application::handlers::billing::BillingUrls;
    use crate::ports::{Customer, GatewayError};

    fn app(mock: &MockPaymentGateway) -> Router {
        let state = BillingAppState::new(
            Arc::new(mock.clone()),
            BillingUrls::new("https://dd.example.com"),
        );
        billing_routes().with_state(state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn search_alias_routes_are_equivalent() {
        let mock = MockPaymentGateway::with_customers(vec![Customer {
            id: "c1".into(),
            name: Some("Jane Doe".into()),
            email: Some("jane@x.com".into()),
        }]);

        for path in ["/search-customer?q=jane", "/search-customers?q=jane"] {
            let response = app(&mock).oneshot(get_request(path)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(json_body(response).await[0]["id"], "c1");
        }
    }

    #[tokio::test]
    async fn search_without_query_is_bad_request() {
        let mock = MockPaymentGateway::new();

        let response = app(&mock).oneshot(get_request("/search-customer")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "Missing search query");
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn directdebit_returns_url_json() {
        let mock = MockPaymentGateway::new();

        let response = app(&mock)
            .oneshot(get_request("/create-directdebit-session?customer_id=cus_1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let url = json_body(response).await["url"].as_str().unwrap().to_string();
        assert!(url.starts_with("https://checkout.stripe.com/"));
    }

    #[tokio::test]
    async fn directdebit_gateway_rejection_is_bad_request() {
        let mock = MockPaymentGateway::new();
        mock.set_error(GatewayError::from_status(400, "No such customer: 'cus_x'"));

        let response = app(&mock)
            .oneshot(get_request("/create-directdebit-session?customer_id=cus_x"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "No such customer: 'cus_x'");
    }

    #[tokio::test]
    async fn checkout_accepts_json_body() {
        let mock = MockPaymentGateway::new();
        let request = Request::builder()
            .method("POST")
            .uri("/create-checkout-session")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Jane Doe","email":"jane@x.com"}"#))
            .unwrap();

        let response = app(&mock).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(mock.calls()[0].args, vec!["Jane Doe", "jane@x.com"]);
    }

    #[tokio::test]
    async fn checkout_accepts_query_params() {
        let mock = MockPaymentGateway::new();
        let request = Request::builder()
            .method("POST")
            .uri("/create-checkout-session?name=Jane&email=jane%40x.com")
            .body(Body::empty())
            .unwrap();

        let response = app(&mock).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(mock.calls()[0].args, vec!["Jane", "jane@x.com"]);
    }

    #[tokio::test]
    async fn checkout_accepts_form_body() {
        let mock = MockPaymentGateway::new();
        let request = Request::builder()
            .method("POST")
            .uri("/create-checkout-session")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("name=Jane+Doe&email=jane%40x.com"))
            .unwrap();

        let response = app(&mock).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(mock.calls()[0].args, vec!["Jane Doe", "jane@x.com"]);
    }

    #[tokio::test]
    async fn checkout_rejects_malformed_json() {
        let mock = MockPaymentGateway::new();
        let request = Request::builder()
            .method("POST")
            .uri("/create-checkout-session?name=Jane&email=jane%40x.com")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app(&mock).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "VALIDATION_FAILED");
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn portal_redirects() {
        let mock = MockPaymentGateway::new();

        let response = app(&mock)
            .oneshot(get_request("/create-portal-session?customer_id=cus_1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get(header::LOCATION).unwrap();
        assert!(location.to_str().unwrap().starts_with("https://billing.stripe.com/"));
    }

    #[tokio::test]
    async fn admin_redirects_to_page() {
        let mock = MockPaymentGateway::new();

        let response = app(&mock).oneshot(get_request("/admin")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/admin.html");
    }
}
