//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait for the Stripe REST API.
//! Requests authenticate with the secret key as the HTTP basic username and
//! send form-encoded bodies, as Stripe expects.
//!
//! # Configuration
//!
//! ```ignore
//! let config = StripeConfig::new(secret_key).with_timeout(Duration::from_secs(10));
//! let gateway = StripePaymentGateway::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::config::PaymentConfig;
use crate::ports::{
    CreateCustomerRequest, CreateSetupSessionRequest, Customer, GatewayError, GatewayErrorCode,
    ListCustomersRequest, PaymentGateway, SetupSession,
};

use super::types::{
    StripeCheckoutSession, StripeCustomer, StripeErrorResponse, StripeList, StripePortalSession,
};

/// Payment method collected by setup sessions.
const BACS_DEBIT: &str = "bacs_debit";

/// Stripe API configuration.
#[derive(Clone)]
pub struct StripeConfig {
    /// Stripe secret API key (sk_live_... or sk_test_...).
    secret_key: SecretString,

    /// Base URL for Stripe API (default: https://api.stripe.com).
    api_base_url: String,

    /// Upper bound for a single API call.
    timeout: Duration,
}

impl StripeConfig {
    /// Create a new Stripe configuration.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: SecretString::new(secret_key.into()),
            api_base_url: "https://api.stripe.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build from the loaded application configuration.
    pub fn from_payment_config(config: &PaymentConfig) -> Self {
        Self {
            secret_key: config.stripe_secret_key.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

/// Stripe payment gateway adapter.
pub struct StripePaymentGateway {
    config: StripeConfig,
    http_client: reqwest::Client,
}

impl StripePaymentGateway {
    /// Create a new Stripe adapter with the given configuration.
    pub fn new(config: StripeConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::new(
                    GatewayErrorCode::Provider,
                    format!("Failed to build HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    /// Send an authenticated request and decode a successful response.
    async fn send<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .send()
            .await
            .map_err(|e| {
                let err = transport_error(&e);
                tracing::error!(operation, error = %err, "Stripe request did not complete");
                err
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = parse_error_response(status.as_u16(), &body);
            tracing::error!(
                operation,
                status = status.as_u16(),
                provider_code = err.provider_code.as_deref().unwrap_or("-"),
                error = %err.message,
                "Stripe {} failed",
                operation
            );
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            GatewayError::new(
                GatewayErrorCode::Provider,
                format!("Failed to parse Stripe response: {}", e),
            )
        })
    }
}

/// Query parameters for `GET /v1/customers`.
pub(crate) fn list_customers_params(request: &ListCustomersRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![("limit", request.limit.to_string())];
    if let Some(email) = &request.email {
        params.push(("email", email.clone()));
    }
    params
}

/// Form body for `POST /v1/checkout/sessions` in setup mode.
pub(crate) fn setup_session_params(
    request: &CreateSetupSessionRequest,
) -> Vec<(&'static str, String)> {
    vec![
        ("mode", "setup".to_string()),
        ("payment_method_types[0]", BACS_DEBIT.to_string()),
        ("customer", request.customer_id.clone()),
        ("success_url", request.success_url.clone()),
        ("cancel_url", request.cancel_url.clone()),
    ]
}

/// Map a reqwest failure that produced no HTTP response.
fn transport_error(err: &reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::timeout(format!("Stripe request timed out: {}", err))
    } else {
        GatewayError::network(err.to_string())
    }
}

/// Turn a non-success Stripe response into a `GatewayError`.
///
/// Uses Stripe's own message when the body is a standard error envelope.
pub(crate) fn parse_error_response(status: u16, body: &str) -> GatewayError {
    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(envelope) => {
            let message = envelope
                .error
                .message
                .unwrap_or_else(|| format!("Stripe API error (HTTP {})", status));
            let err = GatewayError::from_status(status, message);
            match envelope.error.code.or(envelope.error.error_type) {
                Some(code) => err.with_provider_code(code),
                None => err,
            }
        }
        Err(_) => GatewayError::from_status(status, format!("Stripe API error: {}", body)),
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    async fn list_customers(
        &self,
        request: ListCustomersRequest,
    ) -> Result<Vec<Customer>, GatewayError> {
        let params = list_customers_params(&request);
        let list: StripeList<StripeCustomer> = self
            .send(
                "list_customers",
                self.http_client.get(self.url("/v1/customers")).query(&params),
            )
            .await?;

        if list.has_more {
            tracing::debug!(
                limit = request.limit,
                "Customer list truncated to first page"
            );
        }

        Ok(list
            .data
            .into_iter()
            .filter(|c| !c.deleted)
            .map(|c| Customer {
                id: c.id,
                name: c.name,
                email: c.email,
            })
            .collect())
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, GatewayError> {
        let params = [("name", request.name.as_str()), ("email", request.email.as_str())];

        let customer: StripeCustomer = self
            .send(
                "create_customer",
                self.http_client.post(self.url("/v1/customers")).form(&params),
            )
            .await?;

        Ok(Customer {
            id: customer.id,
            name: customer.name.or(Some(request.name)),
            email: customer.email.or(Some(request.email)),
        })
    }

    async fn create_setup_session(
        &self,
        request: CreateSetupSessionRequest,
    ) -> Result<SetupSession, GatewayError> {
        let params = setup_session_params(&request);

        let session: StripeCheckoutSession = self
            .send(
                "create_setup_session",
                self.http_client
                    .post(self.url("/v1/checkout/sessions"))
                    .form(&params),
            )
            .await?;

        let url = session.url.ok_or_else(|| {
            GatewayError::new(
                GatewayErrorCode::Provider,
                format!("Stripe session {} has no URL", session.id),
            )
        })?;

        Ok(SetupSession {
            id: session.id,
            url,
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<SetupSession, GatewayError> {
        let params = [("customer", customer_id), ("return_url", return_url)];

        let session: StripePortalSession = self
            .send(
                "create_portal_session",
                self.http_client
                    .post(self.url("/v1/billing_portal/sessions"))
                    .form(&params),
            )
            .await?;

        Ok(SetupSession {
            id: session.id,
            url: session.url,
        })
    }
}
