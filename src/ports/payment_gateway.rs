//! Payment gateway port for BACS mandate setup.
//!
//! Defines the contract for the external payment service (Stripe). The
//! service is treated as a black box: four typed operations, each a single
//! network round trip that may fail.
//!
//! # Design
//!
//! - **Gateway agnostic**: Interface works with any payment provider
//! - **Setup-focused**: Sessions collect a mandate, they never charge
//! - **No retries**: A failed attempt is surfaced to the caller immediately

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::billing::BillingError;

/// Stripe caps list pages at 100 objects.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// List one page of customers.
    ///
    /// When `email` is set the gateway filters by exact email server-side.
    async fn list_customers(
        &self,
        request: ListCustomersRequest,
    ) -> Result<Vec<Customer>, GatewayError>;

    /// Create a customer.
    ///
    /// Always creates a new record; existing customers with the same email
    /// are not looked up.
    async fn create_customer(&self, request: CreateCustomerRequest)
        -> Result<Customer, GatewayError>;

    /// Create a hosted session that collects a bank-debit mandate.
    ///
    /// Returns the URL the customer should be sent to.
    async fn create_setup_session(
        &self,
        request: CreateSetupSessionRequest,
    ) -> Result<SetupSession, GatewayError>;

    /// Create a billing portal session for an existing customer.
    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<SetupSession, GatewayError>;
}

/// Request to list customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCustomersRequest {
    /// Exact email filter applied by the gateway.
    pub email: Option<String>,

    /// Page size, clamped to [`MAX_PAGE_SIZE`].
    pub limit: u8,
}

impl ListCustomersRequest {
    pub fn new(email: Option<String>, limit: u8) -> Self {
        Self {
            email,
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// A full first page with no filter.
    pub fn first_page() -> Self {
        Self::new(None, MAX_PAGE_SIZE)
    }
}

/// Request to create a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
}

/// Customer in the payment system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Provider's customer ID.
    pub id: String,

    pub name: Option<String>,

    pub email: Option<String>,
}

/// Request to create a mandate setup session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSetupSessionRequest {
    /// Provider's customer ID.
    pub customer_id: String,

    /// URL to redirect after the mandate is set up.
    pub success_url: String,

    /// URL to redirect if the customer abandons setup.
    pub cancel_url: String,
}

/// Hosted session (setup or billing portal).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupSession {
    /// Provider's session ID.
    pub id: String,

    /// URL for the customer to open.
    pub url: String,
}

/// Errors from payment gateway operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    /// Error code for categorization.
    pub code: GatewayErrorCode,

    /// Human-readable message (the provider's own text when available).
    pub message: String,

    /// HTTP status returned by the provider, if it answered.
    pub status_hint: Option<u16>,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,
}

impl GatewayError {
    /// Create a new gateway error.
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status_hint: None,
            provider_code: None,
        }
    }

    /// Build an error from a non-success provider response.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let code = match status {
            401 | 403 => GatewayErrorCode::Authentication,
            404 => GatewayErrorCode::NotFound,
            429 => GatewayErrorCode::RateLimited,
            400..=499 => GatewayErrorCode::InvalidRequest,
            _ => GatewayErrorCode::Provider,
        };
        Self::new(code, message).with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status_hint = Some(status);
        self
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Network, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Timeout, message)
    }

    /// Create a not found error.
    pub fn not_found(resource: &str) -> Self {
        Self::new(GatewayErrorCode::NotFound, format!("{} not found", resource))
            .with_status(404)
    }

    /// True when the provider answered with a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_hint, Some(400..=499))
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

impl From<GatewayError> for BillingError {
    fn from(err: GatewayError) -> Self {
        if err.is_client_error() {
            BillingError::gateway_rejected(err.message)
        } else {
            BillingError::gateway_unavailable(err.message)
        }
    }
}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Network connectivity issue.
    Network,

    /// No response within the configured timeout.
    Timeout,

    /// API key rejected.
    Authentication,

    /// Provider rejected the parameters.
    InvalidRequest,

    /// Resource not found.
    NotFound,

    /// Rate limit exceeded.
    RateLimited,

    /// Provider failed internally or returned something unparseable.
    Provider,
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::Network => "network_error",
            GatewayErrorCode::Timeout => "timeout",
            GatewayErrorCode::Authentication => "authentication_error",
            GatewayErrorCode::InvalidRequest => "invalid_request",
            GatewayErrorCode::NotFound => "not_found",
            GatewayErrorCode::RateLimited => "rate_limited",
            GatewayErrorCode::Provider => "provider_error",
        };
        write!(f, "{}", s)
    }
}
