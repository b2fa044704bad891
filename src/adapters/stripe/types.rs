//! Stripe API wire types.
//!
//! Only the fields this service reads are modelled; Stripe ignores nothing
//! we send and we ignore everything else it returns.

use serde::{Deserialize, Serialize};

/// Stripe list envelope (`{"object": "list", "data": [...]}`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeList<T> {
    pub data: Vec<T>,

    /// Whether more pages exist beyond this one.
    #[serde(default)]
    pub has_more: bool,
}

/// Stripe Customer object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCustomer {
    /// Unique customer identifier (cus_...).
    pub id: String,

    /// Customer email address.
    pub email: Option<String>,

    /// Customer name.
    pub name: Option<String>,

    /// Whether the customer has been deleted.
    #[serde(default)]
    pub deleted: bool,
}

/// Stripe Checkout Session object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeCheckoutSession {
    /// Unique session identifier (cs_...).
    pub id: String,

    /// Hosted page URL. Absent once the session is complete or expired.
    pub url: Option<String>,

    /// Session mode (payment, setup, subscription).
    pub mode: Option<String>,

    /// Customer ID the session is scoped to.
    pub customer: Option<String>,
}

/// Stripe Billing Portal Session object.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripePortalSession {
    /// Unique session identifier (bps_...).
    pub id: String,

    pub url: String,
}

/// Stripe error envelope (`{"error": {...}}`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorResponse {
    pub error: StripeErrorBody,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StripeErrorBody {
    /// Error category (invalid_request_error, api_error, ...).
    #[serde(rename = "type")]
    pub error_type: Option<String>,

    /// Machine-readable code (resource_missing, ...).
    pub code: Option<String>,

    pub message: Option<String>,

    /// Parameter the error relates to.
    pub param: Option<String>,
}
