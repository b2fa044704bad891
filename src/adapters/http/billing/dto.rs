//! HTTP DTOs for the BACS setup endpoints.
//!
//! Query parameters and JSON bodies exchanged with the admin page and the
//! public sign-up form.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `?q=` for customer search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// `?customer_id=` for session endpoints scoped to an existing customer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerIdParams {
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// Sign-up details, accepted from the query string or a JSON body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutParams {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl CheckoutParams {
    /// Per-field merge where `body` wins over `self`.
    pub fn overridden_by(self, body: Option<CheckoutParams>) -> CheckoutParams {
        match body {
            Some(body) => CheckoutParams {
                name: body.name.or(self.name),
                email: body.email.or(self.email),
            },
            None => self,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Hosted session URL for the client to open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUrlResponse {
    pub url: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}
