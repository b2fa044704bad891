//! Billing error types.

use thiserror::Error;

/// Errors produced by the billing request handlers.
///
/// Every variant maps to exactly one HTTP response; none are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// A required request parameter is missing or blank.
    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    /// The payment gateway answered and refused the request.
    #[error("Payment gateway rejected the request: {message}")]
    GatewayRejected { message: String },

    /// The payment gateway could not be reached, timed out, or failed internally.
    #[error("Payment gateway unavailable: {message}")]
    GatewayUnavailable { message: String },
}

impl BillingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        BillingError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn gateway_rejected(message: impl Into<String>) -> Self {
        BillingError::GatewayRejected {
            message: message.into(),
        }
    }

    pub fn gateway_unavailable(message: impl Into<String>) -> Self {
        BillingError::GatewayUnavailable {
            message: message.into(),
        }
    }

    /// Returns the user-facing message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            BillingError::ValidationFailed { message, .. }
            | BillingError::GatewayRejected { message }
            | BillingError::GatewayUnavailable { message } => message,
        }
    }

    pub fn is_gateway_error(&self) -> bool {
        !matches!(self, BillingError::ValidationFailed { .. })
    }
}

/// Returns the trimmed value of a required parameter.
pub fn require_param(field: &str, value: Option<&str>) -> Result<String, BillingError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(BillingError::validation(field, format!("Missing {}", field))),
    }
}
