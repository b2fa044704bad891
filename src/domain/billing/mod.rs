//! Billing domain - customer search rules and handler errors.

mod errors;
mod search;

pub use errors::{require_param, BillingError};
pub use search::{CustomerSummary, SearchQuery, NO_EMAIL_PLACEHOLDER, UNNAMED_PLACEHOLDER};
