//! HTTP adapter for the BACS Direct Debit setup endpoints.
//!
//! - `GET /` - Liveness check
//! - `GET /admin` - Admin page redirect
//! - `GET /search-customer?q=` - Customer search (alias `/search-customers`)
//! - `GET /create-directdebit-session?customer_id=` - Setup session URL as JSON
//! - `POST /create-checkout-session` - Customer sign-up, redirects to Stripe
//! - `GET /create-portal-session?customer_id=` - Billing portal redirect

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{BillingApiError, BillingAppState, HEALTH_MESSAGE};
pub use routes::billing_routes;
