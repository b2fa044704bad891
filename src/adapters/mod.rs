//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum routes, the Basic auth gate and router composition
//! - `stripe` - Stripe REST client and an in-memory test gateway

pub mod http;
pub mod stripe;

pub use stripe::{MockPaymentGateway, StripeConfig, StripePaymentGateway};
