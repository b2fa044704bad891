//! Stripe payment gateway adapter.
//!
//! Implements the `PaymentGateway` port against the Stripe REST API:
//! - Customer listing and creation
//! - Checkout sessions in setup mode for BACS Direct Debit
//! - Billing portal sessions
//!
//! # Security
//!
//! - The secret key is held in `secrecy::SecretString` and never logged
//!
//! # Configuration
//!
//! Required environment variables:
//! - `BACS_SETUP__PAYMENT__STRIPE_SECRET_KEY`: Stripe secret API key

mod mock_payment_gateway;
mod stripe_adapter;
mod types;

pub use mock_payment_gateway::{MethodCall, MockPaymentGateway};
pub use stripe_adapter::{StripeConfig, StripePaymentGateway};
pub use types::{
    StripeCheckoutSession, StripeCustomer, StripeErrorBody, StripeErrorResponse, StripeList,
    StripePortalSession,
};
