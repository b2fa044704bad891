//! Billing handlers.
//!
//! Command and query handlers for BACS Direct Debit setup:
//!
//! ## Commands
//! - Creating a setup session for an existing customer
//! - Registering a customer and creating their setup session
//! - Opening the billing portal
//!
//! ## Queries
//! - Searching customers by name or email

mod create_checkout_session;
mod create_directdebit_session;
mod create_portal_session;
mod search_customers;
mod urls;

#[cfg(test)]
pub(crate) mod test_support;

pub use urls::BillingUrls;

// Commands
pub use create_checkout_session::{
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, CreateCheckoutSessionResult,
};
pub use create_directdebit_session::{
    CreateDirectDebitSessionCommand, CreateDirectDebitSessionHandler,
    CreateDirectDebitSessionResult,
};
pub use create_portal_session::{
    CreatePortalSessionCommand, CreatePortalSessionHandler, CreatePortalSessionResult,
};

// Queries
pub use search_customers::{SearchCustomersHandler, SearchCustomersQuery, SearchCustomersResult};
