//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod billing;

pub use billing::{
    BillingUrls,
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, CreateCheckoutSessionResult,
    CreateDirectDebitSessionCommand, CreateDirectDebitSessionHandler,
    CreateDirectDebitSessionResult,
    CreatePortalSessionCommand, CreatePortalSessionHandler, CreatePortalSessionResult,
    SearchCustomersHandler, SearchCustomersQuery, SearchCustomersResult,
};
