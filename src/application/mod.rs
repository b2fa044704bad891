//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer validates request input and coordinates calls to the
//! payment gateway port. Handlers hold no mutable state.

pub mod handlers;

pub use handlers::{
    BillingUrls,
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, CreateCheckoutSessionResult,
    CreateDirectDebitSessionCommand, CreateDirectDebitSessionHandler,
    CreateDirectDebitSessionResult,
    CreatePortalSessionCommand, CreatePortalSessionHandler, CreatePortalSessionResult,
    SearchCustomersHandler, SearchCustomersQuery, SearchCustomersResult,
};
