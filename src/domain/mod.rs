//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `auth` - Admin credentials and the HTTP Basic gate decision
//! - `billing` - Customer search rules and billing error types

pub mod auth;
pub mod billing;
