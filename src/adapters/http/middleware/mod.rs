//! HTTP middleware for axum.
//!
//! - `basic_auth` - Path-prefix Basic authentication gate

pub mod basic_auth;

pub use basic_auth::{basic_auth_middleware, BasicAuthState};
