//! Aspect BACS Direct Debit setup service.
//!
//! A small HTTP server that lets staff look up Stripe customers and send
//! them a hosted BACS Direct Debit mandate setup page, and lets new
//! customers sign up for one themselves. Admin routes sit behind HTTP
//! Basic authentication.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
