//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Payment Ports
//!
//! - `PaymentGateway` - Customer lookup/creation and hosted setup sessions

mod payment_gateway;

pub use payment_gateway::{
    CreateCustomerRequest, CreateSetupSessionRequest, Customer, GatewayError, GatewayErrorCode,
    ListCustomersRequest, PaymentGateway, SetupSession, MAX_PAGE_SIZE,
};
