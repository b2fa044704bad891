//! In-memory payment gateway for testing.
//!
//! Supports:
//! - Seeded customers returned by `list_customers`
//! - Pre-configured session responses
//! - Error injection (one-shot or per method)
//! - Call tracking

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::ports::{
    CreateCustomerRequest, CreateSetupSessionRequest, Customer, GatewayError,
    ListCustomersRequest, PaymentGateway, SetupSession,
};

/// Mock payment gateway for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentGateway::with_customers(vec![customer("c1", "Jane Doe", "jane@x.com")]);
/// mock.set_method_error("create_setup_session", GatewayError::from_status(400, "No such customer"));
///
/// let handler = CreateDirectDebitSessionHandler::new(Arc::new(mock.clone()), urls);
/// ```
#[derive(Default)]
pub struct MockPaymentGateway {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Customers in insertion order.
    customers: Vec<Customer>,

    /// Next customer to return from `create_customer`.
    next_customer: Option<Customer>,

    /// Next session to return from `create_setup_session`.
    next_setup_session: Option<SetupSession>,

    /// Next session to return from `create_portal_session`.
    next_portal_session: Option<SetupSession>,

    /// Error to return on next call.
    next_error: Option<GatewayError>,

    /// Specific errors by method name.
    method_errors: HashMap<String, GatewayError>,

    call_log: Vec<MethodCall>,
}

/// Recorded method call for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub method: String,
    pub args: Vec<String>,
}

fn mock_id(prefix: &str) -> String {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_mock_{}", prefix, &uuid[..12])
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose customer list starts with `customers`.
    pub fn with_customers(customers: impl IntoIterator<Item = Customer>) -> Self {
        let mock = Self::new();
        mock.state().customers.extend(customers);
        mock
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Add a customer to the list.
    pub fn add_customer(&self, customer: Customer) {
        self.state().customers.push(customer);
    }

    /// Set the customer to return on next `create_customer` call.
    pub fn set_customer(&self, customer: Customer) {
        self.state().next_customer = Some(customer);
    }

    pub fn set_setup_session(&self, session: SetupSession) {
        self.state().next_setup_session = Some(session);
    }

    pub fn set_portal_session(&self, session: SetupSession) {
        self.state().next_portal_session = Some(session);
    }

    /// Set an error to return on the next call to any method.
    pub fn set_error(&self, error: GatewayError) {
        self.state().next_error = Some(error);
    }

    /// Set an error for a specific method.
    pub fn set_method_error(&self, method: &str, error: GatewayError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.next_error = None;
        state.method_errors.clear();
    }

    /// Snapshot of all customers, including ones created through the mock.
    pub fn customers(&self) -> Vec<Customer> {
        self.state().customers.clone()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Call Tracking
    // ════════════════════════════════════════════════════════════════════════════

    /// Get all recorded method calls.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.state().call_log.clone()
    }

    /// Method names in call order.
    pub fn call_sequence(&self) -> Vec<String> {
        self.state()
            .call_log
            .iter()
            .map(|c| c.method.clone())
            .collect()
    }

    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c.method == method)
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| c.method == method)
            .count()
    }

    /// Total calls across every method.
    pub fn total_calls(&self) -> usize {
        self.state().call_log.len()
    }

    pub fn clear_calls(&self) {
        self.state().call_log.clear();
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record_call(&self, method: &str, args: Vec<String>) {
        self.state().call_log.push(MethodCall {
            method: method.to_string(),
            args,
        });
    }

    fn check_error(&self, method: &str) -> Result<(), GatewayError> {
        let mut state = self.state();

        if let Some(error) = state.method_errors.get(method) {
            return Err(error.clone());
        }

        // One-shot error is consumed
        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(())
    }
}

impl Clone for MockPaymentGateway {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn list_customers(
        &self,
        request: ListCustomersRequest,
    ) -> Result<Vec<Customer>, GatewayError> {
        self.record_call(
            "list_customers",
            vec![
                request.email.clone().unwrap_or_default(),
                request.limit.to_string(),
            ],
        );
        self.check_error("list_customers")?;

        // Stripe's email filter is exact and case-insensitive
        let state = self.state();
        Ok(state
            .customers
            .iter()
            .filter(|c| match &request.email {
                Some(filter) => c
                    .email
                    .as_deref()
                    .map(|e| e.eq_ignore_ascii_case(filter))
                    .unwrap_or(false),
                None => true,
            })
            .take(usize::from(request.limit))
            .cloned()
            .collect())
    }

    async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<Customer, GatewayError> {
        self.record_call(
            "create_customer",
            vec![request.name.clone(), request.email.clone()],
        );
        self.check_error("create_customer")?;

        let mut state = self.state();
        let customer = state.next_customer.take().unwrap_or_else(|| Customer {
            id: mock_id("cus"),
            name: Some(request.name),
            email: Some(request.email),
        });
        state.customers.push(customer.clone());

        Ok(customer)
    }

    async fn create_setup_session(
        &self,
        request: CreateSetupSessionRequest,
    ) -> Result<SetupSession, GatewayError> {
        self.record_call(
            "create_setup_session",
            vec![
                request.customer_id.clone(),
                request.success_url.clone(),
                request.cancel_url.clone(),
            ],
        );
        self.check_error("create_setup_session")?;

        let session = self.state().next_setup_session.take().unwrap_or_else(|| {
            let id = mock_id("cs");
            SetupSession {
                url: format!("https://checkout.stripe.com/c/pay/{}", id),
                id,
            }
        });

        Ok(session)
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        return_url: &str,
    ) -> Result<SetupSession, GatewayError> {
        self.record_call(
            "create_portal_session",
            vec![customer_id.to_string(), return_url.to_string()],
        );
        self.check_error("create_portal_session")?;

        let session = self.state().next_portal_session.take().unwrap_or_else(|| {
            let id = mock_id("bps");
            SetupSession {
                url: format!("https://billing.stripe.com/p/session/{}", id),
                id,
            }
        });

        Ok(session)
    }
}
