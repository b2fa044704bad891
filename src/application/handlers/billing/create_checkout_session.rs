//! CreateCheckoutSessionHandler - Command handler for self-service mandate setup.

use std::sync::Arc;

use crate::domain::billing::{require_param, BillingError};
use crate::ports::{
    CreateCustomerRequest, CreateSetupSessionRequest, Customer, PaymentGateway, SetupSession,
};

use super::BillingUrls;

/// Command to register a new customer and start mandate setup.
#[derive(Debug, Clone, Default)]
pub struct CreateCheckoutSessionCommand {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionResult {
    pub customer: Customer,
    pub session: SetupSession,
}

/// Handler for the public sign-up flow.
///
/// Every call creates a new customer; an existing customer with the same
/// email is not reused.
pub struct CreateCheckoutSessionHandler {
    gateway: Arc<dyn PaymentGateway>,
    urls: Arc<BillingUrls>,
}

impl CreateCheckoutSessionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, urls: Arc<BillingUrls>) -> Self {
        Self { gateway, urls }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CreateCheckoutSessionResult, BillingError> {
        // 1. Validate inputs
        let name = require_param("name", cmd.name.as_deref())?;
        let email = require_param("email", cmd.email.as_deref())?;

        // 2. Create the customer
        let customer = self
            .gateway
            .create_customer(CreateCustomerRequest { name, email })
            .await?;

        tracing::info!(customer_id = %customer.id, "Created customer for BACS setup");

        // 3. Create a setup session scoped to the new customer
        let session = self
            .gateway
            .create_setup_session(CreateSetupSessionRequest {
                customer_id: customer.id.clone(),
                success_url: self.urls.success_url(),
                cancel_url: self.urls.cancel_url(),
            })
            .await?;

        tracing::info!(
            customer_id = %customer.id,
            session_id = %session.id,
            "Created BACS setup session"
        );

        Ok(CreateCheckoutSessionResult { customer, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentGateway;
    use crate::application::handlers::billing::test_support::urls;
    use crate::ports::GatewayError;

    fn handler(mock: &MockPaymentGateway) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(Arc::new(mock.clone()), Arc::new(urls()))
    }

    fn command(name: &str, email: &str) -> CreateCheckoutSessionCommand {
        CreateCheckoutSessionCommand {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        }
    }

    #[tokio::test]
    async fn creates_customer_then_session_for_it() {
        let mock = MockPaymentGateway::new();

        let result = handler(&mock)
            .handle(command("Jane Doe", "jane@x.com"))
            .await
            .unwrap();

        assert_eq!(
            mock.call_sequence(),
            vec!["create_customer", "create_setup_session"]
        );
        assert_eq!(mock.calls()[0].args, vec!["Jane Doe", "jane@x.com"]);
        assert_eq!(mock.calls()[1].args[0], result.customer.id);
        assert!(!result.session.url.is_empty());
    }

    #[tokio::test]
    async fn repeated_signup_creates_duplicate_customers() {
        let mock = MockPaymentGateway::new();
        let handler = handler(&mock);

        handler.handle(command("Jane", "jane@x.com")).await.unwrap();
        handler.handle(command("Jane", "jane@x.com")).await.unwrap();

        assert_eq!(mock.call_count("create_customer"), 2);
        assert_eq!(mock.customers().len(), 2);
    }

    #[tokio::test]
    async fn missing_name_makes_no_gateway_call() {
        let mock = MockPaymentGateway::new();

        let err = handler(&mock)
            .handle(CreateCheckoutSessionCommand {
                name: None,
                email: Some("jane@x.com".into()),
            })
            .await
            .unwrap_err();

        assert_eq!(err.message(), "Missing name");
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn missing_email_makes_no_gateway_call() {
        let mock = MockPaymentGateway::new();

        let err = handler(&mock).handle(command("Jane", " ")).await.unwrap_err();

        assert_eq!(err.message(), "Missing email");
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn customer_failure_skips_session() {
        let mock = MockPaymentGateway::new();
        mock.set_method_error(
            "create_customer",
            GatewayError::from_status(400, "Invalid email address"),
        );

        let err = handler(&mock)
            .handle(command("Jane", "not-an-email"))
            .await
            .unwrap_err();

        assert_eq!(err, BillingError::gateway_rejected("Invalid email address"));
        assert!(!mock.was_called("create_setup_session"));
    }

    #[tokio::test]
    async fn session_failure_after_customer_created() {
        let mock = MockPaymentGateway::new();
        mock.set_method_error("create_setup_session", GatewayError::timeout("timed out"));

        let err = handler(&mock)
            .handle(command("Jane", "jane@x.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, BillingError::GatewayUnavailable { .. }));
        assert_eq!(mock.customers().len(), 1);
    }
}
