//! CreateDirectDebitSessionHandler - Command handler for mandate setup on an existing customer.

use std::sync::Arc;

use crate::domain::billing::{require_param, BillingError};
use crate::ports::{CreateSetupSessionRequest, PaymentGateway, SetupSession};

use super::BillingUrls;

/// Command to start BACS mandate setup for a known customer.
#[derive(Debug, Clone, Default)]
pub struct CreateDirectDebitSessionCommand {
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateDirectDebitSessionResult {
    pub session: SetupSession,
}

/// Handler for creating a setup session scoped to an existing customer.
pub struct CreateDirectDebitSessionHandler {
    gateway: Arc<dyn PaymentGateway>,
    urls: Arc<BillingUrls>,
}

impl CreateDirectDebitSessionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, urls: Arc<BillingUrls>) -> Self {
        Self { gateway, urls }
    }

    pub async fn handle(
        &self,
        cmd: CreateDirectDebitSessionCommand,
    ) -> Result<CreateDirectDebitSessionResult, BillingError> {
        let customer_id = require_param("customer_id", cmd.customer_id.as_deref())?;

        let session = self
            .gateway
            .create_setup_session(CreateSetupSessionRequest {
                customer_id: customer_id.clone(),
                success_url: self.urls.success_url(),
                cancel_url: self.urls.cancel_url(),
            })
            .await?;

        tracing::info!(
            customer_id = %customer_id,
            session_id = %session.id,
            "Created BACS setup session"
        );

        Ok(CreateDirectDebitSessionResult { session })
    }
}
