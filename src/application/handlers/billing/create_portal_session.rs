//! CreatePortalSessionHandler - Command handler for billing portal access.

use std::sync::Arc;

use crate::domain::billing::{require_param, BillingError};
use crate::ports::{PaymentGateway, SetupSession};

use super::BillingUrls;

#[derive(Debug, Clone, Default)]
pub struct CreatePortalSessionCommand {
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePortalSessionResult {
    pub session: SetupSession,
}

/// Handler for opening the hosted billing portal for an existing customer.
pub struct CreatePortalSessionHandler {
    gateway: Arc<dyn PaymentGateway>,
    urls: Arc<BillingUrls>,
}

impl CreatePortalSessionHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>, urls: Arc<BillingUrls>) -> Self {
        Self { gateway, urls }
    }

    pub async fn handle(
        &self,
        cmd: CreatePortalSessionCommand,
    ) -> Result<CreatePortalSessionResult, BillingError> {
        let customer_id = require_param("customer_id", cmd.customer_id.as_deref())?;

        let session = self
            .gateway
            .create_portal_session(&customer_id, &self.urls.portal_return_url())
            .await?;

        tracing::info!(customer_id = %customer_id, "Created billing portal session");

        Ok(CreatePortalSessionResult { session })
    }
}
