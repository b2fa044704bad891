//! SearchCustomersHandler - Query handler for the admin customer lookup.

use std::sync::Arc;

use crate::domain::billing::{BillingError, CustomerSummary, SearchQuery};
use crate::ports::{ListCustomersRequest, PaymentGateway, MAX_PAGE_SIZE};

/// Query for customers whose name or email contains `q`.
#[derive(Debug, Clone, Default)]
pub struct SearchCustomersQuery {
    pub q: Option<String>,
}

/// Matching customers, in gateway order.
#[derive(Debug, Clone)]
pub struct SearchCustomersResult {
    pub customers: Vec<CustomerSummary>,
}

/// Handler for customer search.
///
/// Only the first page of customers is scanned, so matches beyond the
/// first hundred records are not returned.
pub struct SearchCustomersHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl SearchCustomersHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(
        &self,
        query: SearchCustomersQuery,
    ) -> Result<SearchCustomersResult, BillingError> {
        // 1. Reject blank queries before touching the gateway
        let search = SearchQuery::parse(query.q.as_deref())?;

        // 2. Fetch one page, narrowed server-side when the query looks like an email
        let request = ListCustomersRequest::new(
            search.email_filter().map(str::to_string),
            MAX_PAGE_SIZE,
        );
        let customers = self.gateway.list_customers(request).await?;
        let scanned = customers.len();

        // 3. Filter locally and project into summaries
        let customers: Vec<CustomerSummary> = customers
            .into_iter()
            .filter(|c| search.matches(c.name.as_deref(), c.email.as_deref()))
            .map(|c| CustomerSummary::new(c.id, c.name.as_deref(), c.email.as_deref()))
            .collect();

        tracing::debug!(
            query = search.as_str(),
            scanned,
            matched = customers.len(),
            "Customer search completed"
        );

        Ok(SearchCustomersResult { customers })
    }
}
