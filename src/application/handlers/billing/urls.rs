//! Redirect targets handed to the payment gateway.

/// Public URLs derived from the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingUrls {
    base_url: String,
}

impl BillingUrls {
    /// Trailing slashes are dropped so joined paths never contain `//`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Where the customer lands after completing mandate setup.
    pub fn success_url(&self) -> String {
        format!("{}/success.html", self.base_url)
    }

    /// Where the customer lands after abandoning mandate setup.
    pub fn cancel_url(&self) -> String {
        format!("{}/cancel.html", self.base_url)
    }

    /// Where the billing portal sends the customer back to.
    pub fn portal_return_url(&self) -> String {
        format!("{}/", self.base_url)
    }
}
