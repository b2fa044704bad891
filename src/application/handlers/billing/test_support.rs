//! Shared fixtures for billing handler tests.

use crate::ports::Customer;

use super::BillingUrls;

pub(crate) fn customer(id: &str, name: Option<&str>, email: Option<&str>) -> Customer {
    Customer {
        id: id.to_string(),
        name: name.map(str::to_string),
        email: email.map(str::to_string),
    }
}

pub(crate) fn urls() -> BillingUrls {
    BillingUrls::new("https://dd.example.com")
}
