//! Customer search rules.

use serde::Serialize;

use super::errors::BillingError;

/// Label shown when a customer has no name on file.
pub const UNNAMED_PLACEHOLDER: &str = "Unnamed";

/// Label shown when a customer has no email on file.
pub const NO_EMAIL_PLACEHOLDER: &str = "—";

/// A validated, non-empty free-text search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    lowered: String,
}

impl SearchQuery {
    /// Validates a raw `q` parameter.
    ///
    /// Missing, empty and whitespace-only queries are rejected so every
    /// caller sees the same 400 rather than an empty list.
    pub fn parse(raw: Option<&str>) -> Result<Self, BillingError> {
        let raw = raw.map(str::trim).unwrap_or_default();
        if raw.is_empty() {
            return Err(BillingError::validation("q", "Missing search query"));
        }

        Ok(Self {
            raw: raw.to_string(),
            lowered: raw.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Queries containing `@` are sent upstream as an exact email filter.
    pub fn email_filter(&self) -> Option<&str> {
        self.raw.contains('@').then_some(self.raw.as_str())
    }

    /// Case-insensitive substring match against name or email.
    pub fn matches(&self, name: Option<&str>, email: Option<&str>) -> bool {
        let contains = |field: Option<&str>| {
            field
                .map(|value| value.to_lowercase().contains(&self.lowered))
                .unwrap_or(false)
        };
        contains(name) || contains(email)
    }
}

/// One row of a customer search response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl CustomerSummary {
    /// Builds a row, substituting placeholders for absent or blank fields.
    pub fn new(id: impl Into<String>, name: Option<&str>, email: Option<&str>) -> Self {
        let or_placeholder = |value: Option<&str>, placeholder: &str| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or(placeholder)
                .to_string()
        };

        Self {
            id: id.into(),
            name: or_placeholder(name, UNNAMED_PLACEHOLDER),
            email: or_placeholder(email, NO_EMAIL_PLACEHOLDER),
        }
    }
}
