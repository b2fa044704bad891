//! Admin access configuration (HTTP Basic credentials and gated paths)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Path prefixes gated behind admin credentials when none are configured.
pub const DEFAULT_PROTECTED_PATHS: &[&str] =
    &["/admin", "/search-customer", "/create-directdebit-session"];

/// Admin configuration
///
/// Username and password are optional here; the credential store applies
/// trimming and the fixed fallback when they are absent.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Admin username
    pub username: Option<String>,

    /// Admin password
    pub password: Option<SecretString>,

    /// Realm advertised in `WWW-Authenticate`
    #[serde(default = "default_realm")]
    pub realm: String,

    /// Protected path prefixes (comma-separated)
    pub protected_paths: Option<String>,
}

impl AdminConfig {
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_ref().map(|p| p.expose_secret().as_str())
    }

    /// Get protected path prefixes as a vector
    pub fn protected_paths_list(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .protected_paths
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if configured.is_empty() {
            DEFAULT_PROTECTED_PATHS.iter().map(|p| p.to_string()).collect()
        } else {
            configured
        }
    }

    /// Validate admin configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for path in self.protected_paths_list() {
            if !path.starts_with('/') {
                return Err(ValidationError::InvalidProtectedPath(path));
            }
        }
        Ok(())
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            realm: default_realm(),
            protected_paths: None,
        }
    }
}

fn default_realm() -> String {
    "Aspect Admin".to_string()
}
