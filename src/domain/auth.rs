//! Admin authentication for the HTTP Basic gate.
//!
//! Everything here is a pure function of the request path, the
//! `Authorization` header and the credentials loaded at startup. The HTTP
//! adapter turns the result into a response.
//!
//! # Decision Table
//!
//! | Path protected | Header                          | Result                 |
//! |----------------|---------------------------------|------------------------|
//! | no             | any                             | `PassThrough`          |
//! | yes            | absent                          | `AuthError::Required`  |
//! | yes            | not `Basic`, or malformed       | `AuthError::Required`  |
//! | yes            | `Basic`, wrong user or password | `AuthError::Denied`    |
//! | yes            | `Basic`, exact match            | `Authorized`           |

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Username used when none is configured.
pub const DEFAULT_ADMIN_USERNAME: &str = "aspectadmin";

/// Password used when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "aspectdd";

/// Expected admin credentials, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: SecretString,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Resolves credentials from optional configured values.
    ///
    /// Values are trimmed; a missing or blank value falls back to the
    /// built-in default. Falling back never fails, it only logs a warning.
    pub fn resolve(username: Option<&str>, password: Option<&str>) -> Self {
        let username = match username.map(str::trim) {
            Some(u) if !u.is_empty() => u.to_string(),
            _ => {
                tracing::warn!("Admin username not configured, using built-in default");
                DEFAULT_ADMIN_USERNAME.to_string()
            }
        };

        let password = match password.map(str::trim) {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => {
                tracing::warn!("Admin password not configured, using built-in default");
                DEFAULT_ADMIN_PASSWORD.to_string()
            }
        };

        Self::new(username, password)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Byte-exact comparison of both fields in constant time.
    ///
    /// Both comparisons always run so a wrong username costs the same as a
    /// wrong password.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let pass_ok = self
            .password
            .expose_secret()
            .as_bytes()
            .ct_eq(password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}

/// Path prefixes that require admin credentials.
#[derive(Debug, Clone, Default)]
pub struct ProtectedPaths {
    prefixes: Vec<String>,
}

impl ProtectedPaths {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    /// A path is protected if it equals or starts with any prefix.
    ///
    /// Both the raw path and its normalized form are matched, so encodings
    /// the static file server would resolve to a protected file are caught.
    pub fn is_protected(&self, path: &str) -> bool {
        let normalized = normalize_path(path);
        self.prefixes.iter().any(|prefix| {
            path.starts_with(prefix.as_str()) || normalized.starts_with(prefix.as_str())
        })
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

/// Percent-decodes `path` and rebuilds it from its segments.
///
/// Empty and `.` segments are dropped and `..` removes the previous segment,
/// so `//admin.html`, `/./admin.html` and `/%61dmin.html` all become
/// `/admin.html`.
pub fn normalize_path(path: &str) -> String {
    let decoded = percent_decode(path);
    let mut segments: Vec<&str> = Vec::new();

    for segment in decoded.split(['/', '\\']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Username and password decoded from an `Authorization: Basic` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Parses a raw `Authorization` header value.
    ///
    /// Returns `None` for any other scheme, invalid base64, non-UTF-8
    /// payloads and payloads without a `:` separator.
    pub fn parse(header: &str) -> Option<Self> {
        let (scheme, payload) = header.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(payload.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;

        // Passwords may contain ':' so only the first one separates
        let (username, password) = decoded.split_once(':')?;

        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

/// Successful outcome of the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthDecision {
    /// Path is not protected; credentials were not inspected.
    PassThrough,

    /// Path is protected and the credentials matched.
    Authorized,
}

/// Rejection from the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No usable credentials were supplied; the client should authenticate.
    #[error("Authentication required")]
    Required,

    /// Credentials were supplied but do not match.
    #[error("Invalid credentials")]
    Denied,
}

impl AuthError {
    /// Returns true if the response should carry a `WWW-Authenticate` challenge.
    pub fn should_challenge(&self) -> bool {
        matches!(self, AuthError::Required)
    }
}

/// Path-based Basic authentication gate.
#[derive(Debug, Clone)]
pub struct AuthGate {
    credentials: AdminCredentials,
    protected: ProtectedPaths,
    realm: String,
}

impl AuthGate {
    pub fn new(
        credentials: AdminCredentials,
        protected: ProtectedPaths,
        realm: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            protected,
            realm: realm.into(),
        }
    }

    /// Decide whether a request may proceed.
    ///
    /// `authorization` is the raw header value, or `None` when absent.
    pub fn check(
        &self,
        path: &str,
        authorization: Option<&str>,
    ) -> Result<AuthDecision, AuthError> {
        if !self.protected.is_protected(path) {
            return Ok(AuthDecision::PassThrough);
        }

        let header = authorization.ok_or(AuthError::Required)?;
        let supplied = BasicCredentials::parse(header).ok_or(AuthError::Required)?;

        if self.credentials.matches(&supplied.username, &supplied.password) {
            Ok(AuthDecision::Authorized)
        } else {
            Err(AuthError::Denied)
        }
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Value for the `WWW-Authenticate` header.
    pub fn challenge(&self) -> String {
        format!("Basic realm=\"{}\"", self.realm.replace('"', "'"))
    }

    pub fn protected_paths(&self) -> &ProtectedPaths {
        &self.protected
    }
}
