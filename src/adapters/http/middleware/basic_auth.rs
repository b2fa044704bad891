//! HTTP Basic authentication gate for axum.
//!
//! Runs the pure decision in `domain::auth::AuthGate` for every request and
//! turns failures into responses:
//! - `AuthError::Required` → 401 with a `WWW-Authenticate` challenge
//! - `AuthError::Denied` → 403 without a challenge
//!
//! # Example
//!
//! ```ignore
//! use axum::{Router, middleware};
//! use std::sync::Arc;
//!
//! let gate = Arc::new(AuthGate::new(credentials, protected_paths, "Aspect Admin"));
//!
//! let app = Router::new()
//!     .route("/admin", get(admin))
//!     .layer(middleware::from_fn_with_state(gate, basic_auth_middleware));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{header, HeaderValue, StatusCode};

use crate::domain::auth::{AuthDecision, AuthError, AuthGate};

/// Middleware state - the shared gate.
pub type BasicAuthState = Arc<AuthGate>;

/// Basic auth middleware.
///
/// Unprotected paths pass through untouched. Rejections are plain text so
/// browsers show their native credential prompt.
pub async fn basic_auth_middleware(
    State(gate): State<BasicAuthState>,
    request: Request,
    next: Next,
) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match gate.check(request.uri().path(), authorization) {
        Ok(AuthDecision::PassThrough) | Ok(AuthDecision::Authorized) => next.run(request).await,
        Err(err) => {
            tracing::warn!(
                path = %request.uri().path(),
                reason = ?err,
                "Rejected admin request"
            );
            rejection(&gate, err)
        }
    }
}

fn rejection(gate: &AuthGate, err: AuthError) -> Response {
    match err {
        AuthError::Required => {
            let challenge = HeaderValue::from_str(&gate.challenge())
                .unwrap_or_else(|_| HeaderValue::from_static("Basic"));
            (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, challenge)],
                err.to_string(),
            )
                .into_response()
        }
        AuthError::Denied => (StatusCode::FORBIDDEN, err.to_string()).into_response(),
    }
}
