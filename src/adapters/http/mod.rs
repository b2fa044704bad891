//! HTTP adapters - REST API implementations.
//!
//! `app_router` composes the full application: billing routes, static files,
//! the Basic auth gate and the tower-http layers.

pub mod billing;
pub mod middleware;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::domain::auth::AuthGate;

// Re-export key types for convenience
pub use billing::{billing_routes, BillingAppState, HEALTH_MESSAGE};
pub use middleware::basic_auth_middleware;

/// Build the application router.
///
/// Layer order, outermost first: trace, timeout, auth gate. The gate wraps
/// the static file fallback too, so `/admin.html` is protected.
pub fn app_router(
    state: BillingAppState,
    gate: Arc<AuthGate>,
    static_dir: impl AsRef<Path>,
    request_timeout: Duration,
) -> Router {
    billing_routes()
        .with_state(state)
        .fallback_service(ServeDir::new(static_dir))
        .layer(axum::middleware::from_fn_with_state(gate, basic_auth_middleware))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
