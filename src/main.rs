//! Aspect BACS Direct Debit setup server.
//!
//! Serves the admin page and the mandate setup endpoints on port 4242 by
//! default. See `config` for the environment variables it reads.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;
use std::sync::Arc;

use bacs_setup::adapters::http::{app_router, BillingAppState};
use bacs_setup::adapters::stripe::{StripeConfig, StripePaymentGateway};
use bacs_setup::application::BillingUrls;
use bacs_setup::config::{AppConfig, ConfigError, ValidationError};
use bacs_setup::domain::auth::{AdminCredentials, AuthGate, ProtectedPaths};
use bacs_setup::ports::GatewayError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("Failed to create payment gateway: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            // Tracing is not initialised yet
            eprintln!("bacs-setup: {}", StartupError::from(e));
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Server failed to start");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with EnvFilter.
///
/// `RUST_LOG` overrides the configured level. Production logs are JSON.
fn init_tracing(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let is_production = config.is_production();
    let json_layer =
        is_production.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!is_production).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    config.validate()?;

    let gateway = StripePaymentGateway::new(StripeConfig::from_payment_config(&config.payment))?;
    if config.payment.is_test_mode() {
        tracing::info!("Stripe running in test mode");
    }

    let credentials =
        AdminCredentials::resolve(config.admin.username(), config.admin.password());
    let protected = ProtectedPaths::new(config.admin.protected_paths_list());
    tracing::info!(
        username = credentials.username(),
        protected = ?protected.prefixes(),
        "Admin gate configured"
    );
    let gate = Arc::new(AuthGate::new(credentials, protected, config.admin.realm.clone()));

    let base_url = config.server.public_base_url();
    let state = BillingAppState::new(Arc::new(gateway), BillingUrls::new(base_url.clone()));

    let app = app_router(
        state,
        gate,
        &config.server.static_dir,
        config.server.request_timeout(),
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, base_url = %base_url, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
