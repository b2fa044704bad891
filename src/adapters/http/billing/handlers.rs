//! HTTP handlers for the BACS setup endpoints.
//!
//! These handlers connect axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::{Form, FromRequest, Json, Query, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::handlers::billing::{
    BillingUrls, CreateCheckoutSessionCommand, CreateCheckoutSessionHandler,
    CreateDirectDebitSessionCommand, CreateDirectDebitSessionHandler, CreatePortalSessionCommand,
    CreatePortalSessionHandler, SearchCustomersHandler, SearchCustomersQuery,
};
use crate::domain::billing::{BillingError, CustomerSummary};
use crate::ports::PaymentGateway;

use super::dto::{CheckoutParams, CustomerIdParams, ErrorResponse, SearchParams, SessionUrlResponse};

/// Plain-text liveness message for `GET /`.
pub const HEALTH_MESSAGE: &str = "✅ Aspect BACS Direct Debit setup — Live and running";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the billing routes.
///
/// Cloned per request; every field is an `Arc`.
#[derive(Clone)]
pub struct BillingAppState {
    pub gateway: Arc<dyn PaymentGateway>,
    pub urls: Arc<BillingUrls>,
}

impl BillingAppState {
    pub fn new(gateway: Arc<dyn PaymentGateway>, urls: BillingUrls) -> Self {
        Self {
            gateway,
            urls: Arc::new(urls),
        }
    }

    pub fn search_customers_handler(&self) -> SearchCustomersHandler {
        SearchCustomersHandler::new(self.gateway.clone())
    }

    pub fn directdebit_session_handler(&self) -> CreateDirectDebitSessionHandler {
        CreateDirectDebitSessionHandler::new(self.gateway.clone(), self.urls.clone())
    }

    pub fn checkout_session_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(self.gateway.clone(), self.urls.clone())
    }

    pub fn portal_session_handler(&self) -> CreatePortalSessionHandler {
        CreatePortalSessionHandler::new(self.gateway.clone(), self.urls.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET / - Liveness check
pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

/// GET /admin - Redirect to the static admin page
pub async fn admin_page() -> Redirect {
    Redirect::to("/admin.html")
}

/// GET /search-customer?q= - Search customers by name or email
pub async fn search_customers(
    State(state): State<BillingAppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CustomerSummary>>, BillingApiError> {
    let handler = state.search_customers_handler();
    let result = handler.handle(SearchCustomersQuery { q: params.q }).await?;

    Ok(Json(result.customers))
}

/// GET /create-directdebit-session?customer_id= - Setup session for an existing customer
pub async fn create_directdebit_session(
    State(state): State<BillingAppState>,
    Query(params): Query<CustomerIdParams>,
) -> Result<Json<SessionUrlResponse>, BillingApiError> {
    let handler = state.directdebit_session_handler();
    let cmd = CreateDirectDebitSessionCommand {
        customer_id: params.customer_id,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(SessionUrlResponse {
        url: result.session.url,
    }))
}

/// POST /create-checkout-session - Register a customer and redirect to mandate setup
///
/// `name` and `email` come from the query string or a JSON or form-encoded
/// body; body fields win.
pub async fn create_checkout_session(
    State(state): State<BillingAppState>,
    Query(query): Query<CheckoutParams>,
    CheckoutBody(body): CheckoutBody,
) -> Result<Redirect, BillingApiError> {
    let params = query.overridden_by(body);
    let handler = state.checkout_session_handler();
    let cmd = CreateCheckoutSessionCommand {
        name: params.name,
        email: params.email,
    };

    let result = handler.handle(cmd).await?;

    Ok(Redirect::to(&result.session.url))
}

/// GET /create-portal-session?customer_id= - Redirect to the billing portal
pub async fn create_portal_session(
    State(state): State<BillingAppState>,
    Query(params): Query<CustomerIdParams>,
) -> Result<Redirect, BillingApiError> {
    let handler = state.portal_session_handler();
    let cmd = CreatePortalSessionCommand {
        customer_id: params.customer_id,
    };

    let result = handler.handle(cmd).await?;

    Ok(Redirect::to(&result.session.url))
}

// ════════════════════════════════════════════════════════════════════════════════
// Extractors
// ════════════════════════════════════════════════════════════════════════════════

/// Optional sign-up body, decoded according to its `Content-Type`.
///
/// JSON and `application/x-www-form-urlencoded` bodies are parsed; any other
/// content type (or none) yields `None`. A body that claims a supported type
/// but fails to parse is rejected with 400 `VALIDATION_FAILED`.
#[derive(Debug, Default)]
pub struct CheckoutBody(pub Option<CheckoutParams>);

#[derive(Clone, Copy)]
enum BodyKind {
    Json,
    Form,
    Other,
}

impl BodyKind {
    fn of(request: &Request) -> Self {
        let content_type = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            BodyKind::Json
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            BodyKind::Form
        } else {
            BodyKind::Other
        }
    }
}

#[axum::async_trait]
impl<S> FromRequest<S> for CheckoutBody
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match BodyKind::of(&req) {
            BodyKind::Json => {
                let Json(params) = Json::<CheckoutParams>::from_request(req, state)
                    .await
                    .map_err(|rejection: JsonRejection| body_rejected(rejection.body_text()))?;
                Ok(Self(Some(params)))
            }
            BodyKind::Form => {
                let Form(params) = Form::<CheckoutParams>::from_request(req, state)
                    .await
                    .map_err(|rejection: FormRejection| body_rejected(rejection.body_text()))?;
                Ok(Self(Some(params)))
            }
            BodyKind::Other => Ok(Self(None)),
        }
    }
}

fn body_rejected(detail: String) -> Response {
    BillingApiError(BillingError::validation("body", detail)).into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that implements IntoResponse.
#[derive(Debug)]
pub struct BillingApiError(pub BillingError);

impl From<BillingError> for BillingApiError {
    fn from(err: BillingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for BillingApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = match &self.0 {
            BillingError::ValidationFailed { field, message } => {
                tracing::warn!(field = %field, "{}", message);
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            BillingError::GatewayRejected { message } => {
                tracing::error!(error = %message, "Payment gateway rejected request");
                (StatusCode::BAD_REQUEST, "GATEWAY_ERROR")
            }
            BillingError::GatewayUnavailable { message } => {
                tracing::error!(error = %message, "Payment gateway unavailable");
                (StatusCode::BAD_GATEWAY, "GATEWAY_UNAVAILABLE")
            }
        };

        let body = ErrorResponse::new(code, self.0.message());
        (status, Json(body)).into_response()
    }
}
