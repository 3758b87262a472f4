//! HTTP handlers for subscription endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::subscription::{
    CheckoutSettings, CreateCheckoutSessionHandler, GetStatusByEmailHandler,
    GetStatusByEmailQuery, HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
    VerifyCheckoutSessionHandler, VerifyCheckoutSessionQuery,
};
use crate::domain::subscription::SubscriptionError;
use crate::domain::webhook::{StripeWebhookVerifier, WebhookError};
use crate::ports::{PaymentProvider, SubscriptionStore};

use super::dto::{
    CheckoutResponse, ErrorResponse, StatusParams, StatusResponse, VerifySessionParams,
    VerifySessionResponse,
};

/// Header carrying the provider's webhook signature.
pub const STRIPE_SIGNATURE_HEADER: &str = "stripe-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct SubscriptionAppState {
    pub store: Arc<dyn SubscriptionStore>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub webhook_verifier: Arc<StripeWebhookVerifier>,
    pub checkout: CheckoutSettings,
}

impl SubscriptionAppState {
    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.webhook_verifier.clone(),
            self.store.clone(),
            self.payment_provider.clone(),
        )
    }

    pub fn status_handler(&self) -> GetStatusByEmailHandler {
        GetStatusByEmailHandler::new(self.store.clone())
    }

    pub fn verify_session_handler(&self) -> VerifyCheckoutSessionHandler {
        VerifyCheckoutSessionHandler::new(self.store.clone(), self.payment_provider.clone())
    }

    pub fn checkout_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(self.payment_provider.clone(), self.checkout.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/checkout/session
pub async fn create_checkout_session(
    State(state): State<SubscriptionAppState>,
) -> Result<Json<CheckoutResponse>, SubscriptionApiError> {
    let session = state.checkout_handler().handle().await?;
    Ok(Json(CheckoutResponse { url: session.url }))
}

/// POST /api/webhooks/stripe
///
/// Always answers in plain text; the provider only looks at the status code.
pub async fn handle_stripe_webhook(
    State(state): State<SubscriptionAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, &'static str), WebhookApiError> {
    let signature = headers
        .get(STRIPE_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    let outcome = state.webhook_handler().handle(cmd).await?;
    tracing::debug!(?outcome, "Webhook acknowledged");

    Ok((StatusCode::OK, "ok"))
}

/// GET /api/subscription/status?email=
pub async fn get_subscription_status(
    State(state): State<SubscriptionAppState>,
    Query(params): Query<StatusParams>,
) -> Result<Json<StatusResponse>, SubscriptionApiError> {
    let record = state
        .status_handler()
        .handle(GetStatusByEmailQuery {
            email: params.email,
        })
        .await?;

    Ok(Json(record.into()))
}

/// GET /api/subscription/verify-session?session_id=
pub async fn verify_checkout_session(
    State(state): State<SubscriptionAppState>,
    Query(params): Query<VerifySessionParams>,
) -> Result<Json<VerifySessionResponse>, SubscriptionApiError> {
    let result = state
        .verify_session_handler()
        .handle(VerifyCheckoutSessionQuery {
            session_id: params.session_id,
        })
        .await?;

    Ok(Json(result.into()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// Converts webhook failures into plain-text responses.
#[derive(Debug)]
pub struct WebhookApiError(WebhookError);

impl From<WebhookError> for WebhookApiError {
    fn from(err: WebhookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if self.0.is_verification_failure() {
            tracing::warn!(error = %self.0, "Webhook rejected");
            (status, format!("Webhook Error: {}", self.0)).into_response()
        } else {
            tracing::error!(
                error = %self.0,
                retryable = self.0.is_retryable(),
                "Webhook processing failed"
            );
            (status, self.0.to_string()).into_response()
        }
    }
}

/// Converts query/checkout failures into HTTP responses.
#[derive(Debug)]
pub struct SubscriptionApiError(SubscriptionError);

impl From<SubscriptionError> for SubscriptionApiError {
    fn from(err: SubscriptionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for SubscriptionApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            SubscriptionError::MissingParameter(_) => {
                tracing::warn!(error = %self.0, "Rejected subscription request");
                (StatusCode::BAD_REQUEST, self.0.to_string()).into_response()
            }
            SubscriptionError::Provider(_) | SubscriptionError::Storage(_) => {
                tracing::error!(error = %self.0, "Subscription request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(self.0.to_string())),
                )
                    .into_response()
            }
        }
    }
}
