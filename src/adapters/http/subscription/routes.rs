//! Axum router configuration for subscription endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_checkout_session, get_subscription_status, handle_stripe_webhook,
    verify_checkout_session, SubscriptionAppState,
};

/// Create the subscription API router, mounted under `/api`.
///
/// # Routes
/// - `POST /checkout/session` - Start a hosted checkout
/// - `POST /webhooks/stripe` - Stripe webhook deliveries (signature verified)
/// - `GET /subscription/status` - Status by email
/// - `GET /subscription/verify-session` - Status by checkout session
///
/// Any other method on these paths is answered with 405.
pub fn subscription_router() -> Router<SubscriptionAppState> {
    Router::new()
        .route("/checkout/session", post(create_checkout_session))
        .route("/webhooks/stripe", post(handle_stripe_webhook))
        .route("/subscription/status", get(get_subscription_status))
        .route("/subscription/verify-session", get(verify_checkout_session))
}
