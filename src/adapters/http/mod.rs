//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the full application: the subscription API under
//! `/api` plus an unauthenticated `/health` probe.

pub mod middleware;
pub mod subscription;

use axum::{routing::get, Json, Router};
use serde::Serialize;

pub use middleware::{apply_middleware, build_cors_layer};
pub use subscription::{subscription_router, SubscriptionAppState};

/// Liveness probe body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Builds the application router with state applied, before middleware.
pub fn app_router(state: SubscriptionAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", subscription_router())
        .with_state(state)
}
