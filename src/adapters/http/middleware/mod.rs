//! HTTP middleware for axum.
//!
//! Layers applied around the whole application router:
//!
//! - request ids (`x-request-id`, generated when absent and echoed back)
//! - per-request tracing spans carrying the request id
//! - request timeout
//! - CORS, only when origins are configured

use axum::http::{header, HeaderValue, Method, Request};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::ServerConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Wraps `router` with the standard layer stack.
pub fn apply_middleware(router: Router, config: &ServerConfig) -> Router {
    let mut router = router.layer(TimeoutLayer::new(config.request_timeout()));

    if let Some(cors) = build_cors_layer(&config.cors_origins_list()) {
        router = router.layer(cors);
    }

    // SetRequestId is outermost so the trace span can read the header.
    router
        .layer(TraceLayer::new_for_http().make_span_with(request_span::<axum::body::Body>))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Request id assigned by `SetRequestIdLayer`, if any.
pub fn request_id<B>(request: &Request<B>) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
}

fn request_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = request_id(request).unwrap_or("-"),
    )
}

/// Builds a CORS layer for the given origins, or `None` when the list is empty.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn build_cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]),
    )
}
