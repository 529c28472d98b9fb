//! API module
//!
//! Route table and middleware stack for the subscription service:
//! - /sub              — lookup by `?token=`
//! - /sub/<token>[/..] — lookup by path segment
//! - /sub/new_token    — create a token
//! - /sub/sync         — replace a token's list
//! - /health           — liveness

pub mod subscriptions;
pub mod utils;

use crate::state::SharedState;
use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use std::time::Instant;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Build the application router over `state`
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(subscriptions::health_check))
        .route("/sub", any(subscriptions::get_subscriptions))
        .route("/sub/", any(subscriptions::get_subscriptions_by_path))
        .route("/sub/new_token", any(subscriptions::create_token))
        .route("/sub/sync", any(subscriptions::sync_subscriptions))
        .route("/sub/:token", any(subscriptions::get_subscriptions_by_path))
        .fallback(subscriptions::sub_prefix_fallback)
        // Innermost first: OPTIONS is answered before any handler runs
        .layer(axum::middleware::from_fn(answer_options))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(cors)
        .with_state(state)
}

/// Answer every OPTIONS request with an empty 200
async fn answer_options(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(request).await
}

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let response = next.run(request).instrument(span).await;

    // Path only: query strings carry tokens
    info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = %response.status().as_u16(),
        duration_ms = start.elapsed().as_millis(),
        "Request completed"
    );

    response
}
