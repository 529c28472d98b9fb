//! Subscription API handlers
//!
//! Every route accepts any method at the router; each handler checks the
//! method itself so a wrong verb is answered with the plain-text 405 body.
//! Query strings are parsed inside the handlers, after the method check.

use crate::api::utils::{
    query_token, require_method, require_token, token_from_path, token_prefix,
};
use crate::error::AppError;
use crate::state::{NewTokenResponse, SharedState, UserSubscriptions};
use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::{debug, info};

/// Prefix handled by the path-segment lookup
const SUB_PATH_PREFIX: &str = "/sub/";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always "healthy" when the server answers
    pub status: String,
    /// Crate version
    pub version: String,
}

/// GET /sub?token=<t> - Fetch a token's subscriptions
pub async fn get_subscriptions(
    method: Method,
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
) -> Result<Json<UserSubscriptions>, AppError> {
    require_method(&method, Method::GET)?;
    let token = require_token(query_token(query.as_deref()))?;
    lookup(&state, &token).await
}

/// GET /sub/<token> - Fetch a token's subscriptions by path segment
pub async fn get_subscriptions_by_path(
    method: Method,
    State(state): State<SharedState>,
    uri: Uri,
) -> Result<Json<UserSubscriptions>, AppError> {
    require_method(&method, Method::GET)?;
    let token = token_from_path(uri.path())?;
    lookup(&state, &token).await
}

/// Router fallback: paths nested deeper under `/sub/` go to the path lookup
pub async fn sub_prefix_fallback(method: Method, state: State<SharedState>, uri: Uri) -> Response {
    if uri.path().starts_with(SUB_PATH_PREFIX) {
        return get_subscriptions_by_path(method, state, uri)
            .await
            .into_response();
    }
    (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
}

async fn lookup(state: &SharedState, token: &str) -> Result<Json<UserSubscriptions>, AppError> {
    match state.store.get(token).await {
        Some(subscriptions) => Ok(Json(subscriptions.into())),
        None => {
            debug!(token = %token_prefix(token), "Token not found");
            Err(AppError::TokenNotFound)
        }
    }
}

/// POST /sub/new_token - Create a token with an empty list
pub async fn create_token(
    method: Method,
    State(state): State<SharedState>,
) -> Result<Json<NewTokenResponse>, AppError> {
    require_method(&method, Method::POST)?;
    let token = state.store.create_token().await;
    info!(token = %token_prefix(&token), "Created new token");
    Ok(Json(NewTokenResponse { token }))
}

/// POST /sub/sync?token=<t> - Replace a token's list
///
/// The body is decoded before the token is checked. Ids in the body are
/// discarded and reassigned 1..=N. An unknown token gets a new entry.
pub async fn sync_subscriptions(
    method: Method,
    State(state): State<SharedState>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Result<Json<UserSubscriptions>, AppError> {
    require_method(&method, Method::POST)?;
    let payload = decode_sync_body(&body)?;
    let token = require_token(query_token(query.as_deref()))?;

    let prefix = token_prefix(&token).to_string();
    let stored = state.store.replace(token, payload.subscriptions).await;
    info!(token = %prefix, count = stored.len(), "Synced subscriptions");

    Ok(Json(stored.into()))
}

/// Decode the first JSON value of the body; bytes after it are ignored.
fn decode_sync_body(body: &[u8]) -> Result<UserSubscriptions, AppError> {
    match serde_json::Deserializer::from_slice(body)
        .into_iter::<UserSubscriptions>()
        .next()
    {
        Some(payload) => Ok(payload?),
        None => Err(AppError::InvalidBody("EOF".to_string())),
    }
}

/// GET /health - Liveness check
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
