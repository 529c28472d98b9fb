//! Error types and error handling for the application
//!
//! Every failure a handler can report is an `AppError`. Errors are written
//! back as plain-text bodies carrying the status code that matches the
//! variant; nothing is retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// The endpoint does not accept the request's HTTP method
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// No token (or an empty one) was supplied
    #[error("Token is required")]
    MissingToken,

    /// The request body could not be decoded into the expected shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The token is not present in the store
    #[error("Token not found")]
    TokenNotFound,
}

impl AppError {
    /// HTTP status reported for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingToken => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::TokenNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::InvalidBody(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, format!("{}\n", self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(AppError::MissingToken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidBody("eof".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::TokenNotFound.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_json_error_becomes_invalid_body() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err = AppError::from(err);
        assert!(matches!(app_err, AppError::InvalidBody(_)));
        assert!(app_err.to_string().starts_with("Invalid request body: "));
    }

    #[test]
    fn test_into_response_is_plain_text() {
        let response = AppError::TokenNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("text/plain"));
    }
}
