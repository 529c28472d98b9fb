//! API utility functions
//!
//! Helpers shared by the subscription handlers: method checks and token
//! extraction from the query string or the request path.

use crate::error::AppError;
use axum::http::Method;
use percent_encoding::percent_decode_str;

/// Number of token characters shown in logs
pub const LOG_TOKEN_PREFIX_LEN: usize = 8;

/// Fail with `MethodNotAllowed` unless `method` is `expected`
pub fn require_method(method: &Method, expected: Method) -> Result<(), AppError> {
    if *method == expected {
        Ok(())
    } else {
        Err(AppError::MethodNotAllowed)
    }
}

/// First `token` value of a raw query string, form-decoded
///
/// Repeated keys are allowed; later values are ignored.
pub fn query_token(raw_query: Option<&str>) -> Option<String> {
    let query = raw_query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.into_owned())
}

/// Turn an optional query value into a non-empty token
pub fn require_token(token: Option<String>) -> Result<String, AppError> {
    match token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AppError::MissingToken),
    }
}

/// Extract the token from a `/sub/<token>` path
///
/// The path is percent-decoded, then split on `/`; the token is the
/// segment after `sub`. Anything after the token is ignored.
///
/// # Returns
/// * `Ok(String)` - The decoded token segment
/// * `Err(AppError::MissingToken)` - Fewer than three segments, or the segment is empty
pub fn token_from_path(path: &str) -> Result<String, AppError> {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    match decoded.split('/').nth(2) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AppError::MissingToken),
    }
}

/// Shortened token for log lines
pub fn token_prefix(token: &str) -> &str {
    match token.char_indices().nth(LOG_TOKEN_PREFIX_LEN) {
        Some((idx, _)) => &token[..idx],
        None => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_method() {
        assert!(require_method(&Method::GET, Method::GET).is_ok());
        assert!(matches!(
            require_method(&Method::POST, Method::GET),
            Err(AppError::MethodNotAllowed)
        ));
    }

    #[test]
    fn test_query_token() {
        assert_eq!(query_token(Some("token=abc")).as_deref(), Some("abc"));
        assert_eq!(
            query_token(Some("token=ABCDEF&token=b")).as_deref(),
            Some("ABCDEF")
        );
        assert_eq!(query_token(Some("other=1&token=a%20b")).as_deref(), Some("a b"));
        assert_eq!(query_token(Some("token=a+b")).as_deref(), Some("a b"));
        assert_eq!(query_token(Some("token=")).as_deref(), Some(""));
        assert_eq!(query_token(Some("other=1")), None);
        assert_eq!(query_token(None), None);
    }

    #[test]
    fn test_require_token() {
        assert_eq!(require_token(Some("abc".to_string())).unwrap(), "abc");
        assert!(matches!(require_token(None), Err(AppError::MissingToken)));
        assert!(matches!(
            require_token(Some(String::new())),
            Err(AppError::MissingToken)
        ));
    }

    #[test]
    fn test_token_from_path() {
        assert_eq!(token_from_path("/sub/ABCDEF").unwrap(), "ABCDEF");
        assert_eq!(token_from_path("/sub/ABCDEF/extra").unwrap(), "ABCDEF");
        assert!(token_from_path("/sub/").is_err());
        assert!(token_from_path("/sub").is_err());
        assert!(token_from_path("").is_err());
    }

    #[test]
    fn test_token_from_path_decodes_escapes() {
        assert_eq!(token_from_path("/sub/a%20b").unwrap(), "a b");
        // Plus is literal in a path
        assert_eq!(token_from_path("/sub/a+b").unwrap(), "a+b");
        // An escaped slash splits like a real one
        assert_eq!(token_from_path("/sub/a%2Fb").unwrap(), "a");
    }

    #[test]
    fn test_token_prefix() {
        assert_eq!(token_prefix("ABCDEFGHIJKL"), "ABCDEFGH");
        assert_eq!(token_prefix("ABC"), "ABC");
    }
}
