//! Bearer-token authentication.
//!
//! Any non-empty bearer token is accepted and mapped to the fixed development
//! identity. Token verification belongs to an external identity provider that
//! is not wired in yet.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use memoglobe_core::{defaults, AuthUser, Error};

use crate::error::ApiError;

const UNAUTHORIZED_DETAIL: &str = "Missing or invalid bearer token";

/// Extractor that requires a bearer credential.
///
/// Put it first in a handler's argument list so a bad credential is
/// rejected before the path or body is looked at.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthUser);

/// Pull the token out of an `Authorization` header value. The scheme is
/// matched case-insensitively.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| Error::Unauthorized(UNAUTHORIZED_DETAIL.to_string()))?;

        Ok(RequireAuth(AuthUser {
            user_id: defaults::DEV_USER_ID,
            token: token.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header_value: Option<&str>) -> Result<RequireAuth, ApiError> {
        let mut builder = Request::builder().uri("/v1/notes");
        if let Some(v) = header_value {
            builder = builder.header(header::AUTHORIZATION, v);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        RequireAuth::from_request_parts(&mut parts, &()).await
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer   abc  "), Some("abc"));
        assert_eq!(bearer_token("BEARER abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("Bearer    "), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token(""), None);
    }

    #[tokio::test]
    async fn test_valid_token_yields_dev_user() {
        let RequireAuth(user) = extract(Some("Bearer dev-token")).await.unwrap();
        assert_eq!(user.user_id, defaults::DEV_USER_ID);
        assert_eq!(user.token, "dev-token");
    }

    #[tokio::test]
    async fn test_missing_header_rejected() {
        let err = extract(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(ref msg) if msg == UNAUTHORIZED_DETAIL));
    }

    #[tokio::test]
    async fn test_other_scheme_rejected() {
        let err = extract(Some("Token abc")).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
