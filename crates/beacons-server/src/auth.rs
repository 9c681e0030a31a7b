//! Bearer-token middleware and the [`Caller`] extractor.
//!
//! [`require_bearer`] validates the `Authorization: Bearer <jwt>` header
//! and stores the verified claims in the request extensions; handlers that
//! need to know who is calling take a [`Caller`].

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use beacons_core::error::BeaconsError;
use beacons_service::token::{ValidatedClaims, validate_access_token};
use beacons_service::{AuthConfig, AuthError};
use tracing::debug;

use crate::error::ApiError;

pub async fn require_bearer(
    State(config): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).ok_or(AuthError::MissingToken)?;

    let claims = validate_access_token(token, &config).inspect_err(|e| {
        debug!(error = %e, "Rejected bearer token");
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// The verified identity of the caller.
#[derive(Debug, Clone)]
pub struct Caller(pub ValidatedClaims);

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ValidatedClaims>()
            .cloned()
            .map(Caller)
            .ok_or_else(|| {
                ApiError(BeaconsError::Internal(
                    "caller claims missing, bearer middleware not installed".into(),
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
