//! Mapping of [`BeaconsError`] onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use beacons_core::error::BeaconsError;
use beacons_service::AuthError;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Error body returned by every failing request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Machine-readable kind, e.g. `not_found`.
    #[schema(value_type = String)]
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError(pub BeaconsError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<BeaconsError> for ApiError {
    fn from(err: BeaconsError) -> Self {
        Self(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            BeaconsError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            BeaconsError::AlreadyExists { .. } => (StatusCode::CONFLICT, "already_exists"),
            BeaconsError::InvalidDelete { .. } => (StatusCode::BAD_REQUEST, "invalid_delete"),
            BeaconsError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation"),
            BeaconsError::AuthenticationFailed { .. } => {
                (StatusCode::UNAUTHORIZED, "unauthenticated")
            }
            BeaconsError::AuthorizationDenied { .. } => (StatusCode::FORBIDDEN, "forbidden"),
            BeaconsError::Database(_) | BeaconsError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();

        let message = if status.is_server_error() {
            error!(error = %self.0, "Request failed");
            "internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorBody { error: kind, message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: BeaconsError) -> StatusCode {
        ApiError(err).into_response().status()
    }

    #[test]
    fn maps_error_variants_to_status_codes() {
        assert_eq!(
            status_of(BeaconsError::not_found("registration", "x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(BeaconsError::AlreadyExists {
                entity: "account_holder".into()
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(BeaconsError::InvalidDelete {
                path_id: "a".into(),
                body_id: "b".into()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(BeaconsError::validation("hexId must not be blank")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AuthError::MissingToken.into()),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AuthError::MissingRole("UPDATE_RECORDS".into()).into()),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_of(BeaconsError::Database("connection reset".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
