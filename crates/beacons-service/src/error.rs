//! Authentication error types.

use beacons_core::error::BeaconsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("missing role {0}")]
    MissingRole(String),

    #[error("caller may not act for account holder {0}")]
    NotAccountHolder(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for BeaconsError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken | AuthError::TokenExpired | AuthError::TokenInvalid(_) => {
                BeaconsError::AuthenticationFailed {
                    reason: err.to_string(),
                }
            }
            AuthError::MissingRole(_) | AuthError::NotAccountHolder(_) => {
                BeaconsError::AuthorizationDenied {
                    reason: err.to_string(),
                }
            }
            AuthError::Crypto(msg) => BeaconsError::Internal(msg),
        }
    }
}
