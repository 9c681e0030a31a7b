//! JWT access token verification and issuance.
//!
//! The identity provider issues EdDSA (Ed25519) tokens carrying the
//! caller's application roles and, for account holders signed in to the
//! public service, the id of their account holder record.

use beacons_core::ids::AccountHolderId;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Role required to change account holder records from the back office.
pub const UPDATE_RECORDS_ROLE: &str = "UPDATE_RECORDS";

/// JWT claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (identity provider user id).
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
    /// Application roles granted to the caller.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Account holder the caller is signed in as, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_holder_id: Option<AccountHolderId>,
}

/// Issue a signed EdDSA (Ed25519) JWT access token.
pub fn issue_access_token(
    subject: &str,
    roles: &[&str],
    account_holder_id: Option<AccountHolderId>,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let lifetime = i64::try_from(config.access_token_lifetime_secs)
        .map_err(|e| AuthError::Crypto(format!("token lifetime: {e}")))?;
    let claims = AccessTokenClaims {
        sub: subject.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + lifetime,
        jti: Uuid::new_v4().to_string(),
        roles: roles.iter().map(ToString::to_string).collect(),
        account_holder_id,
    };

    let key = EncodingKey::from_ed_pem(config.jwt_private_key_pem.as_bytes())
        .map_err(|e| AuthError::Crypto(format!("bad private key: {e}")))?;

    let header = Header::new(Algorithm::EdDSA);
    jsonwebtoken::encode(&header, &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify an EdDSA JWT access token.
pub fn decode_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<AccessTokenClaims, AuthError> {
    let key = DecodingKey::from_ed_pem(config.jwt_public_key_pem.as_bytes())
        .map_err(|e| AuthError::Crypto(format!("bad public key: {e}")))?;

    let mut validation = Validation::new(Algorithm::EdDSA);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<AccessTokenClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}

/// Validated JWT claims: a newtype proving the token was verified.
#[derive(Debug, Clone)]
pub struct ValidatedClaims(pub AccessTokenClaims);

impl ValidatedClaims {
    pub fn has_role(&self, role: &str) -> bool {
        self.0.roles.iter().any(|r| r == role)
    }

    pub fn require_role(&self, role: &str) -> Result<(), AuthError> {
        if self.has_role(role) {
            Ok(())
        } else {
            Err(AuthError::MissingRole(role.to_string()))
        }
    }

    /// Allow the caller to act for `account_holder_id` only when signed in
    /// as that account holder, or when holding the back-office role.
    pub fn ensure_acts_for(&self, account_holder_id: AccountHolderId) -> Result<(), AuthError> {
        if self.0.account_holder_id == Some(account_holder_id)
            || self.has_role(UPDATE_RECORDS_ROLE)
        {
            Ok(())
        } else {
            Err(AuthError::NotAccountHolder(account_holder_id.to_string()))
        }
    }
}

/// Validate a JWT access token (signature, expiry, issuer) and return
/// the verified claims. Stateless; no database lookup is performed.
pub fn validate_access_token(
    token: &str,
    config: &AuthConfig,
) -> Result<ValidatedClaims, AuthError> {
    decode_access_token(token, config).map(ValidatedClaims)
}
