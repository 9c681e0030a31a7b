//! Authentication configuration.

use serde::Deserialize;

/// Configuration for bearer-token authentication.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// PEM-encoded Ed25519 public key for JWT verification.
    pub jwt_public_key_pem: String,
    /// PEM-encoded Ed25519 private key for JWT signing. Only needed by
    /// tooling that issues tokens; the server never signs.
    pub jwt_private_key_pem: String,
    /// Expected JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Lifetime in seconds of tokens issued by [`issue_access_token`](crate::token::issue_access_token).
    pub access_token_lifetime_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_public_key_pem: String::new(),
            jwt_private_key_pem: String::new(),
            jwt_issuer: "beacons".into(),
            access_token_lifetime_secs: 900,
        }
    }
}
