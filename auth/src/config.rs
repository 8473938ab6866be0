use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Error for rejected token configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("Token signing secret must not be empty")]
    EmptySecret,

    #[error("Token issuer must not be empty")]
    EmptyIssuer,

    #[error("Token expiration must be greater than zero")]
    ZeroExpiration,

    #[error("Token expiration is too large: {0:?}")]
    ExpirationTooLarge(Duration),
}

/// Immutable signing configuration shared by issuer and verifier.
///
/// Validated once at construction; a deployment has exactly one secret and
/// one issuer for the lifetime of the process.
#[derive(Clone)]
pub struct TokenConfig {
    secret: Vec<u8>,
    issuer: String,
    expiration: Duration,
}

impl TokenConfig {
    /// Build a validated token configuration.
    ///
    /// # Arguments
    /// * `secret` - HMAC-SHA256 signing secret
    /// * `issuer` - Fixed issuer string written into and required from every token
    /// * `expiration` - Lifetime of issued tokens
    ///
    /// # Errors
    /// * `EmptySecret` - Secret has no bytes
    /// * `EmptyIssuer` - Issuer is empty
    /// * `ZeroExpiration` - Expiration is zero
    /// * `ExpirationTooLarge` - Expiration does not fit a unix timestamp offset
    pub fn new(
        secret: impl Into<Vec<u8>>,
        issuer: impl Into<String>,
        expiration: Duration,
    ) -> Result<Self, TokenConfigError> {
        let secret = secret.into();
        let issuer = issuer.into();

        if secret.is_empty() {
            return Err(TokenConfigError::EmptySecret);
        }
        if issuer.is_empty() {
            return Err(TokenConfigError::EmptyIssuer);
        }
        if expiration.is_zero() {
            return Err(TokenConfigError::ZeroExpiration);
        }
        if i64::try_from(expiration.as_secs()).is_err() {
            return Err(TokenConfigError::ExpirationTooLarge(expiration));
        }

        Ok(Self {
            secret,
            issuer,
            expiration,
        })
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn expiration(&self) -> Duration {
        self.expiration
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("expiration", &self.expiration)
            .finish()
    }
}
