use std::num::NonZeroU64;
use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::Claims;
use super::errors::JwtError;
use super::SIGNING_ALGORITHM;
use crate::config::TokenConfig;

/// Mints HS256-signed access tokens for verified identities.
pub struct TokenIssuer {
    config: Arc<TokenConfig>,
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `config` - Validated signing configuration
    pub fn new(config: Arc<TokenConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret());
        Self {
            config,
            encoding_key,
        }
    }

    /// Issue a token for an identity, valid from now for the configured expiration.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed; this indicates a configuration bug
    pub fn issue(&self, id: NonZeroU64, login: &str) -> Result<String, JwtError> {
        self.issue_at(id, login, Utc::now())
    }

    /// Issue a token as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        id: NonZeroU64,
        login: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let claims = Claims::for_identity(
            id,
            login,
            self.config.issuer(),
            issued_at,
            self.config.expiration(),
        );

        self.sign(&claims)
    }

    /// Sign an arbitrary claim set with the configured secret.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn sign(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(SIGNING_ALGORITHM);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }
}
