use std::num::NonZeroU64;
use std::sync::Arc;

use crate::config::TokenConfig;
use crate::jwt::JwtError;
use crate::jwt::TokenIssuer;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
///
/// Services that only accept tokens use [`TokenVerifier`](crate::TokenVerifier)
/// directly.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

/// Result of successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    /// Signed access token
    pub access_token: String,
}

impl AuthenticationResult {
    /// Token type reported to clients alongside the access token.
    pub const TOKEN_TYPE: &'static str = "Bearer";
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default hashing work factor.
    ///
    /// # Arguments
    /// * `config` - Validated token signing configuration
    pub fn new(config: TokenConfig) -> Self {
        Self::with_password_hasher(config, PasswordHasher::new())
    }

    /// Create an authenticator with an explicitly configured password hasher.
    pub fn with_password_hasher(config: TokenConfig, password_hasher: PasswordHasher) -> Self {
        Self {
            password_hasher,
            token_issuer: TokenIssuer::new(Arc::new(config)),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `id` - Identifier of the identity owning `stored_hash`
    /// * `login` - Login of that identity
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or the hash is unusable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        id: NonZeroU64,
        login: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.generate_token(id, login)?)
    }

    /// Issue a token without password verification.
    ///
    /// Used right after sign-up, when the identity has just been created.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn generate_token(
        &self,
        id: NonZeroU64,
        login: &str,
    ) -> Result<AuthenticationResult, JwtError> {
        let access_token = self.token_issuer.issue(id, login)?;
        Ok(AuthenticationResult { access_token })
    }
}
