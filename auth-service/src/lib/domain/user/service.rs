use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::AuthenticationResult;
use auth::Authenticator;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for sign-up and sign-in.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuing
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    /// Hash on the blocking pool; Argon2 is CPU-bound.
    async fn hash_password(&self, password: Password) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);

        tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
            .await
            .map_err(|e| UserError::Internal(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, credentials: Credentials) -> Result<AuthenticationResult, UserError> {
        // Latency shortcut only; the store's unique index decides races.
        if self
            .repository
            .find_by_login(&credentials.login)
            .await?
            .is_some()
        {
            return Err(UserError::LoginTaken(credentials.login.to_string()));
        }

        let password_hash = self.hash_password(credentials.password).await?;

        let user = self
            .repository
            .create(NewUser {
                login: credentials.login,
                password_hash,
            })
            .await
            .map_err(|e| match e {
                UserError::LoginTaken(login) => UserError::LoginTaken(login),
                other => UserError::Internal(other.to_string()),
            })?;

        tracing::info!(user_id = %user.id, login = %user.login, "User signed up");

        self.authenticator
            .generate_token(user.id.as_non_zero(), user.login.as_str())
            .map_err(|e| UserError::Internal(format!("Token generation failed: {}", e)))
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<AuthenticationResult, UserError> {
        let user = match self.repository.find_by_login(&credentials.login).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(UserError::BadCredentials),
            Err(e) => return Err(UserError::Internal(e.to_string())),
        };

        let authenticator = Arc::clone(&self.authenticator);
        let password = credentials.password;
        let user_id = user.id;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(
                password.expose(),
                &user.password_hash,
                user.id.as_non_zero(),
                user.login.as_str(),
            )
        })
        .await
        .map_err(|e| UserError::Internal(format!("Password verification task failed: {}", e)))?;

        match result {
            Ok(result) => {
                tracing::info!(user_id = %user_id, "User signed in");
                Ok(result)
            }
            Err(AuthenticationError::InvalidCredentials) => Err(UserError::BadCredentials),
            Err(AuthenticationError::JwtError(e)) => Err(UserError::Internal(format!(
                "Token generation failed: {}",
                e
            ))),
        }
    }
}
