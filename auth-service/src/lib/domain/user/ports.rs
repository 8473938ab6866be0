use async_trait::async_trait;
use auth::AuthenticationResult;

use crate::domain::user::models::Credentials;
use crate::domain::user::models::Login;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

/// Port for token issuing operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new identity and issue its first token.
    ///
    /// # Arguments
    /// * `credentials` - Validated login and password
    ///
    /// # Returns
    /// Signed access token for the new identity
    ///
    /// # Errors
    /// * `LoginTaken` - Login already exists (pre-check or store conflict)
    /// * `Storage` - Login lookup failed
    /// * `Internal` - Hashing, persisting or signing failed
    async fn sign_up(&self, credentials: Credentials) -> Result<AuthenticationResult, UserError>;

    /// Authenticate an existing identity and issue a token.
    ///
    /// # Arguments
    /// * `credentials` - Validated login and password
    ///
    /// # Returns
    /// Signed access token
    ///
    /// # Errors
    /// * `BadCredentials` - Unknown login or wrong password, indistinguishably
    /// * `Internal` - Lookup or signing failed
    async fn sign_in(&self, credentials: Credentials) -> Result<AuthenticationResult, UserError>;
}

/// Credential store operations.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new identity; the store assigns its id.
    ///
    /// # Arguments
    /// * `user` - Login and password hash to store
    ///
    /// # Returns
    /// Created user entity with its assigned id
    ///
    /// # Errors
    /// * `LoginTaken` - Unique constraint on login rejected the write
    /// * `Storage` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by login.
    ///
    /// # Arguments
    /// * `login` - Login to search for
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn find_by_login(&self, login: &Login) -> Result<Option<User>, UserError>;
}
