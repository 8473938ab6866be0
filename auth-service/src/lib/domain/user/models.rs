use std::fmt;
use std::num::NonZeroU64;

use crate::user::errors::CredentialsError;
use crate::user::errors::LoginError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered identity as persisted by the credential store
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub login: Login,
    pub password_hash: String,
}

/// User unique identifier, assigned by the store and always greater than zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(NonZeroU64);

impl UserId {
    /// Wrap a store-assigned identifier.
    ///
    /// # Errors
    /// * `NotPositive` - Identifier is zero or negative
    pub fn new(id: i64) -> Result<Self, UserIdError> {
        u64::try_from(id)
            .ok()
            .and_then(NonZeroU64::new)
            .map(UserId)
            .ok_or(UserIdError::NotPositive(id))
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }

    pub fn as_non_zero(&self) -> NonZeroU64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Login value type
///
/// Unique across identities; the only rule enforced here is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Login(String);

impl Login {
    /// Create a new valid login.
    ///
    /// # Errors
    /// * `Empty` - Login is an empty string
    pub fn new(login: String) -> Result<Self, LoginError> {
        if login.is_empty() {
            Err(LoginError::Empty)
        } else {
            Ok(Self(login))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password as submitted by a client.
///
/// Never printed, not even through `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated login and password pair used by both sign-up and sign-in
#[derive(Debug, Clone)]
pub struct Credentials {
    pub login: Login,
    pub password: Password,
}

impl Credentials {
    /// Validate raw client input.
    ///
    /// # Errors
    /// * `Login` - Login is empty
    /// * `EmptyPassword` - Password is empty
    pub fn new(login: String, password: String) -> Result<Self, CredentialsError> {
        let login = Login::new(login)?;
        if password.is_empty() {
            return Err(CredentialsError::EmptyPassword);
        }
        Ok(Self {
            login,
            password: Password(password),
        })
    }
}

/// Identity about to be persisted; the store assigns its id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub login: Login,
    pub password_hash: String,
}
