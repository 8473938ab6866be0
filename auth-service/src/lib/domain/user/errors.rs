use thiserror::Error;

/// Error for UserId conversion failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("User ID must be greater than zero, got {0}")]
    NotPositive(i64),
}

/// Error for Login validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login must not be empty")]
    Empty,
}

/// Error for credentials submitted by a client
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("Invalid login: {0}")]
    Login(#[from] LoginError),

    #[error("Password must not be empty")]
    EmptyPassword,
}

/// Top-level error for sign-up and sign-in operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Client input errors
    #[error("Bad credentials")]
    BadCredentials,

    // Conflict errors
    #[error("Login already taken: {0}")]
    LoginTaken(String),

    // Infrastructure errors
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CredentialsError> for UserError {
    fn from(_: CredentialsError) -> Self {
        UserError::BadCredentials
    }
}
