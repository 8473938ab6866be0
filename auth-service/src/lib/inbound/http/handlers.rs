use auth::AuthenticationResult;
use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::Credentials;
use crate::user::errors::UserError;

pub mod sign_in;
pub mod sign_up;

pub const BAD_CREDENTIALS: &str = "Bad credentials";
pub const LOGIN_TAKEN: &str = "Login already taken";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { error: message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::BadCredentials => ApiError::Unauthorized(BAD_CREDENTIALS.to_string()),
            UserError::LoginTaken(_) => ApiError::Conflict(LOGIN_TAKEN.to_string()),
            UserError::InvalidUserId(_) | UserError::Storage(_) | UserError::Internal(_) => {
                tracing::error!(error = %err, "Request failed with internal error");
                ApiError::InternalServerError(INTERNAL_SERVER_ERROR.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Form body shared by sign-up and sign-in (`login`, `password`).
///
/// Missing fields read as empty and are rejected as bad credentials.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    login: String,
    #[serde(default)]
    password: String,
}

impl CredentialsForm {
    /// Validate the submitted form.
    ///
    /// A body that is not a form at all is treated like empty credentials.
    pub fn parse(
        form: Result<Form<CredentialsForm>, FormRejection>,
    ) -> Result<Credentials, UserError> {
        let Form(body) = form.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Credentials form rejected");
            UserError::BadCredentials
        })?;

        Ok(Credentials::new(body.login, body.password)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub token_type: String,
    pub access_token: String,
}

impl From<&AuthenticationResult> for TokenResponseData {
    fn from(result: &AuthenticationResult) -> Self {
        Self {
            token_type: AuthenticationResult::TOKEN_TYPE.to_string(),
            access_token: result.access_token.clone(),
        }
    }
}
