use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsForm;
use super::TokenResponseData;
use super::BAD_CREDENTIALS;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Register a new identity and respond with its first token.
///
/// Empty credentials are a client input error here (422), not an
/// authentication failure.
pub async fn sign_up<AS: AuthServicePort>(
    State(state): State<AppState<AS>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let credentials = CredentialsForm::parse(form).map_err(map_sign_up_error)?;

    state
        .auth_service
        .sign_up(credentials)
        .await
        .map_err(map_sign_up_error)
        .map(|ref result| ApiSuccess::new(StatusCode::CREATED, result.into()))
}

fn map_sign_up_error(err: UserError) -> ApiError {
    match err {
        UserError::BadCredentials => ApiError::UnprocessableEntity(BAD_CREDENTIALS.to_string()),
        other => ApiError::from(other),
    }
}
