use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;

use super::ApiError;
use super::ApiSuccess;
use super::CredentialsForm;
use super::TokenResponseData;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Authenticate an existing identity and respond with a fresh token.
///
/// Unknown login, wrong password and empty fields all produce the same
/// 401 body.
pub async fn sign_in<AS: AuthServicePort>(
    State(state): State<AppState<AS>>,
    form: Result<Form<CredentialsForm>, FormRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let credentials = CredentialsForm::parse(form)?;

    state
        .auth_service
        .sign_in(credentials)
        .await
        .map_err(ApiError::from)
        .map(|ref result| ApiSuccess::new(StatusCode::CREATED, result.into()))
}
