use std::sync::Arc;

use auth::TokenVerifier;
use auth::VerificationError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;

/// Verify the bearer token and put the resulting `VerifiedIdentity` into the
/// request extensions.
///
/// Every failure produces the same 401 body; the reason is only logged.
pub async fn authenticate(
    State(verifier): State<Arc<TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(VerificationError::MalformedHeader)
        .and_then(|value| {
            value
                .to_str()
                .map_err(|_| VerificationError::MalformedHeader)
        })
        .and_then(|value| verifier.verify(value))
        .map_err(|err| {
            tracing::warn!(reason = err.reason(), error = %err, "Token verification failed");
            ApiError::unauthorized()
        })?;

    tracing::debug!(
        user_id = identity.id(),
        login = identity.login(),
        "Request authenticated"
    );
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}
