use async_trait::async_trait;
use auth::VerifiedIdentity;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::handlers::ApiError;

/// Identity placed in the request extensions by the `authenticate` middleware.
///
/// Rejects with 401 when the middleware did not run or did not succeed.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub VerifiedIdentity);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<VerifiedIdentity>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or_else(|| {
                tracing::warn!("No verified identity on request");
                ApiError::unauthorized()
            })
    }
}
