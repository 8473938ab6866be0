use std::num::NonZeroU64;

/// Identity established by a successfully verified token.
///
/// Can only be produced by [`crate::jwt::TokenVerifier`]; it lives in a
/// single request's extensions and is dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    id: NonZeroU64,
    login: String,
}

impl VerifiedIdentity {
    pub(crate) fn new(id: NonZeroU64, login: String) -> Self {
        Self { id, login }
    }

    /// Identifier of the authenticated user, always greater than zero.
    pub fn id(&self) -> u64 {
        self.id.get()
    }

    pub fn non_zero_id(&self) -> NonZeroU64 {
        self.id
    }

    pub fn login(&self) -> &str {
        &self.login
    }
}
