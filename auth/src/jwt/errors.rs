use thiserror::Error;

/// Error type for token issuance.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

/// Reason a bearer token was rejected.
///
/// Kept for server-side diagnostics only; every variant maps to the same
/// client-facing unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Authorization header format must be Bearer {{token}}")]
    MalformedHeader,

    #[error("Token is malformed or its signature is invalid: {0}")]
    InvalidSignature(String),

    #[error("Expected {expected} signing method, token specified {found}")]
    AlgorithmMismatch { expected: String, found: String },

    #[error("Token is expired")]
    Expired,

    #[error("Token issuer is wrong: {0}")]
    IssuerMismatch(String),

    #[error("Token subject id must be greater than zero")]
    InvalidSubject,
}

impl VerificationError {
    /// Short stable label for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            VerificationError::MalformedHeader => "malformed_header",
            VerificationError::InvalidSignature(_) => "invalid_signature",
            VerificationError::AlgorithmMismatch { .. } => "algorithm_mismatch",
            VerificationError::Expired => "expired",
            VerificationError::IssuerMismatch(_) => "issuer_mismatch",
            VerificationError::InvalidSubject => "invalid_subject",
        }
    }
}
