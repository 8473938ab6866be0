pub mod claims;
pub mod errors;
pub mod issuer;
pub mod verifier;

use jsonwebtoken::Algorithm;

pub use claims::Claims;
pub use errors::JwtError;
pub use errors::VerificationError;
pub use issuer::TokenIssuer;
pub use verifier::extract_bearer_token;
pub use verifier::TokenVerifier;

/// The only algorithm tokens are signed and accepted with.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;
