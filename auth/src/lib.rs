//! Authentication utilities library
//!
//! Token issuance and verification shared by the auth and image services:
//! - Password hashing (Argon2id, fixed work factor)
//! - HS256 access token issuance and verification
//! - Verified identity handle for request-scoped propagation
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//! use auth::WorkFactor;
//!
//! let hasher = PasswordHasher::with_work_factor(WorkFactor::MINIMAL).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use std::num::NonZeroU64;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use auth::{TokenConfig, TokenIssuer, TokenVerifier};
//!
//! let config = Arc::new(
//!     TokenConfig::new("secret_key_at_least_32_bytes_long!", "imager", Duration::from_secs(3600))
//!         .unwrap(),
//! );
//! let issuer = TokenIssuer::new(Arc::clone(&config));
//! let verifier = TokenVerifier::new(config);
//!
//! let token = issuer.issue(NonZeroU64::new(1).unwrap(), "alice").unwrap();
//! let identity = verifier.verify(&format!("Bearer {}", token)).unwrap();
//! assert_eq!(identity.id(), 1);
//! ```

pub mod authenticator;
pub mod config;
pub mod identity;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use config::TokenConfig;
pub use config::TokenConfigError;
pub use identity::VerifiedIdentity;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::TokenIssuer;
pub use jwt::TokenVerifier;
pub use jwt::VerificationError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::WorkFactor;
