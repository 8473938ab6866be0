pub mod argon2;
pub mod errors;

pub use self::argon2::PasswordHasher;
pub use self::argon2::WorkFactor;
pub use errors::PasswordError;
