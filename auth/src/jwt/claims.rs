use std::num::NonZeroU64;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by every access token.
///
/// Missing numeric or issuer claims deserialize to their zero value so that
/// they fail the matching semantic check (`Expired`, `IssuerMismatch`,
/// `InvalidSubject`) instead of being reported as a malformed token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Login of the identity the token was issued for
    #[serde(default, rename = "Login", alias = "login")]
    pub login: String,

    /// Identity identifier assigned by the credential store
    #[serde(default, rename = "ID", alias = "id")]
    pub id: u64,

    /// Expiration time (Unix timestamp)
    #[serde(default)]
    pub exp: i64,

    /// Issuer
    #[serde(default)]
    pub iss: String,
}

impl Claims {
    /// Create claims for an identity, expiring `expiration` after `issued_at`.
    ///
    /// # Arguments
    /// * `id` - Identity identifier
    /// * `login` - Identity login
    /// * `issuer` - Deployment issuer string
    /// * `issued_at` - Issue time
    /// * `expiration` - Token lifetime
    pub fn for_identity(
        id: NonZeroU64,
        login: impl Into<String>,
        issuer: impl Into<String>,
        issued_at: DateTime<Utc>,
        expiration: Duration,
    ) -> Self {
        let lifetime = i64::try_from(expiration.as_secs()).unwrap_or(i64::MAX);

        Self {
            login: login.into(),
            id: id.get(),
            exp: issued_at.timestamp().saturating_add(lifetime),
            iss: issuer.into(),
        }
    }

    /// Check if token is expired.
    ///
    /// A token is still valid during the exact second of its expiration.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
