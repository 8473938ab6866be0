use std::num::NonZeroU64;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::Deserialize;

use super::claims::Claims;
use super::errors::VerificationError;
use super::SIGNING_ALGORITHM;
use crate::config::TokenConfig;
use crate::identity::VerifiedIdentity;

const BEARER_SCHEME: &str = "bearer";
const SIGNING_ALGORITHM_NAME: &str = "HS256";

/// Authenticates bearer tokens and validates their claims.
///
/// Verification is pure computation plus a clock read; it never blocks.
pub struct TokenVerifier {
    config: Arc<TokenConfig>,
    decoding_key: DecodingKey,
    validation: Validation,
}

/// Only the part of the JOSE header needed to pin the algorithm.
///
/// Decoded by hand so that algorithms `jsonwebtoken` does not model
/// (notably `none`) are still reported as a mismatch.
#[derive(Deserialize)]
struct DeclaredHeader {
    alg: String,
}

impl TokenVerifier {
    /// Create a new token verifier.
    ///
    /// # Arguments
    /// * `config` - Validated signing configuration shared with the issuer
    pub fn new(config: Arc<TokenConfig>) -> Self {
        let decoding_key = DecodingKey::from_secret(config.secret());

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        // Claims are checked in a fixed order by `validate_claims`.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            config,
            decoding_key,
            validation,
        }
    }

    /// Verify a raw `Authorization` header value.
    ///
    /// # Errors
    /// * `MalformedHeader` - Value is not `Bearer <token>`
    /// * Any error from [`TokenVerifier::verify_token`]
    pub fn verify(&self, header_value: &str) -> Result<VerifiedIdentity, VerificationError> {
        let token = extract_bearer_token(header_value)?;
        self.verify_token(token)
    }

    /// Verify a bare token against the current time.
    pub fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, VerificationError> {
        self.verify_token_at(token, Utc::now().timestamp())
    }

    /// Verify a bare token as if the current time were `now` (unix seconds).
    ///
    /// # Errors
    /// * `InvalidSignature` - Token structure is broken or the HMAC does not match
    /// * `AlgorithmMismatch` - Header declares anything other than HS256
    /// * `Expired` - `exp` is in the past
    /// * `IssuerMismatch` - `iss` is not the configured issuer
    /// * `InvalidSubject` - `id` is zero
    pub fn verify_token_at(
        &self,
        token: &str,
        now: i64,
    ) -> Result<VerifiedIdentity, VerificationError> {
        let algorithm = declared_algorithm(token)?;
        if algorithm != SIGNING_ALGORITHM_NAME {
            return Err(VerificationError::AlgorithmMismatch {
                expected: SIGNING_ALGORITHM_NAME.to_string(),
                found: algorithm,
            });
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| VerificationError::InvalidSignature(e.to_string()))?
            .claims;

        let id = self.validate_claims(&claims, now)?;

        Ok(VerifiedIdentity::new(id, claims.login))
    }

    fn validate_claims(&self, claims: &Claims, now: i64) -> Result<NonZeroU64, VerificationError> {
        if claims.is_expired(now) {
            return Err(VerificationError::Expired);
        }
        if claims.iss != self.config.issuer() {
            return Err(VerificationError::IssuerMismatch(claims.iss.clone()));
        }

        NonZeroU64::new(claims.id).ok_or(VerificationError::InvalidSubject)
    }
}

/// Split `Bearer <token>` into its token part.
///
/// The value must be exactly two space-separated parts and the scheme is
/// matched case-insensitively.
pub fn extract_bearer_token(header_value: &str) -> Result<&str, VerificationError> {
    let mut parts = header_value.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty() =>
        {
            Ok(token)
        }
        _ => Err(VerificationError::MalformedHeader),
    }
}

fn declared_algorithm(token: &str) -> Result<String, VerificationError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(VerificationError::InvalidSignature(format!(
            "expected 3 token segments, got {}",
            segments.len()
        )));
    }

    let header_bytes = URL_SAFE_NO_PAD
        .decode(segments[0])
        .map_err(|e| VerificationError::InvalidSignature(format!("header: {}", e)))?;

    serde_json::from_slice::<DeclaredHeader>(&header_bytes)
        .map(|header| header.alg)
        .map_err(|e| VerificationError::InvalidSignature(format!("header: {}", e)))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::jwt::issuer::TokenIssuer;

    const SECRET: &str = "my_secret_key_at_least_32_bytes_long!";

    fn config(secret: &str, issuer: &str) -> Arc<TokenConfig> {
        Arc::new(
            TokenConfig::new(secret, issuer, Duration::from_secs(3600)).expect("Valid config"),
        )
    }

    fn pair() -> (TokenIssuer, TokenVerifier) {
        let config = config(SECRET, "imager");
        (
            TokenIssuer::new(Arc::clone(&config)),
            TokenVerifier::new(config),
        )
    }

    fn id(value: u64) -> NonZeroU64 {
        NonZeroU64::new(value).expect("Non-zero id")
    }

    fn unsigned_token(header: &str, claims: &str) -> String {
        format!(
            "{}.{}.",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        )
    }

    #[test]
    fn test_round_trip() {
        let (issuer, verifier) = pair();
        let token = issuer.issue(id(42), "alice").expect("Failed to issue");

        let identity = verifier
            .verify(&format!("Bearer {}", token))
            .expect("Token should verify");

        assert_eq!(identity.id(), 42);
        assert_eq!(identity.login(), "alice");
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let (issuer, verifier) = pair();
        let token = issuer.issue(id(1), "alice").expect("Failed to issue");

        assert!(verifier.verify(&format!("bearer {}", token)).is_ok());
        assert!(verifier.verify(&format!("BEARER {}", token)).is_ok());
    }

    #[test]
    fn test_malformed_header() {
        let (issuer, verifier) = pair();
        let token = issuer.issue(id(1), "alice").expect("Failed to issue");

        for value in [
            String::new(),
            token.clone(),
            format!("Basic {}", token),
            format!("Bearer  {}", token),
            format!("Bearer {} extra", token),
            "Bearer ".to_string(),
        ] {
            assert_eq!(
                verifier.verify(&value).unwrap_err(),
                VerificationError::MalformedHeader,
                "header value {:?}",
                value
            );
        }
    }

    #[test]
    fn test_garbage_token_is_invalid_signature() {
        let (_, verifier) = pair();

        for token in ["garbage", "a.b", "a.b.c", "invalid.token.here", "..."] {
            assert!(
                matches!(
                    verifier.verify_token(token),
                    Err(VerificationError::InvalidSignature(_))
                ),
                "token {:?}",
                token
            );
        }
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let issuer = TokenIssuer::new(config("another_secret_entirely", "imager"));
        let (_, verifier) = pair();
        let token = issuer.issue(id(1), "alice").expect("Failed to issue");

        assert!(matches!(
            verifier.verify_token(&token),
            Err(VerificationError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_tampered_payload_is_invalid_signature() {
        let (issuer, verifier) = pair();
        let token = issuer.issue(id(1), "alice").expect("Failed to issue");
        let segments: Vec<&str> = token.split('.').collect();

        let mut payload = segments[1].as_bytes().to_vec();
        for index in 0..payload.len() {
            let original = payload[index];
            payload[index] = if original == b'A' { b'B' } else { b'A' };
            let tampered = format!(
                "{}.{}.{}",
                segments[0],
                String::from_utf8_lossy(&payload),
                segments[2]
            );

            assert!(
                matches!(
                    verifier.verify_token(&tampered),
                    Err(VerificationError::InvalidSignature(_))
                ),
                "payload byte {}",
                index
            );
            payload[index] = original;
        }
    }

    #[test]
    fn test_tampered_signature_is_invalid_signature() {
        let (issuer, verifier) = pair();
        let token = issuer.issue(id(1), "alice").expect("Failed to issue");
        let (signed, signature) = token.rsplit_once('.').expect("Three segments");

        let mut bytes = signature.as_bytes().to_vec();
        for index in 0..bytes.len() {
            let original = bytes[index];
            bytes[index] = if original == b'A' { b'B' } else { b'A' };
            let tampered = format!("{}.{}", signed, String::from_utf8_lossy(&bytes));

            assert!(
                matches!(
                    verifier.verify_token(&tampered),
                    Err(VerificationError::InvalidSignature(_))
                ),
                "signature byte {}",
                index
            );
            bytes[index] = original;
        }
    }

    #[test]
    fn test_none_algorithm_is_rejected() {
        let (_, verifier) = pair();
        let token = unsigned_token(
            r#"{"alg":"none","typ":"JWT"}"#,
            r#"{"login":"alice","id":1,"exp":9999999999,"iss":"imager"}"#,
        );

        assert_eq!(
            verifier.verify_token(&token).unwrap_err(),
            VerificationError::AlgorithmMismatch {
                expected: "HS256".to_string(),
                found: "none".to_string(),
            }
        );
    }

    #[test]
    fn test_other_hmac_algorithm_is_rejected() {
        let (_, verifier) = pair();
        let claims = Claims::for_identity(
            id(1),
            "alice",
            "imager",
            Utc::now(),
            Duration::from_secs(3600),
        );
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS512),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("Failed to encode");

        assert!(matches!(
            verifier.verify_token(&token),
            Err(VerificationError::AlgorithmMismatch { .. })
        ));
    }

    #[test]
    fn test_expired_token() {
        let (issuer, verifier) = pair();
        let issued_at = Utc::now() - chrono::Duration::hours(2);
        let token = issuer
            .issue_at(id(1), "alice", issued_at)
            .expect("Failed to issue");

        assert_eq!(
            verifier.verify_token(&token).unwrap_err(),
            VerificationError::Expired
        );
    }

    #[test]
    fn test_valid_until_expiration_elapses() {
        let (issuer, verifier) = pair();
        let issued_at = Utc::now();
        let token = issuer
            .issue_at(id(1), "alice", issued_at)
            .expect("Failed to issue");
        let expires_at = issued_at.timestamp() + 3600;

        assert!(verifier.verify_token_at(&token, expires_at).is_ok());
        assert_eq!(
            verifier.verify_token_at(&token, expires_at + 1).unwrap_err(),
            VerificationError::Expired
        );
    }

    #[test]
    fn test_wrong_issuer() {
        let issuer = TokenIssuer::new(config(SECRET, "someone-else"));
        let (_, verifier) = pair();
        let token = issuer.issue(id(1), "alice").expect("Failed to issue");

        assert_eq!(
            verifier.verify_token(&token).unwrap_err(),
            VerificationError::IssuerMismatch("someone-else".to_string())
        );
    }

    #[test]
    fn test_zero_id_is_invalid_subject() {
        let (issuer, verifier) = pair();
        let claims = Claims {
            login: "alice".to_string(),
            id: 0,
            exp: Utc::now().timestamp() + 60,
            iss: "imager".to_string(),
        };
        let token = issuer.sign(&claims).expect("Failed to sign");

        assert_eq!(
            verifier.verify_token(&token).unwrap_err(),
            VerificationError::InvalidSubject
        );
    }

    #[test]
    fn test_claim_checks_run_in_order() {
        let (issuer, verifier) = pair();
        let claims = Claims {
            login: "alice".to_string(),
            id: 0,
            exp: Utc::now().timestamp() - 60,
            iss: "someone-else".to_string(),
        };
        let token = issuer.sign(&claims).expect("Failed to sign");

        assert_eq!(
            verifier.verify_token(&token).unwrap_err(),
            VerificationError::Expired
        );
    }

    #[test]
    fn test_missing_claims_fail_semantically() {
        let (issuer, verifier) = pair();
        let claims = Claims {
            login: String::new(),
            id: 0,
            exp: 0,
            iss: String::new(),
        };
        let token = issuer.sign(&claims).expect("Failed to sign");

        assert_eq!(
            verifier.verify_token(&token).unwrap_err(),
            VerificationError::Expired
        );
    }

    fn signed_payload(payload: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &payload,
            &jsonwebtoken::EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .expect("Failed to encode")
    }

    #[test]
    fn test_capitalised_identity_keys_verify() {
        let (_, verifier) = pair();
        let token = signed_payload(serde_json::json!({
            "Login": "alice",
            "ID": 7,
            "exp": Utc::now().timestamp() + 60,
            "iss": "imager",
        }));

        let identity = verifier.verify_token(&token).expect("Token should verify");

        assert_eq!(identity.id(), 7);
        assert_eq!(identity.login(), "alice");
    }

    #[test]
    fn test_issued_tokens_use_capitalised_identity_keys() {
        let (issuer, _) = pair();
        let token = issuer.issue(id(7), "alice").expect("Failed to issue");
        let payload = token.split('.').nth(1).expect("Three segments");
        let decoded = URL_SAFE_NO_PAD.decode(payload).expect("Valid base64");
        let json: serde_json::Value = serde_json::from_slice(&decoded).expect("Valid json");

        assert_eq!(json["Login"], "alice");
        assert_eq!(json["ID"], 7);
        assert!(json.get("login").is_none());
    }
}
