//! Issuing and validating signed identity assertions.

use crate::error::{AuthError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Default credential validity: one year, matching the original deployment's
/// long fixed window.
pub const DEFAULT_VALIDITY_DAYS: i64 = 365;

/// Identity claims embedded in a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject email.
    pub sub: String,

    /// Expiry as a Unix timestamp (seconds).
    pub exp: i64,
}

/// Issues and validates HS256-signed credentials.
///
/// Cloning is cheap; the service is stateless and safe to share across
/// request handlers.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl TokenService {
    /// Build a service around a shared secret, with the default validity
    /// window.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validity: Duration::days(DEFAULT_VALIDITY_DAYS),
        }
    }

    /// Override the validity window.
    #[must_use]
    pub fn with_validity(mut self, validity: Duration) -> Self {
        self.validity = validity;
        self
    }

    /// Sign a credential asserting the given subject email.
    ///
    /// No side effects beyond generation: nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Signing`] if encoding fails.
    pub fn issue(&self, email: &str) -> Result<String> {
        let claims = Claims {
            sub: email.to_owned(),
            exp: (Utc::now() + self.validity).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify signature and expiry, yielding the embedded claims.
    ///
    /// This never panics past the boundary: absent, malformed, expired, and
    /// signature-mismatched credentials all classify as
    /// [`AuthError::InvalidCredential`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredential`] on any verification failure.
    pub fn validate(&self, credential: &str) -> Result<Claims> {
        decode::<Claims>(credential, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidCredential)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("unit-test-secret")
    }

    #[test]
    fn issue_then_validate_yields_subject() {
        let svc = service();
        let token = svc.issue("guest@example.com").unwrap();
        let claims = svc.validate(&token).unwrap();
        assert_eq!(claims.sub, "guest@example.com");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn garbage_is_invalid() {
        assert_eq!(
            service().validate("not-a-token"),
            Err(AuthError::InvalidCredential)
        );
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = service().issue("guest@example.com").unwrap();
        let other = TokenService::new("a-different-secret");
        assert_eq!(other.validate(&token), Err(AuthError::InvalidCredential));
    }

    #[test]
    fn expired_credential_is_invalid() {
        // Validity far enough in the past to clear the default leeway.
        let svc = service().with_validity(Duration::days(-1));
        let token = svc.issue("guest@example.com").unwrap();
        assert_eq!(svc.validate(&token), Err(AuthError::InvalidCredential));
    }

    #[test]
    fn tampered_payload_is_invalid() {
        let svc = service();
        let token = svc.issue("guest@example.com").unwrap();
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                sub: "admin@example.com".into(),
                exp: Utc::now().timestamp() + 3600,
            },
            &EncodingKey::from_secret(b"attacker"),
        )
        .unwrap();
        let forged_payload: Vec<&str> = forged.split('.').collect();
        parts[1] = forged_payload[1];
        let spliced = parts.join(".");
        assert_eq!(svc.validate(&spliced), Err(AuthError::InvalidCredential));
    }
}
