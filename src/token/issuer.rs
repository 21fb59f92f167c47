use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use tracing::error;

use super::JwtSecret;
use crate::error::AuthError;
use crate::models::claims::Claims;

/// Mints signed, time-bounded tokens.
pub struct TokenIssuer {
    key: EncodingKey,
    header: Header,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &JwtSecret, ttl: Duration) -> Self {
        TokenIssuer {
            key: EncodingKey::from_secret(secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Sign a token for `email` valid from `now` until `now + ttl`.
    pub fn issue(&self, email: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims::new(email, now, self.ttl);

        encode(&self.header, &claims, &self.key).map_err(|e| {
            error!(error = %e, "Failed to encode JWT");
            AuthError::Signing(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{fixtures, TokenVerifier, DEFAULT_TTL_SECONDS};
    use chrono::TimeZone;

    fn issuer(secret: &str) -> TokenIssuer {
        TokenIssuer::new(
            &JwtSecret::new(secret).unwrap(),
            Duration::seconds(DEFAULT_TTL_SECONDS),
        )
    }

    #[test]
    fn test_issue_returns_three_segments() {
        let token = issuer("TestSecret")
            .issue("test@example.com", Utc::now())
            .unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_issue_reproduces_fixture_token() {
        let now = Utc.timestamp_opt(fixtures::NOT_BEFORE, 0).unwrap();
        let token = issuer(fixtures::TOKEN_SECRET)
            .issue(fixtures::EMAIL, now)
            .unwrap();

        assert_eq!(token, fixtures::TOKEN);
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let secret = JwtSecret::new("TestSecret").unwrap();
        let issuer = TokenIssuer::new(&secret, Duration::hours(2));
        let verifier = TokenVerifier::new(&secret);

        for ts in [0_i64, 1_560_097_190, 1_900_000_000] {
            let now = Utc.timestamp_opt(ts, 0).unwrap();
            let token = issuer.issue("roundtrip@example.com", now).unwrap();
            let claims = verifier.verify(&token, now).unwrap();

            assert_eq!(
                claims,
                Claims {
                    expires_at: ts + 2 * 60 * 60,
                    issued_at: ts,
                    email: "roundtrip@example.com".to_string(),
                }
            );
        }
    }

    #[test]
    fn test_different_secrets_produce_different_signatures() {
        let now = Utc::now();
        let a = issuer("secret-A").issue("a@example.com", now).unwrap();
        let b = issuer("secret-B").issue("a@example.com", now).unwrap();

        assert_ne!(a.rsplit('.').next(), b.rsplit('.').next());
    }
}
