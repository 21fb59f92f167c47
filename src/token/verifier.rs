use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use tracing::debug;

use super::JwtSecret;
use crate::error::AuthError;
use crate::models::claims::Claims;

/// Reason a presented token was refused. Only ever logged; callers see
/// [`AuthError::InvalidToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    Malformed,
    BadSignature,
    Expired,
    NotYetValid,
}

/// Checks signature and time bounds of presented tokens.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &JwtSecret) -> Self {
        // Time bounds are checked against the caller's clock in `inspect`.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "nbf"]);

        TokenVerifier {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        self.inspect(token, now).map_err(|reason| {
            debug!(reason = ?reason, "Token rejected");
            AuthError::InvalidToken
        })
    }

    /// Run the validity checks in order: shape, signature, expiry, not-before.
    pub fn inspect(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenRejection> {
        let mut segments = 0;
        for segment in token.split('.') {
            if segment.is_empty() {
                return Err(TokenRejection::Malformed);
            }
            segments += 1;
        }
        if segments != 3 {
            return Err(TokenRejection::Malformed);
        }

        let claims = decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenRejection::BadSignature,
                _ => TokenRejection::Malformed,
            })?;

        if claims.is_expired_at(now) {
            return Err(TokenRejection::Expired);
        }
        if claims.is_not_yet_valid_at(now) {
            return Err(TokenRejection::NotYetValid);
        }

        Ok(claims)
    }
}
