use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Payload carried inside every issued token.
///
/// Serialized as `{"exp", "nbf", "email"}` in that order. `issued_at` travels
/// as the registered not-before claim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema)]
pub struct Claims {
    /// Expiry (seconds since epoch)
    #[serde(rename = "exp")]
    pub expires_at: i64,
    /// Issued-at, enforced as not-before (seconds since epoch)
    #[serde(rename = "nbf")]
    pub issued_at: i64,
    pub email: String,
}

impl Claims {
    pub fn new(email: &str, issued_at: DateTime<Utc>, ttl: chrono::Duration) -> Self {
        let issued_at = issued_at.timestamp();
        Claims {
            expires_at: issued_at.saturating_add(ttl.num_seconds()),
            issued_at,
            email: email.to_owned(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.expires_at
    }

    pub fn is_not_yet_valid_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() < self.issued_at
    }
}
