//! Email/password checks for `POST /auth`.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::utils::auth::{hash_password, verify_password};

/// Backing user store. Swap in a real datastore by implementing this.
pub trait CredentialStore: Send + Sync {
    fn verify(&self, email: &str, password: &str) -> bool;
}

/// A single configured identity; only the Argon2 hash of its password is kept.
pub struct StaticCredentialStore {
    email: String,
    password_hash: String,
}

impl StaticCredentialStore {
    pub fn new(email: &str, password: &str) -> Result<Self, ConfigError> {
        let password_hash =
            hash_password(password).map_err(|e| ConfigError::PasswordHash(e.to_string()))?;
        Ok(Self::from_hash(email, password_hash))
    }

    pub fn from_hash(email: &str, password_hash: String) -> Self {
        StaticCredentialStore {
            email: email.to_owned(),
            password_hash,
        }
    }
}

impl CredentialStore for StaticCredentialStore {
    fn verify(&self, email: &str, password: &str) -> bool {
        email == self.email && verify_password(password, &self.password_hash)
    }
}

#[derive(Clone)]
pub struct CredentialChecker {
    store: Arc<dyn CredentialStore>,
}

impl CredentialChecker {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        CredentialChecker { store }
    }

    pub fn check(&self, email: &str, password: &str) -> bool {
        if email.is_empty() || password.is_empty() {
            return false;
        }
        self.store.verify(email, password)
    }
}
