use std::sync::Arc;

use crate::config::AppConfig;
use crate::credentials::{CredentialChecker, StaticCredentialStore};
use crate::error::ConfigError;
use crate::token::{TokenIssuer, TokenVerifier};

/// Immutable per-process state shared by every worker.
pub struct AppState {
    pub issuer: TokenIssuer,
    pub verifier: TokenVerifier,
    pub credentials: CredentialChecker,
}

impl AppState {
    pub fn new(issuer: TokenIssuer, verifier: TokenVerifier, credentials: CredentialChecker) -> Self {
        AppState {
            issuer,
            verifier,
            credentials,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let store = StaticCredentialStore::new(&config.auth_email, &config.auth_password)?;

        Ok(AppState::new(
            TokenIssuer::new(&config.jwt_secret, config.token_ttl),
            TokenVerifier::new(&config.jwt_secret),
            CredentialChecker::new(Arc::new(store)),
        ))
    }
}
