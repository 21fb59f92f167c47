use std::env;
use std::fmt;
use std::num::NonZeroU32;

use crate::error::ConfigError;
use crate::token::{JwtSecret, DEFAULT_TTL_SECONDS, MAX_TTL_SECONDS};

/// Process configuration, read once at startup.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub jwt_secret: JwtSecret,
    pub token_ttl: chrono::Duration,
    pub auth_email: String,
    pub auth_password: String,
    pub auth_rate_limit_per_minute: NonZeroU32,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwt_secret = JwtSecret::new(required(&get, "JWT_SECRET")?)?;
        let auth_email = required(&get, "AUTH_EMAIL")?;
        let auth_password = required(&get, "AUTH_PASSWORD")?;

        let ttl_seconds: i64 = parse_or(&get, "JWT_TTL_SECONDS", DEFAULT_TTL_SECONDS)?;
        let token_ttl = Some(ttl_seconds)
            .filter(|secs| (1..=MAX_TTL_SECONDS).contains(secs))
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| ConfigError::Invalid {
                var: "JWT_TTL_SECONDS",
                value: ttl_seconds.to_string(),
            })?;

        let rate_limit: u32 = parse_or(&get, "AUTH_RATE_LIMIT_PER_MINUTE", 5)?;
        let auth_rate_limit_per_minute =
            NonZeroU32::new(rate_limit).ok_or_else(|| ConfigError::Invalid {
                var: "AUTH_RATE_LIMIT_PER_MINUTE",
                value: rate_limit.to_string(),
            })?;

        Ok(AppConfig {
            host: get("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&get, "PORT", 8080)?,
            jwt_secret,
            token_ttl,
            auth_email,
            auth_password,
            auth_rate_limit_per_minute,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("jwt_secret", &self.jwt_secret)
            .field("token_ttl", &self.token_ttl)
            .field("auth_email", &self.auth_email)
            .field("auth_password", &"***")
            .field("auth_rate_limit_per_minute", &self.auth_rate_limit_per_minute)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn required<F>(get: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match get(var) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(var)),
    }
}

fn parse_or<F, T>(get: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match get(var) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        ("JWT_SECRET", "TestSecret"),
        ("AUTH_EMAIL", "wolf@thedoor.com"),
        ("AUTH_PASSWORD", "huff-puff"),
    ];

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.token_ttl.num_seconds(), DEFAULT_TTL_SECONDS);
        assert_eq!(config.auth_rate_limit_per_minute.get(), 5);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.auth_email, "wolf@thedoor.com");
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AppConfig::from_lookup(lookup(&REQUIRED)).unwrap();
        let printed = format!("{:?}", config);

        assert!(!printed.contains("TestSecret"));
        assert!(!printed.contains("huff-puff"));
    }

    #[test]
    fn test_overrides() {
        let mut vars = REQUIRED.to_vec();
        vars.extend([
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("JWT_TTL_SECONDS", "60"),
            ("AUTH_RATE_LIMIT_PER_MINUTE", "30"),
            ("LOG_LEVEL", "debug"),
        ]);
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.token_ttl.num_seconds(), 60);
        assert_eq!(config.auth_rate_limit_per_minute.get(), 30);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_longest_ttl_accepted() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("JWT_TTL_SECONDS", "315360000"));
        let config = AppConfig::from_lookup(lookup(&vars)).unwrap();

        assert_eq!(config.token_ttl.num_seconds(), MAX_TTL_SECONDS);
    }

    #[test]
    fn test_missing_secret_fails() {
        let err = AppConfig::from_lookup(lookup(&REQUIRED[1..])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));

        let mut vars = REQUIRED.to_vec();
        vars[0] = ("JWT_SECRET", "");
        let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_missing_identity_fails() {
        let err = AppConfig::from_lookup(lookup(&REQUIRED[..2])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("AUTH_PASSWORD")));
    }

    #[test]
    fn test_invalid_values_fail() {
        for (var, value) in [
            ("PORT", "eighty"),
            ("JWT_TTL_SECONDS", "0"),
            ("JWT_TTL_SECONDS", "-5"),
            ("JWT_TTL_SECONDS", "315360001"),
            ("JWT_TTL_SECONDS", "9223372036854775807"),
            ("AUTH_RATE_LIMIT_PER_MINUTE", "0"),
        ] {
            let mut vars = REQUIRED.to_vec();
            vars.push((var, value));
            let err = AppConfig::from_lookup(lookup(&vars)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { var: v, .. } if v == var),
                "{var}={value}"
            );
        }
    }
}
