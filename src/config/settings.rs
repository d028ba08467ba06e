//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_DATABASE_URL};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    database_url: String,
    pub connect_timeout_secs: u64,
    pub sql_logging: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("sql_logging", &self.sql_logging)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            tracing::warn!("DATABASE_URL not set, using the built-in development database");
            DEFAULT_DATABASE_URL.to_string()
        });

        let connect_timeout_secs = match lookup("DB_CONNECT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                AppError::config(format!(
                    "DB_CONNECT_TIMEOUT_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        let sql_logging = match lookup("DB_SQL_LOGGING") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                AppError::config(format!("DB_SQL_LOGGING must be true or false, got {:?}", raw))
            })?,
            None => false,
        };

        Ok(Self {
            database_url,
            connect_timeout_secs,
            sql_logging,
        })
    }

    /// Connection URL, credentials included.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(config.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
        assert!(!config.sql_logging);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://u:p@db:5433/other"),
            ("DB_CONNECT_TIMEOUT_SECS", "3"),
            ("DB_SQL_LOGGING", "true"),
        ]))
        .unwrap();

        assert_eq!(config.database_url(), "postgres://u:p@db:5433/other");
        assert_eq!(config.connect_timeout(), Duration::from_secs(3));
        assert!(config.sql_logging);
    }

    #[test]
    fn bad_timeout_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("DB_CONNECT_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn bad_logging_flag_is_a_config_error() {
        let err = Config::from_lookup(lookup(&[("DB_SQL_LOGGING", "maybe")])).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn debug_output_hides_credentials() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("jl_password_2025"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
