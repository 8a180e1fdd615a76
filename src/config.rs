// src/config.rs
use std::fmt::{self, Debug};
use std::time::Duration;

use thiserror::Error;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const PORT_VAR: &str = "PORT";
pub const TIMEOUT_VAR: &str = "UPSTREAM_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_PORT: u16 = 3005;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set or empty; add it to the environment or a .env file")]
    MissingApiKey,

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process-wide settings, read once at startup and handed to whatever needs them.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub port: u16,
    /// Deadline for one upstream call. `None` leaves the transport default in place.
    pub upstream_timeout: Option<Duration>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("port", &self.port)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::MissingApiKey)?;
        let model = get(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = get(BASE_URL_VAR)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let port = match get(PORT_VAR) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: PORT_VAR,
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let upstream_timeout = match get(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => {
                    return Err(ConfigError::Invalid {
                        key: TIMEOUT_VAR,
                        value: raw,
                        reason: "must be at least 1 second".to_string(),
                    });
                }
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        key: TIMEOUT_VAR,
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            },
            None => None,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            port,
            upstream_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn missing_key_is_fatal() {
        assert_eq!(
            Config::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingApiKey
        );
        assert_eq!(
            Config::from_lookup(lookup(&[(API_KEY_VAR, "   ")])).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn defaults_apply() {
        let cfg = Config::from_lookup(lookup(&[(API_KEY_VAR, "k")])).unwrap();
        assert_eq!(cfg.api_key, "k");
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.upstream_timeout, None);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = Config::from_lookup(lookup(&[
            (API_KEY_VAR, "k"),
            (MODEL_VAR, "gemini-2.0-flash"),
            (BASE_URL_VAR, "http://127.0.0.1:9999/"),
            (PORT_VAR, "8080"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(cfg.model, "gemini-2.0-flash");
        assert_eq!(cfg.base_url, "http://127.0.0.1:9999");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.upstream_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "k"), (PORT_VAR, "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: PORT_VAR, .. }));

        let err = Config::from_lookup(lookup(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: TIMEOUT_VAR, .. }));
    }

    #[test]
    fn debug_hides_the_key() {
        let cfg = Config::from_lookup(lookup(&[(API_KEY_VAR, "super-secret")])).unwrap();
        assert!(!format!("{:?}", cfg).contains("super-secret"));
    }
}
