//! Client configuration.

use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const API_KEY_VAR: &str = "LUMA_API_KEY";
pub const BASE_URL_VAR: &str = "LUMA_BASE_URL";
pub const TIMEOUT_VAR: &str = "LUMA_TIMEOUT_SECS";

/// Connection settings for `LumaClient`. Fixed once the client is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LumaConfig {
    pub api_key: String,
    pub base_url: String,
    /// Bound on a whole request/response cycle. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl LumaConfig {
    pub const BASE_URL: &'static str = "https://api.lu.ma/v1";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::BASE_URL.to_string(),
            timeout: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|url| !url.trim().is_empty()) {
            config.base_url = base_url;
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: TIMEOUT_VAR,
                value: raw.clone(),
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}
