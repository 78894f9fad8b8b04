//! Backend endpoint configuration.
//!
//! The two values are injected at build time (`ROSTER_BACKEND_URL`,
//! `ROSTER_BACKEND_KEY`) — the WASM analogue of server-side required env
//! vars. Both are mandatory; the mount path treats absence as fatal.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use thiserror::Error;

/// Connection settings for the hosted service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Service base URL, without a trailing slash.
    pub backend_url: String,
    /// Public (anonymous) API key sent with every request.
    pub anon_key: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("ROSTER_BACKEND_URL is not set")]
    MissingUrl,
    #[error("ROSTER_BACKEND_KEY is not set")]
    MissingKey,
}

impl Config {
    /// Read the build-time environment.
    ///
    /// # Errors
    ///
    /// Returns an error when either value is missing or blank.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_values(
            option_env!("ROSTER_BACKEND_URL"),
            option_env!("ROSTER_BACKEND_KEY"),
        )
    }

    /// Build from raw optional values; blank counts as missing.
    ///
    /// # Errors
    ///
    /// Returns an error when either value is missing or blank.
    pub fn from_values(url: Option<&str>, key: Option<&str>) -> Result<Self, ConfigError> {
        let url = url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingUrl)?;
        let key = key
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingKey)?;
        Ok(Self {
            backend_url: url.trim_end_matches('/').to_owned(),
            anon_key: key.to_owned(),
        })
    }
}
