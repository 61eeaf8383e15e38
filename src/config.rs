//! Client configuration resolved from build-time environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::session::marker::DEFAULT_MARKER_KEY;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_SIGN_IN_PATH: &str = "/sign-in";
pub const DEFAULT_HOME_PATH: &str = "/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub sign_in_path: String,
    pub home_path: String,
    pub marker_key: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_owned(),
            home_path: DEFAULT_HOME_PATH.to_owned(),
            marker_key: DEFAULT_MARKER_KEY.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Build config from a key lookup.
    ///
    /// Optional:
    /// - `SNAPGRAM_API_BASE`: backend base URL, default `/api`
    /// - `SNAPGRAM_SIGN_IN_PATH`: default `/sign-in`
    /// - `SNAPGRAM_HOME_PATH`: default `/`
    /// - `SNAPGRAM_MARKER_KEY`: default `cookieFallback`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a route path that does not start
    /// with `/`, or a blank base URL or marker key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("SNAPGRAM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_owned());
        let api_base = non_blank("SNAPGRAM_API_BASE", api_base.trim_end_matches('/').to_owned())?;
        let sign_in_path = route_path("SNAPGRAM_SIGN_IN_PATH", lookup("SNAPGRAM_SIGN_IN_PATH"), DEFAULT_SIGN_IN_PATH)?;
        let home_path = route_path("SNAPGRAM_HOME_PATH", lookup("SNAPGRAM_HOME_PATH"), DEFAULT_HOME_PATH)?;
        let marker_key = non_blank(
            "SNAPGRAM_MARKER_KEY",
            lookup("SNAPGRAM_MARKER_KEY").unwrap_or_else(|| DEFAULT_MARKER_KEY.to_owned()),
        )?;
        Ok(Self { api_base, sign_in_path, home_path, marker_key })
    }

    /// Build config from values baked in at compile time, falling back to
    /// defaults when they are invalid.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let baked = match key {
                "SNAPGRAM_API_BASE" => option_env!("SNAPGRAM_API_BASE"),
                "SNAPGRAM_SIGN_IN_PATH" => option_env!("SNAPGRAM_SIGN_IN_PATH"),
                "SNAPGRAM_HOME_PATH" => option_env!("SNAPGRAM_HOME_PATH"),
                "SNAPGRAM_MARKER_KEY" => option_env!("SNAPGRAM_MARKER_KEY"),
                _ => None,
            };
            baked.map(str::to_owned)
        })
        .unwrap_or_else(|e| {
            log::warn!("{e}; using default client config");
            Self::default()
        })
    }
}

fn route_path(key: &'static str, raw: Option<String>, default: &str) -> Result<String, ConfigError> {
    let value = raw.unwrap_or_else(|| default.to_owned());
    if value.starts_with('/') { Ok(value) } else { Err(ConfigError::Invalid { key, value }) }
}

fn non_blank(key: &'static str, value: String) -> Result<String, ConfigError> {
    if value.trim().is_empty() { Err(ConfigError::Invalid { key, value }) } else { Ok(value) }
}
