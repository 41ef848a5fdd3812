//! Runtime configuration read from the environment

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Backend used when neither the build nor the runtime environment names one
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_CHAT_MAX_LENGTH: u32 = 150;

pub const ENV_API_URL: &str = "SOULBUDDY_API_URL";
pub const ENV_CHART_DIR: &str = "SOULBUDDY_CHART_DIR";
pub const ENV_CHAT_MAX_LENGTH: &str = "SOULBUDDY_CHAT_MAX_LENGTH";
pub const ENV_REQUEST_TIMEOUT: &str = "SOULBUDDY_REQUEST_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the backend, without the `/api` prefix
    pub api_base_url: String,
    /// Directory rendered chart SVGs are written to
    pub chart_dir: PathBuf,
    /// Response length hint sent with every chat message
    pub chat_max_length: u32,
    /// No timeout when `None`
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("SOULBUDDY_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            chart_dir: default_chart_dir(),
            chat_max_length: DEFAULT_CHAT_MAX_LENGTH,
            request_timeout: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_API_URL) {
            let url = url.trim();
            if url.is_empty() {
                return Err(ConfigError::Empty { var: ENV_API_URL });
            }
            config.api_base_url = url.to_string();
        }

        if let Some(dir) = lookup(ENV_CHART_DIR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::Empty { var: ENV_CHART_DIR });
            }
            config.chart_dir = PathBuf::from(dir);
        }

        if let Some(value) = lookup(ENV_CHAT_MAX_LENGTH) {
            config.chat_max_length = parse_positive(ENV_CHAT_MAX_LENGTH, &value)? as u32;
        }

        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT) {
            let secs = parse_positive(ENV_REQUEST_TIMEOUT, &value)?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

fn parse_positive(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(u64::from(n)),
        _ => Err(ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        }),
    }
}

fn default_chart_dir() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "soulbuddy", "soulbuddy") {
        proj_dirs.data_dir().join("charts")
    } else {
        // Fallback to current directory
        PathBuf::from("charts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.chat_max_length, DEFAULT_CHAT_MAX_LENGTH);
        assert_eq!(config.request_timeout, None);
        assert!(config.chart_dir.ends_with("charts"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.soulbuddy.example"),
            (ENV_CHART_DIR, "/tmp/soulbuddy"),
            (ENV_CHAT_MAX_LENGTH, "300"),
            (ENV_REQUEST_TIMEOUT, "20"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.soulbuddy.example");
        assert_eq!(config.chart_dir, PathBuf::from("/tmp/soulbuddy"));
        assert_eq!(config.chat_max_length, 300);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(20)));
    }

    #[test]
    fn invalid_numbers_are_errors() {
        let err = Config::from_lookup(lookup(&[(ENV_REQUEST_TIMEOUT, "soon")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                var: ENV_REQUEST_TIMEOUT,
                value: "soon".to_string()
            }
        );
        assert!(Config::from_lookup(lookup(&[(ENV_CHAT_MAX_LENGTH, "0")])).is_err());
        assert!(Config::from_lookup(lookup(&[(ENV_API_URL, "  ")])).is_err());
    }
}
