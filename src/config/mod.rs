//! Configuration file support for wanderpal
//!
//! Loads config from ~/.wanderpal/config.toml

use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for the wanderpal client
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Base URL of the Wanderpal backend
    pub backend_url: Option<String>,

    /// Database URL (sqlite)
    pub database_url: Option<String>,

    /// Seconds between chat result polls
    pub poll_interval_secs: Option<u64>,

    /// Overall deadline for a poll series, in seconds
    pub poll_deadline_secs: Option<u64>,

    /// Default latitude for trending lookups
    pub latitude: Option<f64>,

    /// Default longitude for trending lookups
    pub longitude: Option<f64>,
}

impl Config {
    /// Load config from ~/.wanderpal/config.toml
    pub fn load() -> Self {
        let path = config_path();

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Get a value with fallback to environment variable
    pub fn get_or_env(&self, field: Option<&String>, env_var: &str) -> Option<String> {
        field.cloned().or_else(|| std::env::var(env_var).ok())
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Get the wanderpal data directory (~/.wanderpal)
pub fn data_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_default().join(".wanderpal")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.backend_url.is_none());
        assert!(config.poll_interval_secs.is_none());
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().contains(".wanderpal"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
            backend_url = "http://localhost:8000"
            poll_interval_secs = 3
            latitude = 12.9716
            "#,
        )
        .unwrap();
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:8000"));
        assert_eq!(config.poll_interval_secs, Some(3));
        assert_eq!(config.latitude, Some(12.9716));
    }
}
