//! Configuration management for Syllachat
//!
//! This module handles loading, parsing, and validating configuration
//! from a YAML file and environment variables.

use crate::error::{Result, SyllachatError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding `api.base_url`
pub const API_URL_ENV_VAR: &str = "SYLLACHAT_API_URL";

/// Main configuration structure for Syllachat
///
/// Holds everything the client needs: backend endpoint settings,
/// the profile resolution strategy, and chat behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Profile resolution settings
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Chat behavior settings
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the chatbot backend
    ///
    /// Can be overridden with the `SYLLACHAT_API_URL` environment
    /// variable, which also allows tests to point the client at a mock
    /// server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    ///
    /// Applied to every network call; an elapsed timeout surfaces as a
    /// network error.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

fn default_base_url() -> String {
    "https://chatbot.example.edu".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// Profile resolution configuration
///
/// The backend exposes two ways to resolve the student profile: by the
/// logged-in identity (`/api/me`) or by a stored roll number
/// (`/api/student/{roll}`). The strategy is selected here instead of
/// being baked into the code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Lookup strategy: "by-login" or "by-roll"
    #[serde(default = "default_lookup")]
    pub lookup: String,

    /// Roll number used by the "by-roll" strategy
    #[serde(default)]
    pub roll: Option<String>,
}

fn default_lookup() -> String {
    "by-login".to_string()
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            lookup: default_lookup(),
            roll: None,
        }
    }
}

/// Chat behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Ask the backend to answer with its Gemini integration
    #[serde(default = "default_use_gemini")]
    pub use_gemini: bool,
}

fn default_use_gemini() -> bool {
    true
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            use_gemini: default_use_gemini(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// A missing file is not an error: defaults are used so the client
    /// works out of the box. `SYLLACHAT_API_URL` overrides the
    /// configured base URL when set.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&content)?
        } else {
            tracing::debug!(path = %path, "config file not found, using defaults");
            Config::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV_VAR) {
            if !url.is_empty() {
                tracing::debug!(url = %url, "base URL overridden from environment");
                config.api.base_url = url;
            }
        }

        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is unparseable, the timeout is
    /// zero, or the profile lookup strategy is unknown or incomplete.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api.base_url).map_err(|e| {
            SyllachatError::Config(format!("invalid api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if self.api.timeout_seconds == 0 {
            return Err(SyllachatError::Config(
                "api.timeout_seconds must be at least 1".to_string(),
            )
            .into());
        }

        match self.profile.lookup.as_str() {
            "by-login" => {}
            "by-roll" => {
                if self.profile.roll.as_deref().unwrap_or("").trim().is_empty() {
                    return Err(SyllachatError::Config(
                        "profile.roll is required when profile.lookup is 'by-roll'".to_string(),
                    )
                    .into());
                }
            }
            other => {
                return Err(SyllachatError::Config(format!(
                    "unknown profile.lookup '{}': expected 'by-login' or 'by-roll'",
                    other
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.profile.lookup, "by-login");
        assert!(config.chat.use_gemini);
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
api:
  base_url: http://localhost:8080
  timeout_seconds: 5
profile:
  lookup: by-roll
  roll: "22CS101"
chat:
  use_gemini: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(config.profile.lookup, "by-roll");
        assert_eq!(config.profile.roll.as_deref(), Some("22CS101"));
        assert!(!config.chat.use_gemini);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = "api:\n  base_url: http://localhost:9999\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9999");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.profile.lookup, "by-login");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_lookup_rejected() {
        let mut config = Config::default();
        config.profile.lookup = "by-magic".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_by_roll_requires_roll() {
        let mut config = Config::default();
        config.profile.lookup = "by-roll".to_string();
        assert!(config.validate().is_err());

        config.profile.roll = Some("22CS101".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("definitely-not-a-real-config.yaml").unwrap();
        assert_eq!(config.api.base_url, default_base_url());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api:\n  timeout_seconds: 7\n").unwrap();

        let config = Config::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.api.timeout_seconds, 7);
    }
}
