//! Runtime configuration stored in the app data directory
//!
//! The API key is a secret: it is read from the environment first, then
//! from the config file, and it is never baked into the binary. Anything
//! that prints the configuration goes through [`redact_key`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const APP_NAME: &str = "ladle";
const CONFIG_FILE: &str = "config.json";
const LOG_DIR: &str = "logs";

/// Environment variables consulted for the API key, in priority order
pub const KEY_ENV_VARS: [&str; 2] = ["LADLE_API_KEY", "SPOONACULAR_API_KEY"];

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key for the recipe search endpoint. The environment variables
    /// in [`KEY_ENV_VARS`] take precedence over this value.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Search endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_endpoint() -> String {
    crate::api::DEFAULT_ENDPOINT.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
        }
    }
}

impl ApiConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: ApiConfig =
                serde_json::from_str(&content).context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the app data directory
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, content).context("Failed to write config file")?;
        Ok(())
    }

    /// Resolve the effective API key: environment first, then config file
    pub fn resolve_key(&self) -> Option<String> {
        key_from_env().or_else(|| self.api_key.clone())
    }

    /// Effective API key, or an actionable error for the CLI boundary
    pub fn require_key(&self) -> Result<String> {
        self.resolve_key().with_context(|| {
            format!(
                "No API key configured. Set {} or run `ladle config set-key <KEY>`",
                KEY_ENV_VARS[0]
            )
        })
    }
}

fn key_from_env() -> Option<String> {
    KEY_ENV_VARS.iter().find_map(|var| {
        std::env::var(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Mask a key for display: keep a short prefix, drop the rest
pub fn redact_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    if key.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{prefix}****")
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the directory that holds the log file
pub fn get_log_dir() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    let log_dir = app_dir.join(LOG_DIR);
    fs::create_dir_all(&log_dir)?;
    Ok(log_dir)
}

/// Get the application data directory for config and logs
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_points_at_the_public_endpoint() {
        let config = ApiConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.endpoint, crate::api::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_serialization() {
        let config = ApiConfig {
            api_key: Some("abc123".to_string()),
            endpoint: "https://example.test/search".to_string(),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: ApiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.api_key.as_deref(), Some("abc123"));
        assert_eq!(parsed.endpoint, "https://example.test/search");
    }

    #[test]
    fn test_config_partial_json() {
        // Should use defaults for missing fields
        let json = r#"{"api_key": "abc123"}"#;
        let config: ApiConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.endpoint, crate::api::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_empty_json() {
        // Empty object should use all defaults
        let config: ApiConfig = serde_json::from_str("{}").unwrap();

        assert!(config.api_key.is_none());
        assert_eq!(config.endpoint, crate::api::DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_redact_key_keeps_only_a_prefix() {
        assert_eq!(redact_key("abcdef123456"), "abcd****");
        assert_eq!(redact_key("ab"), "****");
        assert_eq!(redact_key(""), "****");
    }
}
