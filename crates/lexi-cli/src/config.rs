//! Configuration file support

use lexi_agent::ClientConfig;
use lexi_ai::models::{self, DEFAULT_MODEL_ID};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Request timeout used when neither the file nor the flags set one
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for lexi
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default model to use
    pub model: Option<String>,
    /// API key (alternative to GEMINI_API_KEY)
    pub api_key: Option<String>,
    /// Seconds to wait for a draft before giving up
    pub timeout_secs: Option<u64>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Override for the API base URL
    pub base_url: Option<String>,
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lexi")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for LEXI_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("LEXI_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        tracing::debug!(path = %path.display(), "loading config");
        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Parse config from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        let default_config = Config {
            model: Some(DEFAULT_MODEL_ID.to_string()),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
            ..Default::default()
        };

        default_config.save()?;
        Ok(path)
    }

    /// Build the client settings, letting CLI flags override the file
    pub fn client_config(&self, model: Option<&str>, timeout_secs: Option<u64>) -> ClientConfig {
        let model_id = model
            .or(self.model.as_deref())
            .unwrap_or(DEFAULT_MODEL_ID);
        let mut model = models::resolve_model(model_id);
        if let Some(ref base_url) = self.base_url {
            model.base_url = base_url.clone();
        }

        let timeout = timeout_secs
            .or(self.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        ClientConfig {
            model,
            api_key: self.api_key.clone(),
            timeout: Duration::from_secs(timeout),
            temperature: self.temperature,
        }
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# lexi configuration file
# Place at ~/.config/lexi/config.toml (Linux), ~/Library/Application Support/lexi/config.toml (macOS)
# or %APPDATA%\lexi\config.toml (Windows). LEXI_CONFIG_PATH overrides the location.

# Model to draft with (gemini-2.5-pro, gemini-2.5-flash, ...)
model = "gemini-2.5-pro"

# Seconds to wait for a reply before giving up
timeout_secs = 60

# Sampling temperature (optional)
# temperature = 0.7

# API key (optional - GEMINI_API_KEY in the environment or a .env file is
# recommended instead)
# api_key = "..."
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full() {
        let config = Config::parse(
            r#"
            model = "gemini-2.5-flash"
            api_key = "abc"
            timeout_secs = 15
            temperature = 0.5
            base_url = "http://localhost:9000/v1beta"
            "#,
        )
        .unwrap();
        assert_eq!(config.model.as_deref(), Some("gemini-2.5-flash"));
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.timeout_secs, Some(15));
        assert_eq!(config.temperature, Some(0.5));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        assert!(Config::parse("timeout_secs = \"soon\"").is_err());
    }

    #[test]
    fn test_example_config_parses() {
        let config = Config::parse(example_config()).unwrap();
        assert_eq!(config.model.as_deref(), Some(DEFAULT_MODEL_ID));
        assert_eq!(config.timeout_secs, Some(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn test_client_config_defaults() {
        let client = Config::default().client_config(None, None);
        assert_eq!(client.model.id, DEFAULT_MODEL_ID);
        assert_eq!(client.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(client.api_key, None);
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            model: Some("gemini-2.5-flash".into()),
            timeout_secs: Some(30),
            base_url: Some("http://localhost:9000".into()),
            ..Default::default()
        };
        let client = config.client_config(Some("gemini-2.0-flash"), Some(5));
        assert_eq!(client.model.id, "gemini-2.0-flash");
        assert_eq!(client.model.base_url, "http://localhost:9000");
        assert_eq!(client.timeout, Duration::from_secs(5));

        let client = config.client_config(None, None);
        assert_eq!(client.model.id, "gemini-2.5-flash");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }
}
