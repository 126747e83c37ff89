//! Configuration management for Plaza.
//!
//! Loads configuration from ${PLAZA_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "PLAZA_API_URL";

/// Environment variable that overrides the log filter.
pub const LOG_ENV: &str = "PLAZA_LOG";

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Plaza configuration and data directories.
    //!
    //! PLAZA_HOME resolution order:
    //! 1. PLAZA_HOME environment variable (if set)
    //! 2. ~/.config/plaza (default)
    //! 3. ./.plaza when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the Plaza home directory.
    pub fn plaza_home() -> PathBuf {
        if let Ok(home) = std::env::var("PLAZA_HOME")
            && !home.trim().is_empty()
        {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".plaza"),
            |h| h.join(".config").join("plaza"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        plaza_home().join("config.toml")
    }

    /// Returns the directory where log files are written.
    pub fn logs_dir() -> PathBuf {
        plaza_home().join("logs")
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the API server.
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
    /// Whether the TUI writes logs to a rolling file.
    pub file: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            file: true,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub log: LogConfig,
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Resolves the API base URL with precedence: env > config > default.
    pub fn resolve_base_url(&self) -> Result<String> {
        self.resolve_base_url_with(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// Resolves the API base URL using an explicit override value
    /// (usually the environment variable or a CLI flag).
    pub fn resolve_base_url_with(&self, override_url: Option<&str>) -> Result<String> {
        if let Some(url) = override_url {
            let trimmed = url.trim();
            if !trimmed.is_empty() {
                validate_url(trimmed)?;
                return Ok(trimmed.trim_end_matches('/').to_string());
            }
        }

        let configured = self.api.base_url.trim();
        if !configured.is_empty() {
            validate_url(configured)?;
            return Ok(configured.trim_end_matches('/').to_string());
        }

        Ok(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Returns the effective log filter: `PLAZA_LOG` env > config.
    pub fn log_filter(&self) -> String {
        std::env::var(LOG_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| self.log.filter.clone())
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid API base URL: {url}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[api]\nbase_url = \"https://plaza.example.com\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.api.base_url, "https://plaza.example.com");
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn test_load_invalid_toml_errors() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[api\nbase_url = ").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }

    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("# Plaza configuration"));
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "").unwrap();

        assert!(Config::init(&config_path).is_err());
    }

    #[test]
    fn test_override_url_wins_over_config() {
        let config = Config {
            api: ApiConfig {
                base_url: "https://configured.example.com".to_string(),
            },
            ..Default::default()
        };
        let url = config
            .resolve_base_url_with(Some("http://127.0.0.1:9999/"))
            .unwrap();
        assert_eq!(url, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_blank_override_falls_back_to_config() {
        let config = Config {
            api: ApiConfig {
                base_url: "https://configured.example.com".to_string(),
            },
            ..Default::default()
        };
        let url = config.resolve_base_url_with(Some("   ")).unwrap();
        assert_eq!(url, "https://configured.example.com");
    }

    #[test]
    fn test_blank_config_falls_back_to_default() {
        let config = Config {
            api: ApiConfig {
                base_url: "  ".to_string(),
            },
            ..Default::default()
        };
        let url = config.resolve_base_url_with(None).unwrap();
        assert_eq!(url, Config::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let config = Config::default();
        assert!(config.resolve_base_url_with(Some("not a url")).is_err());
    }
}
