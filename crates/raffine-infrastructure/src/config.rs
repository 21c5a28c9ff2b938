//! Application configuration.
//!
//! Loaded from `config.toml` in the config directory, then overridden by
//! environment variables:
//!
//! - `RAFFINE_API_URL`
//! - `RAFFINE_REQUEST_TIMEOUT_SECS`
//! - `RAFFINE_STORAGE_PATH`

use raffine_core::error::{RaffineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths::RaffinePaths;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend, including the `/api` prefix
    pub api_url: String,
    pub request_timeout_secs: u64,
    /// Overrides the default local storage location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            storage_path: None,
        }
    }
}

impl AppConfig {
    /// Loads the config file (if any) and applies environment overrides.
    pub fn load() -> Result<Self> {
        let path = RaffinePaths::config_file()?;
        Self::load_from(&path)?.with_overrides(|key| std::env::var(key).ok())
    }

    /// Reads `path`. A missing or empty file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Applies overrides looked up by environment variable name.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("RAFFINE_API_URL") {
            self.api_url = url;
        }
        if let Some(raw) = lookup("RAFFINE_REQUEST_TIMEOUT_SECS") {
            self.request_timeout_secs = raw.trim().parse().map_err(|e| {
                RaffineError::config(format!("Invalid RAFFINE_REQUEST_TIMEOUT_SECS '{}': {}", raw, e))
            })?;
        }
        if let Some(path) = lookup("RAFFINE_STORAGE_PATH") {
            self.storage_path = Some(PathBuf::from(path));
        }
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The configured storage path, or the platform default.
    pub fn storage_path(&self) -> Result<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Ok(RaffinePaths::storage_file()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "api_url = \"https://raffine.example/api\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.api_url, "https://raffine.example/api");
        assert_eq!(config.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "request_timeout_secs = \"soon\"").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("RAFFINE_API_URL", "http://10.0.0.2:5000/api/"),
            ("RAFFINE_REQUEST_TIMEOUT_SECS", " 5 "),
            ("RAFFINE_STORAGE_PATH", "/tmp/raffine.json"),
        ]);
        let config = AppConfig::default()
            .with_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.2:5000/api");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.storage_path().unwrap(), PathBuf::from("/tmp/raffine.json"));
    }

    #[test]
    fn test_bad_timeout_override() {
        let err = AppConfig::default()
            .with_overrides(|key| (key == "RAFFINE_REQUEST_TIMEOUT_SECS").then(|| "x".to_string()))
            .unwrap_err();
        assert!(matches!(err, RaffineError::Config(_)));
    }
}
