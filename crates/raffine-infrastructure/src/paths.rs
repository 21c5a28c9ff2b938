//! Unified path management for raffine configuration and local state.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/raffine/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/raffine/      # Data directory
//! └── local_storage.json       # Persisted session, cart and favorites
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "raffine";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for raffine_core::RaffineError {
    fn from(err: PathError) -> Self {
        raffine_core::RaffineError::config(err.to_string())
    }
}

/// Platform paths for raffine (XDG on Linux, the native locations elsewhere).
pub struct RaffinePaths;

impl RaffinePaths {
    /// Returns the raffine configuration directory, e.g. `~/.config/raffine/`.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the raffine data directory, e.g. `~/.local/share/raffine/`.
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default path of the local storage document.
    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("local_storage.json"))
    }
}
