//! Filesystem-side adapters: platform paths, configuration and the
//! file-backed local storage used by the stores in `raffine-core`.

pub mod config;
pub mod paths;
pub mod storage;

pub use config::AppConfig;
pub use paths::RaffinePaths;
pub use storage::FileStorage;
