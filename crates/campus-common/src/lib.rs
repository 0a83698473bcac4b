//! Centralized directory structure management for Campus
//!
//! Directory layout:
//! ```text
//! <config_dir>/campus/
//! ├── config.json      # CampusConfig (backend URL, timeouts)
//! └── access-token     # Persisted session token, absent when logged out
//! ```

mod config;
mod token_file;

pub use config::CampusConfig;
pub use token_file::FileTokenStore;

use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the persisted token.
pub const TOKEN_KEY: &str = "access-token";

/// Get the CAMPUS_HOME directory from environment, platform config dir, or default
pub fn campus_home() -> PathBuf {
    // 1. Check environment variable
    if let Ok(val) = std::env::var("CAMPUS_HOME") {
        return PathBuf::from(val);
    }

    // 2. Platform config directory
    if let Some(dir) = dirs::config_dir() {
        return dir.join("campus");
    }

    // 3. Default fallback
    PathBuf::from("campus_data")
}

/// Configuration file path
pub fn config_path() -> PathBuf {
    campus_home().join("config.json")
}

/// Token file path
pub fn token_path() -> PathBuf {
    campus_home().join(TOKEN_KEY)
}

/// Ensure a single directory exists
pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
        info!("Created directory: {:?}", path);
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_dir(parent)?;
        }
    }
    Ok(())
}
