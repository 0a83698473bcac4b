use campus_http::client::{ClientConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// Persisted client configuration.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CampusConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub enable_request_logging: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout_ms() -> u64 {
    30000
}

impl Default for CampusConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            enable_request_logging: false,
        }
    }
}

impl CampusConfig {
    /// Load from the default location, then apply `CAMPUS_API_URL`.
    pub fn load() -> Self {
        let mut config = Self::load_from(&crate::config_path());
        if let Ok(url) = std::env::var("CAMPUS_API_URL") {
            if !url.trim().is_empty() {
                config.api_base_url = url;
            }
        }
        config
    }

    /// Load from `path`; a missing, empty or corrupt file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config file at {:?}: {}", path, e);
                return Self::default();
            }
        };

        if content.trim().is_empty() {
            warn!("Config file is empty, using default config");
            return Self::default();
        }

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to parse config ({}), using default. File may be corrupted.",
                    e
                );
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        crate::ensure_parent(path)?;
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&crate::config_path())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base_url.clone(),
            request_timeout_ms: self.request_timeout_ms,
            enable_logging: self.enable_request_logging,
            ..ClientConfig::default()
        }
    }
}
