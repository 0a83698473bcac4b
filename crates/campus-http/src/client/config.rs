//! Configuration for the backend HTTP client.

pub const DEFAULT_BASE_URL: &str = "http://localhost:5074/api";

/// Configuration for the backend HTTP client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Connection timeout in seconds.
    pub connection_timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Enable request logging.
    pub enable_logging: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 30000,
            connection_timeout_secs: 30,
            user_agent: concat!("campus/", env!("CARGO_PKG_VERSION")).to_string(),
            enable_logging: false,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
