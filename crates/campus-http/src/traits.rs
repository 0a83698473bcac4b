use crate::error::Result;
use crate::types::{ApiRequest, ApiResponse};
use async_trait::async_trait;

/// Abstraction for network operations.
///
/// Implementations return `Ok` for every response that arrived, whatever its
/// status; only transport failures are errors at this layer.
#[async_trait]
pub trait ApiNetwork: Send + Sync + 'static {
    async fn fetch(&self, url: &str, req: ApiRequest) -> Result<ApiResponse>;
}

/// Durable storage for the session token.
///
/// One fixed key holds the raw token string; absence means "logged out".
/// Access is synchronous so a rejected response can revoke the token before
/// control returns to the caller.
pub trait TokenStore: Send + Sync + 'static {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}
