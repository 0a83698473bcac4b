pub mod client;
pub mod error;
pub mod store;
pub mod traits;
pub mod types;

pub use client::{ApiClient, ClientConfig};
pub use error::{ApiError, Result};
pub use store::MemoryTokenStore;
pub use traits::{ApiNetwork, TokenStore};
pub use types::{ApiRequest, ApiResponse, Envelope};
