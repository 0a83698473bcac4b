//! Backend HTTP client implementation.

mod config;
pub mod decorator;
mod fetch;
pub mod native_network;
pub mod policy;
mod utils;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use decorator::{BearerAuth, RequestDecorator};
pub use fetch::ApiClient;
pub use native_network::NativeNetwork;
pub use policy::ResponsePolicy;
pub use utils::*;
