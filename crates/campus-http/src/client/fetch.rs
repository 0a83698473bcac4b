//! Main backend client implementation.

use crate::client::config::ClientConfig;
use crate::client::decorator::RequestDecorator;
use crate::client::native_network::NativeNetwork;
use crate::client::policy::ResponsePolicy;
use crate::client::utils::{build_url, is_access_denied_status};
use crate::error::{ApiError, Result};
use crate::traits::ApiNetwork;
use crate::types::{ApiRequest, ApiResponse, Envelope};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// JSON client for the backend.
///
/// Every request passes through the decorators, then the network, then the
/// response policies. There is no retry and no request queue: a transport
/// failure is returned to the caller as is.
#[derive(Clone)]
pub struct ApiClient {
    network: Arc<dyn ApiNetwork>,
    config: Arc<ClientConfig>,
    decorators: Vec<Arc<dyn RequestDecorator>>,
    policies: Vec<Arc<dyn ResponsePolicy>>,
}

impl ApiClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let network = Arc::new(NativeNetwork::from_config(&config)?);
        Ok(Self::with_network(network, config))
    }

    pub fn with_network(network: Arc<dyn ApiNetwork>, config: ClientConfig) -> Self {
        ApiClient {
            network,
            config: Arc::new(config),
            decorators: Vec::new(),
            policies: Vec::new(),
        }
    }

    /// A copy of this client sharing the same network and configuration but
    /// with no decorators or policies.
    pub fn bare(&self) -> Self {
        Self {
            network: self.network.clone(),
            config: self.config.clone(),
            decorators: Vec::new(),
            policies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_decorator(mut self, decorator: impl RequestDecorator) -> Self {
        self.decorators.push(Arc::new(decorator));
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: impl ResponsePolicy) -> Self {
        self.policies.push(Arc::new(policy));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn network(&self) -> &Arc<dyn ApiNetwork> {
        &self.network
    }

    /// Send `request` and map the status.
    ///
    /// 2xx is `Ok`; 401/403 is [`ApiError::Unauthorized`] after the policies
    /// ran; any other status is [`ApiError::Status`] with the envelope
    /// message when the body has one.
    pub async fn fetch(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        for decorator in &self.decorators {
            decorator.decorate(&mut request);
        }

        let url = build_url(&self.config.base_url, &request.path, &request.query)?;
        self.log_request(&url, &request);

        let response = self.network.fetch(&url, request).await?;
        self.log_response(&url, &response);

        for policy in &self.policies {
            policy.inspect(&response);
        }

        if response.is_success() {
            Ok(response)
        } else if is_access_denied_status(response.status) {
            Err(ApiError::Unauthorized(response.status))
        } else {
            Err(ApiError::Status {
                status: response.status,
                message: response.envelope_message(),
            })
        }
    }

    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Envelope<T>> {
        self.fetch(request).await?.envelope()
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>> {
        self.send(ApiRequest::get(path)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::post(path).with_json(body)?).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(ApiRequest::put(path).with_json(body)?).await
    }

    fn log_request(&self, url: &str, request: &ApiRequest) {
        if self.config.enable_logging {
            tracing::debug!(
                "[campus-http] {} {} auth={}",
                request.method,
                url,
                request.authorization().is_some()
            );
        }
    }

    fn log_response(&self, url: &str, response: &ApiResponse) {
        if self.config.enable_logging {
            tracing::debug!(
                "[campus-http] {} -> {} ({} bytes)",
                url,
                response.status,
                response.body.len()
            );
        }
    }
}
