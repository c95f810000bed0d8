//! HTTP implementation of [`BlockSource`].

use crate::{BlockSource, FetchError, JsonRpcRequest};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Connection settings for [`HttpBlockSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RpcClientConfig {
    /// The node's JSON-RPC endpoint.
    pub url: Url,
    /// Deadline for a single request, including reading the body.
    pub timeout: Duration,
}

impl RpcClientConfig {
    /// The default request deadline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a config for `url` with [`Self::DEFAULT_TIMEOUT`].
    pub fn new(url: Url) -> Self {
        Self { url, timeout: Self::DEFAULT_TIMEOUT }
    }

    /// Sets the request deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches blocks from a node over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBlockSource {
    /// Endpoint settings.
    config: RpcClientConfig,
    /// The inner reqwest client.
    inner: Client,
}

impl HttpBlockSource {
    /// Creates a new [`HttpBlockSource`] with its own connection pool.
    pub fn new(config: RpcClientConfig) -> Result<Self, FetchError> {
        let inner = Client::builder().timeout(config.timeout).build().map_err(FetchError::Build)?;
        Ok(Self { config, inner })
    }

    /// Returns the endpoint this source talks to.
    pub const fn url(&self) -> &Url {
        &self.config.url
    }

    /// Posts `eth_getBlockByNumber` for `number` and returns the raw body.
    pub async fn get_block_by_number(&self, number: u64) -> Result<Bytes, FetchError> {
        let request = JsonRpcRequest::block_by_number(number);
        debug!(target: "rpc", number, hex = %request.params.0, "Fetching block");

        let res = self
            .inner
            .post(self.config.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(|source| FetchError::Transport { number, source })?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(FetchError::Status { number, status, body });
        }

        let body = res.bytes().await.map_err(|source| FetchError::Transport { number, source })?;
        trace!(target: "rpc", number, len = body.len(), "Received block response");
        Ok(body)
    }
}

#[async_trait]
impl BlockSource for HttpBlockSource {
    async fn fetch_block(&self, number: u64) -> Result<Bytes, FetchError> {
        self.get_block_by_number(number).await
    }
}
