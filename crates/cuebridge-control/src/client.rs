//! HTTP client adapter for the mixer API

use async_trait::async_trait;
use std::time::Duration;

use crate::Result;

/// Issues a GET against a fully formed URL.
///
/// Success means the request completed without a transport error. The
/// response status and body are not interpreted.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<()>;
}

/// [`ApiClient`] backed by `reqwest`, with a per-request timeout
pub struct HttpApiClient {
    client: reqwest::Client,
}

impl HttpApiClient {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn get(&self, url: &str) -> Result<()> {
        let resp = self.client.get(url).send().await?;
        tracing::debug!("API responded with HTTP {}", resp.status());
        Ok(())
    }
}
