use crate::SwarmError;
use std::future::Future;
use std::time::Duration;
use swarm_core::RunConfig;
use thiserror::Error;
use url::Url;

/// Issues one request against the load target and reports the HTTP status.
///
/// Implementations are shared by every request task, so `get` takes `&self`
/// and must be safe to call concurrently.
pub trait Transport: Send + Sync + 'static {
    fn get(&self) -> impl Future<Output = Result<u16, TransportError>> + Send;
}

/// Failure to obtain any HTTP status from the target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// GET requests through a single pooled `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    target: Url,
}

impl HttpTransport {
    pub fn new(target: Url, timeout: Duration, max_idle: usize) -> Result<Self, SwarmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(max_idle)
            .build()?;
        Ok(Self { client, target })
    }

    pub fn from_config(config: &RunConfig) -> Result<Self, SwarmError> {
        Self::new(config.target.clone(), config.request_timeout, config.users)
    }

    pub fn target(&self) -> &Url {
        &self.target
    }
}

impl Transport for HttpTransport {
    async fn get(&self) -> Result<u16, TransportError> {
        let res = self.client.get(self.target.clone()).send().await?;
        let status = res.status().as_u16();
        // NOTE: The body is drained so the connection goes back to the pool.
        res.bytes().await?;
        Ok(status)
    }
}

impl<T: Transport> Transport for std::sync::Arc<T> {
    fn get(&self) -> impl Future<Output = Result<u16, TransportError>> + Send {
        (**self).get()
    }
}
