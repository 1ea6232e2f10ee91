use std::time::Duration;

use bytes::Bytes;
use fetch_logging::{fetch_info, fetch_warn};
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use crate::{FailureKind, TransportError};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/fetch";

/// Response body as it arrives off the wire.
pub type ByteStream = BoxStream<'static, Result<Bytes, TransportError>>;

#[derive(Debug, Clone)]
pub struct TransportSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// Bound on the whole exchange, body included. `None` waits forever.
    pub request_timeout: Option<Duration>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// Sends a payload and hands back the streamed response body.
#[async_trait::async_trait]
pub trait StreamTransport: Send + Sync {
    async fn open(&self, payload: &Value) -> Result<ByteStream, TransportError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        let endpoint = reqwest::Url::parse(&settings.endpoint)
            .map_err(|err| TransportError::new(FailureKind::InvalidEndpoint, err.to_string()))?;

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait::async_trait]
impl StreamTransport for ReqwestTransport {
    async fn open(&self, payload: &Value) -> Result<ByteStream, TransportError> {
        let body = serde_json::to_vec(payload)
            .map_err(|err| TransportError::new(FailureKind::Encode, err.to_string()))?;

        fetch_info!("POST {} ({} byte payload)", self.endpoint, body.len());
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            fetch_warn!("POST {} answered {}", self.endpoint, status);
            return Err(TransportError::http_status(status.as_u16()));
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(map_body_error))
            .boxed())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}

fn map_body_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    TransportError::new(FailureKind::Body, err.to_string())
}
