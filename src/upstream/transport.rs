//! HTTP transport capability used by the upstream client.
//!
//! The client only needs "execute a request, get a status and a body". Keeping
//! that behind [`HttpTransport`] lets tests substitute an in-memory double.

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::{Method, StatusCode, Url};
use std::time::Duration;
use tracing::debug;

/// An outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: Url,
}

impl UpstreamRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
        }
    }
}

/// Status plus the outcome of reading the body.
///
/// The body is read separately from executing the request, so reading it can
/// fail even though a status was received.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Result<Vec<u8>, TransportError>,
}

/// Execute a request and hand back its status and body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: UpstreamRequest) -> Result<TransportResponse, TransportError>;
}

/// Settings for the reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

/// Production transport over a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with an explicit request timeout and user agent.
    pub fn new(options: &TransportOptions) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .user_agent(options.user_agent.as_str())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: UpstreamRequest) -> Result<TransportResponse, TransportError> {
        debug!("{} {}", request.method, request.url);

        let response = self
            .client
            .request(request.method, request.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(TransportError::from);

        Ok(TransportResponse { status, body })
    }
}
