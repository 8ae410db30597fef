//! Single-request HTTP sending
//!
//! [`RequestSender`] performs exactly one GET and reports the raw status and
//! body. Retry, timeout and host fallback live one level up in
//! [`ResilientTransport`](super::transport::ResilientTransport), which keeps
//! the sender swappable in tests.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::errors::{ConfigResult, TransportError, TransportResult};

use super::config::ClientConfig;

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a single HTTP GET
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status; only failures to obtain a response are errors.
#[async_trait]
pub trait RequestSender: Send + Sync + fmt::Debug {
    async fn send(&self, url: &Url) -> TransportResult<RawResponse>;
}

/// reqwest-backed sender used in production
#[derive(Debug, Clone)]
pub struct ReqwestSender {
    client: Client,
    connect_timeout: Duration,
}

impl ReqwestSender {
    /// Wrap a client built with the given connect timeout
    pub fn new(client: Client, connect_timeout: Duration) -> Self {
        Self {
            client,
            connect_timeout,
        }
    }

    /// Build a sender with a client configured from `config`
    pub fn from_config(config: &ClientConfig) -> ConfigResult<Self> {
        Ok(Self::new(config.build_http_client()?, config.connect_timeout))
    }

    fn classify(&self, error: reqwest::Error) -> TransportError {
        TransportError::from_reqwest(error, self.connect_timeout)
    }

    /// Get a reference to the underlying HTTP client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl RequestSender for ReqwestSender {
    async fn send(&self, url: &Url) -> TransportResult<RawResponse> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        Ok(RawResponse { status, body })
    }
}
