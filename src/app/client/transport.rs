//! Resilient request execution with timeout, retry and host fallback
//!
//! Requests are tried against each configured host in order (outer loop),
//! with a per-host retry budget (inner loop). Every attempt waits on the
//! client-side rate limiter and is bounded by a timeout. Retryable failures
//! (timeouts, network errors, 5xx) back off exponentially on the same host
//! before moving to the next one. A 4xx aborts the whole operation: a
//! malformed request is malformed on every host.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{clock::DefaultClock, state::InMemoryState, Jitter, Quota, RateLimiter};
use tokio::sync::watch;
use tracing::{debug, warn};
use url::Url;

use crate::errors::{ConfigError, ConfigResult, TransportError, TransportResult};

use super::config::ClientConfig;
use super::http::{RawResponse, ReqwestSender, RequestSender};
use super::retry::RetryPolicy;

type DirectRateLimiter = RateLimiter<governor::state::NotKeyed, InMemoryState, DefaultClock>;

/// Cooperative cancellation shared between a caller and in-flight requests
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, _receiver) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Cancel every request holding a clone of this token
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the token is cancelled
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        let _ = receiver.wait_for(|cancelled| *cancelled).await;
    }
}

/// Per-request overrides of the transport defaults
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub timeout: Option<Duration>,
    pub retry: Option<RetryPolicy>,
    pub cancel: Option<CancelToken>,
}

impl RequestOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// HTTP GET executor with resilience patterns
#[derive(Debug)]
pub struct ResilientTransport {
    sender: Arc<dyn RequestSender>,
    hosts: Vec<Url>,
    retry: RetryPolicy,
    timeout: Duration,
    rate_limiter: DirectRateLimiter,
}

impl ResilientTransport {
    /// Create a transport using the reqwest-backed sender
    pub fn from_config(config: &ClientConfig) -> ConfigResult<Self> {
        let sender = ReqwestSender::from_config(config)?;
        Self::new(Arc::new(sender), config)
    }

    /// Create a transport around an arbitrary sender
    pub fn new(sender: Arc<dyn RequestSender>, config: &ClientConfig) -> ConfigResult<Self> {
        config.validate()?;

        Ok(Self {
            sender,
            hosts: config.base_urls()?,
            retry: config.retry_policy(),
            timeout: config.request_timeout,
            rate_limiter: Self::build_rate_limiter(config.rate_limit_rps)?,
        })
    }

    fn build_rate_limiter(rate_limit_rps: u32) -> ConfigResult<DirectRateLimiter> {
        let rate = NonZeroU32::new(rate_limit_rps).ok_or_else(|| ConfigError::InvalidValue {
            field: "client.rate_limit_rps".to_string(),
            value: rate_limit_rps.to_string(),
            reason: "Rate limit must be non-zero".to_string(),
        })?;
        Ok(RateLimiter::direct(Quota::per_second(rate)))
    }

    /// Candidate hosts in fallback order
    pub fn hosts(&self) -> &[Url] {
        &self.hosts
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Build the request URL for one host
    pub fn build_url(host: &Url, query: &[(&str, &str)]) -> Url {
        let mut url = host.clone();
        url.query_pairs_mut().extend_pairs(query);
        url
    }

    /// Fetch `query` from the first host that answers successfully
    ///
    /// # Errors
    ///
    /// Returns the first terminal error (`HttpClientError`, `Cancelled`), or
    /// the last retryable error once every host has exhausted its budget.
    pub async fn fetch(
        &self,
        query: &[(&str, &str)],
        options: &RequestOptions,
    ) -> TransportResult<RawResponse> {
        let retry = options.retry.unwrap_or(self.retry);
        let timeout = options.timeout.unwrap_or(self.timeout);
        let cancel = options.cancel.as_ref();
        let mut last_error = None;

        for (host_index, host) in self.hosts.iter().enumerate() {
            let url = Self::build_url(host, query);

            for attempt in 0..retry.attempts_per_host() {
                if attempt > 0 {
                    let delay = retry.next_delay(attempt - 1);
                    debug!("Backing off {}ms before retrying {}", delay.as_millis(), host);
                    Self::sleep(delay, cancel).await?;
                }

                match self.attempt(&url, timeout, cancel).await {
                    Ok(response) => {
                        if host_index > 0 || attempt > 0 {
                            debug!(
                                "Request succeeded on host {} after {} retries",
                                host, attempt
                            );
                        }
                        return Ok(response);
                    }
                    Err(error) if error.is_retryable() => {
                        warn!(
                            "Request to {} failed (attempt {}/{}): {}",
                            host,
                            attempt + 1,
                            retry.attempts_per_host(),
                            error
                        );
                        last_error = Some(error);
                    }
                    Err(error) => {
                        debug!("Aborting request after terminal error: {}", error);
                        return Err(error);
                    }
                }
            }

            if host_index + 1 < self.hosts.len() {
                warn!("Host {} exhausted its retry budget, falling back", host);
            }
        }

        Err(last_error.unwrap_or_else(|| TransportError::NetworkUnreachable {
            reason: "no hosts configured".to_string(),
        }))
    }

    /// One bounded attempt against one URL
    async fn attempt(
        &self,
        url: &Url,
        timeout: Duration,
        cancel: Option<&CancelToken>,
    ) -> TransportResult<RawResponse> {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(TransportError::Cancelled);
        }

        self.rate_limiter
            .until_ready_with_jitter(Jitter::up_to(Duration::from_millis(50)))
            .await;

        let request = async {
            match tokio::time::timeout(timeout, self.sender.send(url)).await {
                Ok(Ok(response)) if response.is_success() => Ok(response),
                Ok(Ok(response)) => Err(TransportError::from_status(response.status)),
                Ok(Err(error)) => Err(error),
                Err(_) => Err(TransportError::Timeout {
                    millis: timeout.as_millis() as u64,
                }),
            }
        };

        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(TransportError::Cancelled),
                result = request => result,
            },
            None => request.await,
        }
    }

    async fn sleep(delay: Duration, cancel: Option<&CancelToken>) -> TransportResult<()> {
        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(TransportError::Cancelled),
                _ = tokio::time::sleep(delay) => Ok(()),
            },
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }
}
