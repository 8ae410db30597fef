//! Movie database client
//!
//! This module provides the typed query client on top of a resilient HTTP
//! transport with timeout, retry, rate limiting and host fallback.
//!
//! The module is organized into specialized components:
//! - `config`: client configuration and reqwest client building
//! - `http`: single-request sending behind the [`RequestSender`] seam
//! - `retry`: exponential backoff policy
//! - `transport`: host fallback and retry loops
//!
//! [`MovieClient`] never surfaces raw transport errors: searches return a
//! [`SearchResult`] carrying a user-facing message, detail lookups return
//! `None`, and probes return `false`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use crate::app::models::{
    is_api_envelope, parse_detail_response, parse_search_response, ItemDetail, SearchFailure,
    SearchResult,
};
use crate::constants::api;
use crate::errors::{ApiError, ApiResult, ConfigResult};

pub mod config;
pub mod http;
pub mod retry;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use http::{RawResponse, ReqwestSender, RequestSender};
pub use retry::RetryPolicy;
pub use transport::{CancelToken, RequestOptions, ResilientTransport};

/// Result of a single connectivity probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub reachable: bool,
    /// Round-trip time of the probe, successful or not
    pub latency: Duration,
}

/// Typed client for the movie database API
#[derive(Debug, Clone)]
pub struct MovieClient {
    transport: Arc<ResilientTransport>,
    api_key: String,
    probe_timeout: Duration,
}

impl MovieClient {
    /// Creates a new MovieClient backed by reqwest
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration is invalid or the HTTP
    /// client cannot be built
    pub fn new(config: ClientConfig) -> ConfigResult<Self> {
        let transport = ResilientTransport::from_config(&config)?;
        Ok(Self::from_parts(transport, &config))
    }

    /// Creates a new MovieClient around a custom request sender
    pub fn with_sender(config: ClientConfig, sender: Arc<dyn RequestSender>) -> ConfigResult<Self> {
        let transport = ResilientTransport::new(sender, &config)?;
        Ok(Self::from_parts(transport, &config))
    }

    fn from_parts(transport: ResilientTransport, config: &ClientConfig) -> Self {
        Self {
            transport: Arc::new(transport),
            api_key: config.api_key.clone(),
            probe_timeout: config.probe_timeout,
        }
    }

    pub fn transport(&self) -> &ResilientTransport {
        &self.transport
    }

    /// Search for movies by title
    pub async fn search(&self, query: &str, page: u32) -> SearchResult {
        self.search_with(query, page, &RequestOptions::default())
            .await
    }

    /// Search with per-request options (timeout, retry, cancellation)
    ///
    /// An empty or whitespace-only query fails immediately without any
    /// network call. Upstream "no results" maps to `succeeded = false` with
    /// the upstream message; transport failures map to a message chosen by
    /// failure category.
    pub async fn search_with(
        &self,
        query: &str,
        page: u32,
        options: &RequestOptions,
    ) -> SearchResult {
        let query = query.trim();
        if query.is_empty() {
            return SearchResult::failure(SearchFailure::EmptyQuery);
        }

        let page = page.max(1).to_string();
        let params = [
            ("apikey", self.api_key.as_str()),
            ("s", query),
            ("page", page.as_str()),
            ("type", api::SEARCH_TYPE),
        ];

        debug!("Searching movies: query={:?} page={}", query, page);

        match self.fetch_search(&params, options).await {
            Ok((items, total)) => {
                debug!("Search returned {} of {} results", items.len(), total);
                SearchResult::success(items, total)
            }
            Err(err) => {
                match &err {
                    ApiError::UpstreamNoResults { message } => {
                        debug!("No results for {:?}: {}", query, message)
                    }
                    other => error!("Error searching movies for {:?}: {}", query, other),
                }
                SearchResult::from(err)
            }
        }
    }

    async fn fetch_search(
        &self,
        params: &[(&str, &str)],
        options: &RequestOptions,
    ) -> ApiResult<(Vec<crate::app::models::SearchItem>, u32)> {
        let response = self.transport.fetch(params, options).await?;
        parse_search_response(&response.body)
    }

    /// Fetch full details for a single item
    ///
    /// Returns `None` both when the upstream does not know the identifier
    /// and when the request failed; only the latter is logged as an error.
    pub async fn get_details(&self, imdb_id: &str) -> Option<ItemDetail> {
        let imdb_id = imdb_id.trim();
        if imdb_id.is_empty() {
            return None;
        }

        match self.fetch_details(imdb_id).await {
            Ok(detail) => Some(detail),
            Err(ApiError::UpstreamNotFound { message }) => {
                debug!("Details not found for {}: {}", imdb_id, message);
                None
            }
            Err(err) => {
                error!("Error fetching details for {}: {}", imdb_id, err);
                None
            }
        }
    }

    /// Fetch details, keeping the failure reason
    pub async fn fetch_details(&self, imdb_id: &str) -> ApiResult<ItemDetail> {
        let params = [
            ("apikey", self.api_key.as_str()),
            ("i", imdb_id),
            ("plot", api::DETAIL_PLOT),
        ];
        debug!("Fetching details for {}", imdb_id);

        let response = self
            .transport
            .fetch(&params, &RequestOptions::default())
            .await?;
        parse_detail_response(&response.body)
    }

    /// Test whether the API is reachable
    pub async fn probe(&self) -> bool {
        self.probe_with_latency().await.reachable
    }

    /// Test reachability and measure the round trip
    ///
    /// Any well-formed API envelope counts as reachable, including a
    /// "no results" answer; only transport failures or a body that is not an
    /// API response count as unreachable.
    pub async fn probe_with_latency(&self) -> ProbeOutcome {
        let params = [
            ("apikey", self.api_key.as_str()),
            ("s", api::PROBE_QUERY),
            ("type", api::SEARCH_TYPE),
        ];
        let options = RequestOptions::default()
            .with_timeout(self.probe_timeout)
            .with_retry(RetryPolicy::none());

        let started = Instant::now();
        let result = self.transport.fetch(&params, &options).await;
        let latency = started.elapsed();

        let reachable = match result {
            Ok(response) => is_api_envelope(&response.body),
            Err(err) => {
                debug!("API connection test failed: {}", err);
                false
            }
        };

        ProbeOutcome { reachable, latency }
    }
}
