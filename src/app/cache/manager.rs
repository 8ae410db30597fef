//! Deduplicating in-memory detail cache
//!
//! Each identifier maps either to a stored [`ItemDetail`] or to a shared
//! in-flight fetch. Concurrent lookups for the same identifier attach to the
//! same shared future, so at most one request per identifier is outstanding.
//! The fetch future itself moves its result into the store when it
//! finishes, whichever caller happens to drive it.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;
use tracing::debug;

use crate::app::client::MovieClient;
use crate::app::models::ItemDetail;

use super::stats::CacheStats;

/// Where cache misses are resolved
#[async_trait]
pub trait DetailSource: Send + Sync + fmt::Debug {
    /// Fetch details; `None` covers both "not found" and failed requests
    async fn fetch_detail(&self, imdb_id: &str) -> Option<ItemDetail>;
}

#[async_trait]
impl DetailSource for MovieClient {
    async fn fetch_detail(&self, imdb_id: &str) -> Option<ItemDetail> {
        self.get_details(imdb_id).await
    }
}

type SharedFetch = Shared<BoxFuture<'static, Option<Arc<ItemDetail>>>>;

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Arc<ItemDetail>>,
    in_flight: HashMap<String, SharedFetch>,
    /// Bumped by `clear` so fetches started earlier do not repopulate
    epoch: u64,
    stats: CacheStats,
}

/// In-memory detail cache with request coalescing
///
/// Entries never expire and are never evicted; only [`clear`](Self::clear)
/// drops them. Missing details are not cached, so a later lookup retries.
pub struct DetailCache {
    source: Arc<dyn DetailSource>,
    state: Arc<Mutex<CacheState>>,
}

impl fmt::Debug for DetailCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailCache")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl DetailCache {
    pub fn new(source: Arc<dyn DetailSource>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Look up details, fetching them at most once per identifier
    pub async fn get(&self, imdb_id: &str) -> Option<Arc<ItemDetail>> {
        let fetch = {
            let mut state = self.state.lock().await;

            if let Some(detail) = state.entries.get(imdb_id).cloned() {
                state.stats.hits += 1;
                debug!("Detail cache hit for {}", imdb_id);
                return Some(detail);
            }

            match state.in_flight.get(imdb_id).cloned() {
                Some(pending) => {
                    state.stats.coalesced += 1;
                    debug!("Joining in-flight detail fetch for {}", imdb_id);
                    pending
                }
                None => {
                    state.stats.misses += 1;
                    let fetch = self.start_fetch(imdb_id.to_string(), state.epoch);
                    state.in_flight.insert(imdb_id.to_string(), fetch.clone());
                    fetch
                }
            }
        };

        fetch.await
    }

    fn start_fetch(&self, imdb_id: String, epoch: u64) -> SharedFetch {
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);

        async move {
            let detail = source.fetch_detail(&imdb_id).await.map(Arc::new);

            let mut state = state.lock().await;
            if state.epoch == epoch {
                state.in_flight.remove(&imdb_id);
                match &detail {
                    Some(detail) => {
                        state.entries.insert(imdb_id, Arc::clone(detail));
                    }
                    None => state.stats.not_found += 1,
                }
            }
            detail
        }
        .boxed()
        .shared()
    }

    /// Stored details without triggering a fetch
    pub async fn peek(&self, imdb_id: &str) -> Option<Arc<ItemDetail>> {
        self.state.lock().await.entries.get(imdb_id).cloned()
    }

    pub async fn contains(&self, imdb_id: &str) -> bool {
        self.state.lock().await.entries.contains_key(imdb_id)
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            entries: state.entries.len(),
            in_flight: state.in_flight.len(),
            ..state.stats
        }
    }

    /// Drop every stored detail and forget in-flight fetches
    ///
    /// Callers already awaiting a fetch still receive its result, but it is
    /// not stored.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.in_flight.clear();
        state.epoch += 1;
        debug!("Detail cache cleared");
    }
}
