//! Batched, cache-backed result filtering
//!
//! The year predicate runs first over local data. Only when genre or rating
//! constraints are present does the engine resolve details, in sequential
//! batches whose items are fetched concurrently through the [`DetailCache`].

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info};

use crate::app::cache::DetailCache;
use crate::app::models::SearchItem;
use crate::constants::filter::DEFAULT_BATCH_SIZE;

use super::criteria::FilterCriteria;
use super::progress::FilterProgress;

type ProgressSink<'a> = Option<&'a mut (dyn FnMut(FilterProgress) + Send)>;

/// Keep only items whose leading release year falls inside the range
///
/// Never touches the network.
pub fn filter_basic(items: &[SearchItem], criteria: &FilterCriteria) -> Vec<SearchItem> {
    items
        .iter()
        .filter(|item| criteria.matches_year(item))
        .cloned()
        .collect()
}

/// Filter engine over a shared detail cache
#[derive(Debug, Clone)]
pub struct SmartFilter {
    cache: Arc<DetailCache>,
    batch_size: usize,
}

impl SmartFilter {
    pub fn new(cache: Arc<DetailCache>) -> Self {
        Self {
            cache,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the number of detail lookups run together (minimum 1)
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn cache(&self) -> &Arc<DetailCache> {
        &self.cache
    }

    pub async fn filter(&self, items: &[SearchItem], criteria: &FilterCriteria) -> Vec<SearchItem> {
        self.run(items, criteria, None).await
    }

    /// Like [`filter`](Self::filter), reporting progress after every batch
    ///
    /// The last report is always `(total, total)`.
    pub async fn filter_with_progress<F>(
        &self,
        items: &[SearchItem],
        criteria: &FilterCriteria,
        mut on_progress: F,
    ) -> Vec<SearchItem>
    where
        F: FnMut(FilterProgress) + Send,
    {
        self.run(items, criteria, Some(&mut on_progress)).await
    }

    async fn run(
        &self,
        items: &[SearchItem],
        criteria: &FilterCriteria,
        mut progress: ProgressSink<'_>,
    ) -> Vec<SearchItem> {
        let candidates = filter_basic(items, criteria);
        let total = candidates.len();
        debug!(
            "Year filter kept {}/{} items ({}-{})",
            total,
            items.len(),
            criteria.year_range.min,
            criteria.year_range.max
        );

        if !criteria.has_advanced_filters() || total == 0 {
            if let Some(report) = progress.as_deref_mut() {
                report(FilterProgress::new(total, total));
            }
            return candidates;
        }

        let mut kept = Vec::with_capacity(total);
        let mut processed = 0;

        for batch in candidates.chunks(self.batch_size) {
            let details = join_all(batch.iter().map(|item| self.cache.get(&item.imdb_id))).await;

            for (item, detail) in batch.iter().zip(details) {
                match detail {
                    Some(detail) if !criteria.matches_detail(&detail) => {
                        debug!("Excluding {} ({})", item.imdb_id, item.title);
                    }
                    Some(_) => kept.push(item.clone()),
                    None => {
                        debug!("No details for {}, keeping it", item.imdb_id);
                        kept.push(item.clone());
                    }
                }
            }

            processed += batch.len();
            if let Some(report) = progress.as_deref_mut() {
                report(FilterProgress::new(processed, total));
            }
        }

        info!(
            "Filter kept {}/{} items with {} active constraint(s)",
            kept.len(),
            items.len(),
            criteria.active_filter_count()
        );
        kept
    }
}
