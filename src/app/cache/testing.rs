//! Counting detail source for unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::app::models::ItemDetail;
use crate::constants::NOT_AVAILABLE;

use super::manager::DetailSource;

/// Build a detail record with the fields the filter looks at
pub fn detail(imdb_id: &str, genre: &str, rating: &str) -> ItemDetail {
    let na = || NOT_AVAILABLE.to_string();
    ItemDetail {
        imdb_id: imdb_id.to_string(),
        title: format!("Title {}", imdb_id),
        year: na(),
        rated: na(),
        released: na(),
        runtime: na(),
        genre: genre.to_string(),
        director: na(),
        writer: na(),
        actors: na(),
        plot: na(),
        language: na(),
        country: na(),
        awards: na(),
        poster: na(),
        imdb_rating: rating.to_string(),
        imdb_votes: na(),
        item_type: "movie".to_string(),
        box_office: na(),
    }
}

/// Serves fixed details and counts calls per identifier
#[derive(Debug)]
pub struct CountingSource {
    details: HashMap<String, ItemDetail>,
    delay: Duration,
    calls: Mutex<HashMap<String, usize>>,
    running: AtomicUsize,
    peak_running: AtomicUsize,
}

impl CountingSource {
    pub fn new(details: Vec<ItemDetail>) -> Self {
        Self {
            details: details
                .into_iter()
                .map(|detail| (detail.imdb_id.clone(), detail))
                .collect(),
            delay: Duration::ZERO,
            calls: Mutex::new(HashMap::new()),
            running: AtomicUsize::new(0),
            peak_running: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls_for(&self, imdb_id: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(imdb_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// Highest number of fetches that were running at the same time
    pub fn peak_concurrency(&self) -> usize {
        self.peak_running.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DetailSource for CountingSource {
    async fn fetch_detail(&self, imdb_id: &str) -> Option<ItemDetail> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(imdb_id.to_string())
            .or_insert(0) += 1;

        let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_running.fetch_max(running, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        self.running.fetch_sub(1, Ordering::SeqCst);
        self.details.get(imdb_id).cloned()
    }
}
