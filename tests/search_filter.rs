//! End-to-end search and filter flow through the public API
//!
//! A fake catalog stands in for the HTTP layer: the primary host is down and
//! the mirror answers search and detail queries from fixed data.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use movie_finder::app::{
    ClientConfig, ConnectionMonitor, ConnectionStatus, DetailCache, FilterCriteria,
    FilterProgress, MonitorConfig, MovieClient, RawResponse, RequestSender, SmartFilter,
};
use movie_finder::errors::{TransportError, TransportResult};

const SEARCH_PAGE: &str = r#"{"Search":[
    {"Title":"Heat","Year":"1995","imdbID":"tt0113277","Type":"movie","Poster":"N/A"},
    {"Title":"The Heat","Year":"2013","imdbID":"tt2404463","Type":"movie","Poster":"N/A"},
    {"Title":"White Heat","Year":"1949","imdbID":"tt0042041","Type":"movie","Poster":"N/A"},
    {"Title":"Heat Wave","Year":"2022","imdbID":"tt7777777","Type":"movie","Poster":"N/A"},
    {"Title":"Heat Stroke","Year":"2001","imdbID":"tt0262001","Type":"movie","Poster":"N/A"},
    {"Title":"Dead Heat","Year":"2002","imdbID":"tt0271003","Type":"movie","Poster":"N/A"},
    {"Title":"Heat and Dust","Year":"1983","imdbID":"tt0085672","Type":"movie","Poster":"N/A"}
],"totalResults":"7","Response":"True"}"#;

#[derive(Debug, Default)]
struct FakeCatalog {
    details: HashMap<String, String>,
    detail_requests: Mutex<HashMap<String, usize>>,
    total_requests: Mutex<usize>,
}

impl FakeCatalog {
    fn new() -> Self {
        let mut details = HashMap::new();
        for (id, genre, rating) in [
            ("tt0113277", "Action, Crime, Drama", "8.3"),
            ("tt2404463", "Action, Comedy, Crime", "6.6"),
            ("tt0042041", "Crime, Drama, Film-Noir", "8.1"),
            ("tt0262001", "Thriller", "4.2"),
            ("tt0271003", "Action, Comedy", "5.1"),
            ("tt0085672", "Drama, Romance", "6.5"),
        ] {
            details.insert(
                id.to_string(),
                format!(
                    r#"{{"Title":"Movie {id}","Year":"2000","Genre":"{genre}","imdbRating":"{rating}","imdbVotes":"1,000","imdbID":"{id}","Type":"movie","Response":"True"}}"#
                ),
            );
        }
        Self {
            details,
            ..Default::default()
        }
    }

    fn detail_requests(&self) -> usize {
        self.detail_requests.lock().unwrap().values().sum()
    }

    fn detail_requests_for(&self, id: &str) -> usize {
        self.detail_requests
            .lock()
            .unwrap()
            .get(id)
            .copied()
            .unwrap_or(0)
    }

    fn total_requests(&self) -> usize {
        *self.total_requests.lock().unwrap()
    }
}

#[async_trait]
impl RequestSender for FakeCatalog {
    async fn send(&self, url: &Url) -> TransportResult<RawResponse> {
        *self.total_requests.lock().unwrap() += 1;

        if url.host_str() == Some("down.test") {
            return Err(TransportError::NetworkUnreachable {
                reason: "connection refused".to_string(),
            });
        }

        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

        if let Some(id) = params.get("i") {
            *self
                .detail_requests
                .lock()
                .unwrap()
                .entry(id.clone())
                .or_insert(0) += 1;
            let body = self.details.get(id).cloned().unwrap_or_else(|| {
                r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#.to_string()
            });
            return Ok(RawResponse::new(200, body));
        }

        match params.get("s").map(String::as_str) {
            Some("heat") => Ok(RawResponse::new(200, SEARCH_PAGE)),
            Some(_) => Ok(RawResponse::new(
                200,
                r#"{"Response":"False","Error":"Movie not found!"}"#,
            )),
            None => Ok(RawResponse::new(400, "")),
        }
    }
}

fn config() -> ClientConfig {
    ClientConfig {
        api_key: "integration".to_string(),
        hosts: vec![
            "https://down.test/".to_string(),
            "https://mirror.test/".to_string(),
        ],
        max_retries: 1,
        retry_base_delay: Duration::from_millis(1),
        retry_max_jitter: Duration::ZERO,
        rate_limit_rps: 10_000,
        ..Default::default()
    }
}

fn client(catalog: &Arc<FakeCatalog>) -> Arc<MovieClient> {
    Arc::new(MovieClient::with_sender(config(), catalog.clone()).unwrap())
}

#[tokio::test]
async fn search_falls_back_to_mirror_and_filters_with_cache() {
    let catalog = Arc::new(FakeCatalog::new());
    let client = client(&catalog);

    let result = client.search("heat", 1).await;
    assert!(result.succeeded);
    assert_eq!(result.total_count, 7);
    assert_eq!(result.items.len(), 7);

    let cache = Arc::new(DetailCache::new(client.clone()));
    let filter = SmartFilter::new(Arc::clone(&cache));

    // 1990 onwards leaves five items; tt7777777 has no details and is kept
    let crime = FilterCriteria::default()
        .with_year_range(1990, 2023)
        .with_genre("crime");
    let mut reports: Vec<FilterProgress> = Vec::new();
    let kept = filter
        .filter_with_progress(&result.items, &crime, |p| reports.push(p))
        .await;

    let ids: Vec<_> = kept.iter().map(|item| item.imdb_id.as_str()).collect();
    assert_eq!(ids, vec!["tt0113277", "tt2404463", "tt7777777"]);
    assert_eq!(
        reports,
        vec![FilterProgress::new(5, 5)],
        "five candidates fit in one batch"
    );
    assert_eq!(catalog.detail_requests(), 5);

    // Re-filtering the same items only retries the missing detail
    let rated = FilterCriteria::default()
        .with_year_range(1990, 2023)
        .with_min_rating(6.0);
    let kept = filter.filter(&result.items, &rated).await;

    let ids: Vec<_> = kept.iter().map(|item| item.imdb_id.as_str()).collect();
    assert_eq!(ids, vec!["tt0113277", "tt2404463", "tt7777777"]);
    assert_eq!(catalog.detail_requests(), 6);
    assert_eq!(catalog.detail_requests_for("tt0113277"), 1);
    assert_eq!(catalog.detail_requests_for("tt7777777"), 2);

    let stats = cache.stats().await;
    assert_eq!(stats.entries, 4);
    assert_eq!(stats.hits, 4);
}

#[tokio::test]
async fn year_only_filter_makes_no_detail_requests() {
    let catalog = Arc::new(FakeCatalog::new());
    let client = client(&catalog);

    let result = client.search("heat", 1).await;
    let filter = SmartFilter::new(Arc::new(DetailCache::new(client.clone())));

    let kept = filter
        .filter(
            &result.items,
            &FilterCriteria::default().with_year_range(1940, 1990),
        )
        .await;

    assert_eq!(kept.len(), 2);
    assert_eq!(catalog.detail_requests(), 0);
}

#[tokio::test]
async fn failed_searches_carry_messages() {
    let catalog = Arc::new(FakeCatalog::new());
    let client = client(&catalog);

    let empty = client.search("   ", 1).await;
    assert!(!empty.succeeded);
    assert_eq!(catalog.total_requests(), 0);

    let missing = client.search("zzzz", 1).await;
    assert!(!missing.succeeded);
    assert!(missing.items.is_empty());
    assert_eq!(missing.error_message.as_deref(), Some("Movie not found!"));
}

#[tokio::test]
async fn offline_monitor_skips_http() {
    let catalog = Arc::new(FakeCatalog::new());
    let client = client(&catalog);
    let monitor = ConnectionMonitor::new(client, MonitorConfig::default());

    monitor.set_online(false).await;
    assert_eq!(monitor.check_connection().await, ConnectionStatus::Offline);
    assert_eq!(catalog.total_requests(), 0);
}
