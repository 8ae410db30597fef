//! Core application logic for Movie Finder
//!
//! This module contains the main application components: the resilient HTTP
//! client, data models, the deduplicating detail cache, the smart filter
//! engine and the connection monitor.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use movie_finder::app::{ClientConfig, DetailCache, FilterCriteria, MovieClient, SmartFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(MovieClient::new(ClientConfig::default())?);
//!
//! let result = client.search("batman", 1).await;
//! if !result.succeeded {
//!     eprintln!("{}", result.error_message.unwrap_or_default());
//!     return Ok(());
//! }
//!
//! let filter = SmartFilter::new(Arc::new(DetailCache::new(client.clone())));
//! let criteria = FilterCriteria::default()
//!     .with_year_range(1990, 2023)
//!     .with_genre("Action");
//!
//! for item in filter.filter(&result.items, &criteria).await {
//!     println!("{} ({})", item.title, item.year);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod filter;
pub mod models;
pub mod monitor;

// Re-export main public API
pub use cache::{CacheStats, DetailCache, DetailSource};
pub use client::{
    CancelToken, ClientConfig, MovieClient, ProbeOutcome, RawResponse, ReqwestSender,
    RequestOptions, RequestSender, ResilientTransport, RetryPolicy,
};
pub use filter::{filter_basic, FilterCriteria, FilterProgress, SmartFilter, YearRange};
pub use models::{ItemDetail, SearchFailure, SearchItem, SearchResult};
pub use monitor::{
    ConnectionMonitor, ConnectionProbe, ConnectionQuality, ConnectionState, ConnectionStatus,
    MonitorConfig,
};
