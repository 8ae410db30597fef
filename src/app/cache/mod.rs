//! Detail cache with request coalescing
//!
//! This module keeps item details fetched during a session so that
//! re-applying filters over the same result set does not repeat network
//! calls, and so that concurrent lookups of one identifier share a single
//! request.
//!
//! # Module Organization
//!
//! - [`manager`] - The cache itself and the [`DetailSource`] seam
//! - [`stats`] - Hit/miss accounting
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use movie_finder::app::{ClientConfig, DetailCache, MovieClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MovieClient::new(ClientConfig::default())?;
//! let cache = DetailCache::new(Arc::new(client));
//!
//! if let Some(detail) = cache.get("tt0113277").await {
//!     println!("{} ({})", detail.title, detail.genre);
//! }
//! println!("{}", cache.stats().await);
//! # Ok(())
//! # }
//! ```

pub mod manager;
pub mod stats;

#[cfg(test)]
pub(crate) mod testing;

pub use manager::{DetailCache, DetailSource};
pub use stats::CacheStats;
