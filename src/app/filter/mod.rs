//! Result filtering by year, genre and rating
//!
//! Year constraints are answered from search results directly. Genre and
//! minimum-rating constraints need per-item details, which the engine pulls
//! through the shared [`DetailCache`](crate::app::cache::DetailCache) in small
//! batches so that re-applying filters to the same result set stays cheap.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use movie_finder::app::{ClientConfig, DetailCache, FilterCriteria, MovieClient, SmartFilter};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MovieClient::new(ClientConfig::default())?;
//! let result = client.search("heat", 1).await;
//!
//! let filter = SmartFilter::new(Arc::new(DetailCache::new(Arc::new(client))));
//! let criteria = FilterCriteria::default()
//!     .with_genre("Crime")
//!     .with_min_rating(7.5);
//!
//! let kept = filter
//!     .filter_with_progress(&result.items, &criteria, |p| println!("{}", p))
//!     .await;
//! println!("{} of {} kept", kept.len(), result.items.len());
//! # Ok(())
//! # }
//! ```

pub mod criteria;
pub mod engine;
pub mod progress;

pub use criteria::{current_year, FilterCriteria, YearRange};
pub use engine::{filter_basic, SmartFilter};
pub use progress::FilterProgress;
