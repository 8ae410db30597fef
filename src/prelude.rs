//! Prelude module for Movie Finder Library
//!
//! This module re-exports the most commonly used items from the library,
//! providing a convenient way to import everything needed for typical usage
//! with a single `use movie_finder::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use movie_finder::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = AppConfig::load(None).await?;
//!     let client = Arc::new(MovieClient::new(config.client_config(None))?);
//!     let filter = SmartFilter::new(Arc::new(DetailCache::new(client.clone())));
//!
//!     let result = client.search("alien", 1).await;
//!     let criteria = FilterCriteria::default().with_min_rating(8.0);
//!     let kept = filter.filter(&result.items, &criteria).await;
//!     println!("{} highly rated", kept.len());
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Essential app components that are used in most integrations
pub use crate::app::{
    // Client
    ClientConfig,
    MovieClient,
    // Data types
    ItemDetail,
    SearchItem,
    SearchResult,
    // Cache and filtering
    DetailCache,
    FilterCriteria,
    FilterProgress,
    SmartFilter,
    // Connectivity
    ConnectionMonitor,
    ConnectionStatus,
    MonitorConfig,
};

pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{DEFAULT_API_KEY, ENV_API_KEY, USER_AGENT};

pub use std::sync::Arc;

pub use tokio;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        let _client_config = ClientConfig::default();
        let _monitor_config = MonitorConfig::default();
        let _criteria = FilterCriteria::default();

        assert_eq!(ENV_API_KEY, "OMDB_API_KEY");
        assert!(USER_AGENT.contains("Movie-Finder"));
    }

    #[tokio::test]
    async fn test_prelude_integration_pattern() {
        let client = Arc::new(MovieClient::new(ClientConfig::default()).unwrap());
        let cache = Arc::new(DetailCache::new(client));
        let filter = SmartFilter::new(Arc::clone(&cache));

        let kept = filter.filter(&[], &FilterCriteria::default()).await;
        assert!(kept.is_empty());
        assert!(cache.is_empty().await);
    }
}
