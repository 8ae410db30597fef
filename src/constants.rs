//! Application constants for Movie Finder
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain.

use std::time::Duration;

/// Environment variable names
pub mod env {
    /// Environment variable holding the OMDb API key
    pub const API_KEY: &str = "OMDB_API_KEY";
}

/// Movie database endpoints and protocol values
pub mod api {
    /// Primary API host
    pub const PRIMARY_HOST: &str = "https://www.omdbapi.com/";

    /// Ordered fallback hosts; the plain-HTTP mirror is the last resort
    pub const FALLBACK_HOSTS: [&str; 2] = ["https://omdbapi.com/", "http://www.omdbapi.com/"];

    /// Public demo key used when no key is configured
    pub const DEFAULT_API_KEY: &str = "8a4c0ad3";

    /// Sentinel the API uses in place of missing values
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Type filter applied to every search
    pub const SEARCH_TYPE: &str = "movie";

    /// Plot verbosity for detail lookups
    pub const DETAIL_PLOT: &str = "full";

    /// Query used by the connectivity probe
    pub const PROBE_QUERY: &str = "test";

    /// Fallback message when the upstream reports no matches without text
    pub const NO_RESULTS_MESSAGE: &str = "No movies found";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "Movie-Finder/0.1.0";

    /// Default per-attempt request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Per-attempt timeout for connectivity probes
    pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum idle connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 8;
}

/// Rate limiting and retry configuration
pub mod limits {
    /// Default client-side rate limit (requests per second)
    pub const DEFAULT_RATE_LIMIT_RPS: u32 = 10;

    /// Retries per host after the first attempt
    pub const MAX_RETRIES: u32 = 2;

    /// Base delay for exponential backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 1000;

    /// Upper bound of the random jitter added to each backoff (milliseconds)
    pub const RETRY_MAX_JITTER_MS: u64 = 250;
}

/// Smart filter constants
pub mod filter {
    /// Items resolved concurrently per detail batch
    pub const DEFAULT_BATCH_SIZE: usize = 5;

    /// Lower bound of the default year range
    pub const MIN_YEAR: i32 = 1900;

    /// Genres offered for filtering
    pub const GENRES: [&str; 22] = [
        "Action",
        "Adventure",
        "Animation",
        "Biography",
        "Comedy",
        "Crime",
        "Documentary",
        "Drama",
        "Family",
        "Fantasy",
        "Film-Noir",
        "History",
        "Horror",
        "Music",
        "Musical",
        "Mystery",
        "Romance",
        "Sci-Fi",
        "Sport",
        "Thriller",
        "War",
        "Western",
    ];
}

/// Connection monitor timing
pub mod monitor {
    use super::Duration;

    /// Probe interval while the API is healthy
    pub const HEALTHY_INTERVAL: Duration = Duration::from_secs(30);

    /// Probe interval after a recent failure
    pub const RECOVERY_INTERVAL: Duration = Duration::from_secs(10);

    /// Delay before probing once the network comes back
    pub const ONLINE_SETTLE_DELAY: Duration = Duration::from_secs(1);

    /// Probes faster than this are classified as good
    pub const FAST_THRESHOLD: Duration = Duration::from_secs(2);
}

/// Logging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use api::{DEFAULT_API_KEY, NOT_AVAILABLE, PRIMARY_HOST};
pub use env::API_KEY as ENV_API_KEY;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use limits::{DEFAULT_RATE_LIMIT_RPS, MAX_RETRIES, RETRY_BASE_DELAY_MS};
