//! Detail cache statistics

use std::fmt;

use serde::{Deserialize, Serialize};

/// Snapshot of detail cache activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Details currently stored
    pub entries: usize,
    /// Fetches currently in flight
    pub in_flight: usize,
    /// Lookups answered from stored details
    pub hits: u64,
    /// Lookups that had to start a fetch
    pub misses: u64,
    /// Lookups that joined a fetch already in flight
    pub coalesced: u64,
    /// Completed fetches that returned nothing
    pub not_found: u64,
}

impl CacheStats {
    /// Total lookups served
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses + self.coalesced
    }

    /// Share of lookups that did not start a network fetch
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.lookups();
        if lookups == 0 {
            return 0.0;
        }
        (self.hits + self.coalesced) as f64 / lookups as f64
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cached, {} in flight, {} hits, {} misses, {} coalesced ({:.1}% hit rate)",
            self.entries,
            self.in_flight,
            self.hits,
            self.misses,
            self.coalesced,
            self.hit_rate() * 100.0
        )
    }
}
