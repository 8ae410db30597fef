//! Filter criteria and the predicates built on them

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::app::models::{parse_rating, ItemDetail, SearchItem};
use crate::constants::filter::MIN_YEAR;

/// Current calendar year in local time
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Inclusive release-year bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            min: MIN_YEAR,
            max: current_year(),
        }
    }
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }

    /// Whether the range is tighter than the default span
    pub fn is_narrowed(&self) -> bool {
        let default = Self::default();
        self.min > default.min || self.max < default.max
    }
}

/// What the user wants to keep from a result set
///
/// Genre and minimum rating need per-item details; the year range is
/// answered from the search result alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FilterCriteria {
    /// Genre name; empty means no constraint
    pub genre: String,
    pub year_range: YearRange,
    /// Minimum rating; 0 means no constraint
    pub min_rating: f64,
}

impl FilterCriteria {
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_year_range(mut self, min: i32, max: i32) -> Self {
        self.year_range = YearRange::new(min, max);
        self
    }

    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    /// True when filtering needs per-item details from the network
    pub fn has_advanced_filters(&self) -> bool {
        !self.genre.trim().is_empty() || self.min_rating > 0.0
    }

    /// Number of constraints that deviate from the defaults
    pub fn active_filter_count(&self) -> usize {
        [
            !self.genre.trim().is_empty(),
            self.year_range.is_narrowed(),
            self.min_rating > 0.0,
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn is_active(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// Year predicate, answerable without details
    pub fn matches_year(&self, item: &SearchItem) -> bool {
        self.year_range.contains(item.release_year())
    }

    pub fn matches_genre(&self, detail: &ItemDetail) -> bool {
        detail.matches_genre(self.genre.trim())
    }

    pub fn matches_rating(&self, detail: &ItemDetail) -> bool {
        self.min_rating <= 0.0 || parse_rating(&detail.imdb_rating) >= self.min_rating
    }

    /// Genre and rating predicates together
    pub fn matches_detail(&self, detail: &ItemDetail) -> bool {
        self.matches_genre(detail) && self.matches_rating(detail)
    }
}
