//! Progress reporting for detail-backed filtering

use std::fmt;

/// Items processed so far out of the items that need details
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterProgress {
    pub current: usize,
    pub total: usize,
}

impl FilterProgress {
    pub fn new(current: usize, total: usize) -> Self {
        Self { current, total }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.total
    }

    /// Completion percentage; an empty run counts as complete
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.current as f64 / self.total as f64 * 100.0).min(100.0)
    }
}

impl fmt::Display for FilterProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.0}%)", self.current, self.total, self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(FilterProgress::new(0, 0).percent(), 100.0);
        assert_eq!(FilterProgress::new(5, 20).percent(), 25.0);
        assert!(FilterProgress::new(20, 20).is_complete());
        assert_eq!(FilterProgress::new(5, 20).to_string(), "5/20 (25%)");
    }
}
