//! Half-open time intervals.
//!
//! # Time Model
//! All times are integer minutes relative to a reference origin chosen by the
//! caller (the bundled tooling uses minutes from midnight).

use serde::{Deserialize, Serialize};

/// Minutes from the reference origin.
pub type Minute = i64;

/// A time interval [start, end).
///
/// Half-open interval: includes start, excludes end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start (inclusive).
    pub start: Minute,
    /// Interval end (exclusive).
    pub end: Minute,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: Minute, end: Minute) -> Self {
        Self { start, end }
    }

    /// Length of this window in minutes.
    #[inline]
    pub fn duration(&self) -> Minute {
        self.end - self.start
    }

    /// Whether the window contains no instant.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whether a timestamp falls within this window.
    #[inline]
    pub fn contains(&self, time: Minute) -> bool {
        time >= self.start && time < self.end
    }

    /// Whether two windows share at least one instant.
    ///
    /// Open-interval test: touching windows (`a.end == b.start`) do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_contains() {
        let w = TimeWindow::new(60, 120);
        assert!(w.contains(60));
        assert!(w.contains(119));
        assert!(!w.contains(120));
        assert!(!w.contains(59));
        assert_eq!(w.duration(), 60);
    }

    #[test]
    fn test_window_overlaps() {
        let a = TimeWindow::new(0, 60);
        assert!(a.overlaps(&TimeWindow::new(30, 90)));
        assert!(a.overlaps(&TimeWindow::new(-10, 1)));
        assert!(!a.overlaps(&TimeWindow::new(60, 90)));
        assert!(!a.overlaps(&TimeWindow::new(-30, 0)));
    }

    #[test]
    fn test_window_empty() {
        assert!(TimeWindow::new(5, 5).is_empty());
        assert!(TimeWindow::new(6, 5).is_empty());
        assert!(!TimeWindow::new(5, 6).is_empty());
    }
}
