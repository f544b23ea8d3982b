//! Closed time interval between two UTC instants

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A span of time `{start, end}` in absolute UTC instants.
///
/// `start <= end` always holds for values built through [`TimeInterval::new`].
/// Zero-length intervals are legal and represent entries that have not been
/// closed yet (or degenerate entries); consumers must tolerate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// Build an interval, collapsing a malformed `start > end` pair to zero
    /// length at `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end: end.max(start) }
    }

    /// Zero-length interval at `instant`.
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { start: instant, end: instant }
    }

    /// True when the pair was built by hand with `end` before `start`.
    pub fn is_malformed(&self) -> bool {
        self.end < self.start
    }

    /// Copy of this interval with the `start <= end` invariant restored.
    pub fn normalized(self) -> Self {
        Self::new(self.start, self.end)
    }

    pub fn is_zero_length(&self) -> bool {
        self.start == self.end
    }

    pub fn duration(&self) -> Duration {
        (self.end - self.start).max(Duration::zero())
    }

    /// Boundary-inclusive overlap test: touching intervals overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.end >= other.start && self.start <= other.end
    }

    /// Boundary-inclusive intersection, `None` when the intervals are apart.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.overlaps(other) {
            return None;
        }
        Some(Self { start: self.start.max(other.start), end: self.end.min(other.end) })
    }
}
