//! Restricting intervals to a report window

use wobbly_domain::{ReportWindow, TimeInterval, TimerRecord};

/// Boundary-inclusive interval clipping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowClipper;

impl WindowClipper {
    /// Portion of `interval` inside `window`, or `None` when they do not meet.
    ///
    /// Touching endpoints count as overlap, so an interval ending exactly at
    /// `window.start` clips to a zero-length interval there. A malformed
    /// interval is first collapsed to zero length at its start. An empty
    /// window clips everything away.
    pub fn clip(&self, interval: &TimeInterval, window: &ReportWindow) -> Option<TimeInterval> {
        let bounds = window.as_interval()?;
        interval.normalized().intersection(&bounds)
    }

    /// [`clip`](Self::clip) applied to a record, keeping its attributes.
    pub fn clip_record(&self, record: &TimerRecord, window: &ReportWindow) -> Option<TimerRecord> {
        self.clip(&record.interval, window).map(|clipped| record.with_interval(clipped))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
    }

    fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> ReportWindow {
        ReportWindow::new(start, end).unwrap()
    }

    #[test]
    fn test_clip_trims_both_sides() {
        let clipped = WindowClipper
            .clip(&TimeInterval::new(at(1, 8), at(3, 8)), &window(at(2, 0), at(2, 12)))
            .unwrap();
        assert_eq!(clipped, TimeInterval::new(at(2, 0), at(2, 12)));
    }

    #[test]
    fn test_clip_outside_window_is_none() {
        let w = window(at(2, 0), at(3, 0));
        assert_eq!(WindowClipper.clip(&TimeInterval::new(at(1, 0), at(1, 5)), &w), None);
        assert_eq!(WindowClipper.clip(&TimeInterval::new(at(3, 1), at(3, 5)), &w), None);
    }

    #[test]
    fn test_clip_touching_boundary_is_zero_length() {
        let w = window(at(2, 0), at(3, 0));
        let clipped = WindowClipper.clip(&TimeInterval::new(at(1, 20), at(2, 0)), &w).unwrap();

        assert!(clipped.is_zero_length());
        assert_eq!(clipped.start, at(2, 0));
    }

    #[test]
    fn test_clip_is_idempotent() {
        let w = window(at(2, 6), at(2, 18));
        let once = WindowClipper.clip(&TimeInterval::new(at(2, 0), at(2, 10)), &w).unwrap();
        assert_eq!(WindowClipper.clip(&once, &w), Some(once));
    }

    #[test]
    fn test_clip_collapses_malformed_interval() {
        let malformed = TimeInterval { start: at(2, 10), end: at(2, 4) };
        let clipped = WindowClipper.clip(&malformed, &window(at(2, 0), at(3, 0))).unwrap();
        assert_eq!(clipped, TimeInterval::at(at(2, 10)));
    }

    #[test]
    fn test_empty_window_clips_everything() {
        let empty = window(at(1, 0), at(2, 0)).floored(at(5, 0));
        assert!(empty.is_empty());
        assert_eq!(WindowClipper.clip(&TimeInterval::new(at(1, 0), at(9, 0)), &empty), None);
    }

    #[test]
    fn test_clip_record_keeps_attributes() {
        let record = wobbly_domain::TimerRecord::new("t1", "u1", "p1", at(1, 20), at(2, 4))
            .with_issue("ENG-7");
        let clipped = WindowClipper.clip_record(&record, &window(at(2, 0), at(3, 0))).unwrap();

        assert_eq!(clipped.interval, TimeInterval::new(at(2, 0), at(2, 4)));
        assert_eq!(clipped.issue.as_deref(), Some("ENG-7"));
        assert_eq!(clipped.id, "t1");
    }
}
