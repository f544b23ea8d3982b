//! Timestamp and record builders

use chrono::{DateTime, Duration, TimeZone, Utc};
use wobbly_domain::{ReportWindow, TimerRecord};

/// 2024-01-`day` at `hour:minute` UTC.
pub fn jan(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, minute, 0).unwrap()
}

pub fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> ReportWindow {
    ReportWindow::new(start, end).unwrap()
}

/// Record in team `team-1` owned by `alice@example.com` on project `Apollo`.
pub fn timer(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> TimerRecord {
    TimerRecord::new(id, "user-alice", "proj-apollo", start, end)
        .with_team_id("team-1")
        .with_user_email("alice@example.com")
        .with_project_name("Apollo")
}

/// Deterministic pseudo-random records spread over January 2024.
///
/// A small LCG keeps the sequence stable across runs without a rand crate.
pub fn scattered(count: usize, seed: u64) -> Vec<TimerRecord> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        state >> 33
    };

    (0..count)
        .map(|i| {
            let start = jan(1, 0, 0) + Duration::minutes((next() % (30 * 24 * 60)) as i64);
            // Roughly one in eight entries is still open.
            let length = if next() % 8 == 0 { 0 } else { (next() % (3 * 24 * 60)) as i64 };
            timer(&format!("t{i}"), start, start + Duration::minutes(length))
        })
        .collect()
}
