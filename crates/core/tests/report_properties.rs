//! Invariants of the report pipeline over many generated timers

mod support;

use std::collections::HashMap;

use chrono::Duration;
use support::fixtures::{jan, scattered, timer, window};
use wobbly_core::{PlanDateFloor, ReportAssembler, WindowClipper};
use wobbly_domain::{
    Fragment, PlanTier, ReportWindow, RetentionPolicy, RetentionRule, TimeInterval, TimerRecord,
};

const OFFSETS: [i32; 5] = [-300, 0, 60, 120, 330];

fn unrestricted() -> ReportAssembler {
    ReportAssembler::new(PlanDateFloor::unrestricted())
}

fn floored_at(floor: chrono::DateTime<chrono::Utc>) -> ReportAssembler {
    let policy =
        RetentionPolicy { free: RetentionRule::Since { floor }, ..RetentionPolicy::unrestricted() };
    ReportAssembler::new(PlanDateFloor::new(policy, jan(31, 0, 0)))
}

fn total(fragments: &[Fragment]) -> Duration {
    fragments.iter().map(Fragment::duration).fold(Duration::zero(), |acc, d| acc + d)
}

fn by_timer(fragments: &[Fragment]) -> HashMap<String, Vec<Fragment>> {
    let mut grouped: HashMap<String, Vec<Fragment>> = HashMap::new();
    for fragment in fragments {
        let id = fragment.source.as_ref().unwrap().timer_id.clone();
        grouped.entry(id).or_default().push(fragment.clone());
    }
    grouped
}

fn requested() -> ReportWindow {
    window(jan(5, 7, 30), jan(20, 16, 45))
}

#[test]
fn test_fragments_cover_exactly_the_clipped_duration() {
    let raw = scattered(400, 7);
    let requested = requested();

    for offset in OFFSETS {
        let fragments =
            unrestricted().build_report(&raw, &requested, offset, PlanTier::Pro).unwrap();
        let grouped = by_timer(&fragments);

        for record in &raw {
            let clipped = WindowClipper.clip(&record.interval, &requested);
            let pieces = grouped.get(&record.id).map(Vec::as_slice).unwrap_or_default();
            match clipped {
                Some(clipped) => assert_eq!(
                    total(pieces),
                    clipped.duration(),
                    "timer {} at offset {offset}",
                    record.id
                ),
                None => assert!(pieces.is_empty(), "timer {} leaked", record.id),
            }
        }
    }
}

#[test]
fn test_fragments_of_one_timer_never_overlap_and_stay_in_one_period() {
    let raw = scattered(400, 11);
    let requested = requested();

    for offset in OFFSETS {
        let report = unrestricted().assemble(&raw, &requested, offset, PlanTier::Pro).unwrap();

        for pieces in by_timer(&report.fragments).values() {
            for pair in pieces.windows(2) {
                assert!(pair[0].end <= pair[1].start, "overlapping pieces {pair:?}");
            }
        }
        for fragment in &report.fragments {
            let homes: Vec<_> =
                report.periods.iter().filter(|p| p.contains(fragment.start)).collect();
            assert_eq!(homes.len(), 1, "fragment {fragment:?} has {} home periods", homes.len());
            assert!(fragment.end <= homes[0].end, "fragment {fragment:?} spans periods");
            assert!(
                fragment.start >= report.window.start && fragment.end <= report.window.end,
                "fragment {fragment:?} outside window"
            );
        }
    }
}

#[test]
fn test_open_timers_appear_exactly_once() {
    let raw: Vec<TimerRecord> =
        [jan(5, 7, 30), jan(6, 0, 0), jan(12, 13, 0), jan(20, 16, 45)]
            .iter()
            .enumerate()
            .map(|(i, at)| timer(&format!("open{i}"), *at, *at))
            .collect();

    for offset in OFFSETS {
        let fragments =
            unrestricted().build_report(&raw, &requested(), offset, PlanTier::Pro).unwrap();
        assert_eq!(fragments.len(), raw.len(), "offset {offset}");
        assert!(fragments.iter().all(|f| f.start == f.end));
    }
}

#[test]
fn test_summary_periods_add_up_to_total() {
    let raw = scattered(300, 3);

    for offset in OFFSETS {
        let report = unrestricted().assemble(&raw, &requested(), offset, PlanTier::Pro).unwrap();
        let summary = report.summary();
        let per_period: i64 = summary.per_period.iter().map(|p| p.seconds).sum();

        assert_eq!(per_period, summary.total_seconds);
        assert_eq!(summary.total_seconds, total(&report.fragments).num_seconds());
    }
}

#[test]
fn test_clipping_twice_changes_nothing() {
    let requested = requested();
    for record in scattered(200, 5) {
        if let Some(once) = WindowClipper.clip(&record.interval, &requested) {
            assert_eq!(WindowClipper.clip(&once, &requested), Some(once));
        }
    }
}

#[test]
fn test_raising_the_floor_never_adds_time() {
    let raw = scattered(300, 13);
    let requested = requested();
    let mut previous =
        total(&unrestricted().build_report(&raw, &requested, 0, PlanTier::Free).unwrap());

    for day in [3, 6, 9, 12, 15, 18, 21, 24] {
        let current = total(
            &floored_at(jan(day, 0, 0)).build_report(&raw, &requested, 0, PlanTier::Free).unwrap(),
        );
        assert!(current <= previous, "floor at day {day} added time");
        previous = current;
    }
    assert_eq!(previous, Duration::zero());
}

#[test]
fn test_malformed_timers_collapse_instead_of_failing() {
    let mut broken = timer("broken", jan(10, 12, 0), jan(10, 12, 0));
    broken.interval = TimeInterval { start: jan(10, 12, 0), end: jan(10, 8, 0) };

    let fragments =
        unrestricted().build_report(&[broken], &requested(), 0, PlanTier::Pro).unwrap();

    assert_eq!(fragments.len(), 1);
    assert_eq!(fragments[0].interval(), TimeInterval::at(jan(10, 12, 0)));
}
