//! Report assembly pipeline
//!
//! floor the window -> clip each record -> build day periods -> split.
//! Pure: no I/O, no shared state, safe to run concurrently.

use tokio_util::sync::CancellationToken;
use tracing::debug;
use wobbly_domain::{
    Fragment, PlanTier, Report, ReportWindow, Result, TimeInterval, TimerRecord, WobblyError,
};

use super::clipper::WindowClipper;
use super::periods::PeriodSplitter;
use super::plan_floor::PlanDateFloor;

/// Builds fragments from raw records for one plan floor.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    floor: PlanDateFloor,
}

impl ReportAssembler {
    pub fn new(floor: PlanDateFloor) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> &PlanDateFloor {
        &self.floor
    }

    /// Full report: effective window, its day periods and the fragments.
    pub fn assemble(
        &self,
        raw: &[TimerRecord],
        requested: &ReportWindow,
        offset_minutes: i32,
        plan: PlanTier,
    ) -> Result<Report> {
        self.run(raw, requested, offset_minutes, plan, None)
    }

    /// Per-day fragments of `raw` inside `requested` as seen by `plan`.
    ///
    /// Fragments follow input order, then period order. Records entirely
    /// outside the effective window are dropped.
    pub fn build_report(
        &self,
        raw: &[TimerRecord],
        requested: &ReportWindow,
        offset_minutes: i32,
        plan: PlanTier,
    ) -> Result<Vec<Fragment>> {
        Ok(self.assemble(raw, requested, offset_minutes, plan)?.fragments)
    }

    /// [`build_report`](Self::build_report) that gives up between records once
    /// `token` is cancelled.
    pub fn build_report_cancellable(
        &self,
        raw: &[TimerRecord],
        requested: &ReportWindow,
        offset_minutes: i32,
        plan: PlanTier,
        token: &CancellationToken,
    ) -> Result<Report> {
        self.run(raw, requested, offset_minutes, plan, Some(token))
    }

    /// Same pipeline over bare intervals; fragments carry no source.
    pub fn build_interval_report(
        &self,
        raw: &[TimeInterval],
        requested: &ReportWindow,
        offset_minutes: i32,
        plan: PlanTier,
    ) -> Result<Vec<Fragment>> {
        let window = self.floor.effective_window(requested, plan);
        let periods = PeriodSplitter.build_periods(&window, offset_minutes)?;

        let clipped: Vec<TimeInterval> =
            raw.iter().filter_map(|interval| WindowClipper.clip(interval, &window)).collect();

        Ok(PeriodSplitter.split_intervals(&clipped, &periods))
    }

    /// Clip-only report for a single project or user: one fragment per
    /// record, no day splitting.
    pub fn build_entity_report(
        &self,
        raw: &[TimerRecord],
        requested: &ReportWindow,
        plan: PlanTier,
    ) -> Report {
        let window = self.floor.effective_window(requested, plan);
        let fragments: Vec<Fragment> = raw
            .iter()
            .filter_map(|record| WindowClipper.clip_record(record, &window))
            .map(|record| Fragment::new(record.interval, Some((&record).into())))
            .collect();

        debug!(records = raw.len(), fragments = fragments.len(), "Assembled entity report");

        Report { window, periods: Vec::new(), fragments }
    }

    fn run(
        &self,
        raw: &[TimerRecord],
        requested: &ReportWindow,
        offset_minutes: i32,
        plan: PlanTier,
        token: Option<&CancellationToken>,
    ) -> Result<Report> {
        let window = self.floor.effective_window(requested, plan);
        let periods = PeriodSplitter.build_periods(&window, offset_minutes)?;
        if window.is_empty() {
            debug!(plan = %plan, "Effective window is empty after plan floor");
            return Ok(Report::empty(window));
        }

        let mut fragments = Vec::with_capacity(raw.len());
        let mut dropped = 0usize;
        for record in raw {
            if token.is_some_and(CancellationToken::is_cancelled) {
                return Err(WobblyError::Cancelled("report assembly cancelled".to_string()));
            }
            match WindowClipper.clip_record(record, &window) {
                Some(clipped) => PeriodSplitter.split_record_into(&clipped, &periods, &mut fragments),
                None => dropped += 1,
            }
        }

        debug!(
            records = raw.len(),
            dropped,
            periods = periods.len(),
            fragments = fragments.len(),
            "Assembled report"
        );

        Ok(Report { window, periods, fragments })
    }
}
