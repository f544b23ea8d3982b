//! Report windows, day periods and the fragments a report is made of

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;
use super::timer::{SyncStatus, TimerRecord};
use crate::errors::{Result, WobblyError};

/// Closed window `[start, end]` a report is requested for.
///
/// [`ReportWindow::new`] rejects `start > end`. The only way to obtain a
/// window with `end < start` is plan-floor application pushing the start past
/// the requested end; such a window is *empty* and yields no fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(WobblyError::InvalidWindow(format!(
                "start {} is after end {}",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Same window with the start raised to `floor` when the floor is later.
    ///
    /// Raising past `end` produces an empty window.
    pub fn floored(&self, floor: DateTime<Utc>) -> Self {
        if floor <= self.start {
            *self
        } else {
            Self { start: floor, end: self.end }
        }
    }

    /// Window as an interval, `None` when empty.
    pub fn as_interval(&self) -> Option<TimeInterval> {
        (!self.is_empty()).then_some(TimeInterval { start: self.start, end: self.end })
    }
}

/// One calendar-day bucket, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SubPeriod {
    /// Half-open membership: `start <= instant < end`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    pub fn as_interval(&self) -> TimeInterval {
        TimeInterval { start: self.start, end: self.end }
    }
}

/// Identity and attributes of the timer a fragment was cut from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentSource {
    pub timer_id: String,
    pub user_id: String,
    pub project_id: String,
    pub issue: String,
    pub sync_status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl From<&TimerRecord> for FragmentSource {
    fn from(record: &TimerRecord) -> Self {
        Self {
            timer_id: record.id.clone(),
            user_id: record.user_id.clone(),
            project_id: record.project_id.clone(),
            issue: record.issue_label().to_string(),
            sync_status: record.sync_status,
            project_name: record.project_name.clone(),
            user_email: record.user_email.clone(),
        }
    }
}

/// Portion of one timer that falls inside one sub-period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<FragmentSource>,
}

impl Fragment {
    pub fn new(interval: TimeInterval, source: Option<FragmentSource>) -> Self {
        Self { start: interval.start, end: interval.end, source }
    }

    pub fn interval(&self) -> TimeInterval {
        TimeInterval { start: self.start, end: self.end }
    }

    pub fn duration(&self) -> Duration {
        self.interval().duration()
    }
}

/// Tracked seconds inside one sub-period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotal {
    pub period: SubPeriod,
    pub seconds: i64,
}

/// Totals over a fragment list, per period and overall.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total_seconds: i64,
    pub per_period: Vec<PeriodTotal>,
}

/// Assembled report: the effective window, its day periods and the
/// fragments cut from the fetched timers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub window: ReportWindow,
    pub periods: Vec<SubPeriod>,
    pub fragments: Vec<Fragment>,
}

impl Report {
    /// Report with nothing in it, for an empty effective window.
    pub fn empty(window: ReportWindow) -> Self {
        Self { window, periods: Vec::new(), fragments: Vec::new() }
    }

    /// Per-period and overall tracked seconds.
    ///
    /// A fragment is attributed to the period holding its start instant, so
    /// per-period totals always add up to `total_seconds`.
    pub fn summary(&self) -> ReportSummary {
        let mut per_period: Vec<PeriodTotal> =
            self.periods.iter().map(|period| PeriodTotal { period: *period, seconds: 0 }).collect();
        let mut total_seconds = 0;

        for fragment in &self.fragments {
            let seconds = fragment.duration().num_seconds();
            total_seconds += seconds;
            if let Some(slot) = per_period.iter_mut().find(|slot| slot.period.contains(fragment.start))
            {
                slot.seconds += seconds;
            }
        }

        ReportSummary { total_seconds, per_period }
    }
}
