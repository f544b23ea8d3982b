//! Report service - fetch, resolve plan, assemble

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use wobbly_domain::{
    PlanTier, Report, ReportWindow, ReportingConfig, Result, RetentionPolicy, TimerFilter,
    TimerRecord, WobblyError,
};

use super::assembler::ReportAssembler;
use super::plan_floor::PlanDateFloor;
use super::ports::{PlanResolver, TimerFetcher};
use crate::clock::{Clock, SystemClock};

/// What to report on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub team_id: String,
    /// Restrict to these users; empty means the whole team.
    pub user_emails: Vec<String>,
    /// Restrict to these projects; empty means every project.
    pub project_names: Vec<String>,
    pub window: ReportWindow,
    /// Minutes east of UTC for day boundaries; the configured default when `None`.
    pub tz_offset_minutes: Option<i32>,
}

impl ReportRequest {
    pub fn new(team_id: impl Into<String>, window: ReportWindow) -> Self {
        Self {
            team_id: team_id.into(),
            user_emails: Vec::new(),
            project_names: Vec::new(),
            window,
            tz_offset_minutes: None,
        }
    }

    pub fn with_user_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_project_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tz_offset(mut self, minutes: i32) -> Self {
        self.tz_offset_minutes = Some(minutes);
        self
    }

    fn filter(&self) -> TimerFilter {
        TimerFilter::for_team(&self.team_id)
            .user_emails(self.user_emails.iter().cloned())
            .projects(self.project_names.iter().cloned())
            .overlapping(self.window)
    }
}

/// Report service
pub struct ReportService {
    fetcher: Arc<dyn TimerFetcher>,
    plans: Arc<dyn PlanResolver>,
    clock: Arc<dyn Clock>,
    retention: RetentionPolicy,
    default_tz_offset_minutes: i32,
}

impl ReportService {
    /// Create a new report service reading "now" from the system clock
    pub fn new(
        fetcher: Arc<dyn TimerFetcher>,
        plans: Arc<dyn PlanResolver>,
        config: &ReportingConfig,
    ) -> Self {
        Self {
            fetcher,
            plans,
            clock: Arc::new(SystemClock),
            retention: config.retention.clone(),
            default_tz_offset_minutes: config.default_tz_offset_minutes,
        }
    }

    /// Replace the clock used for plan retention floors
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Per-day team report.
    #[instrument(skip(self, request), fields(team_id = %request.team_id))]
    pub async fn team_report(&self, request: &ReportRequest) -> Result<Report> {
        let (records, plan) = self.load(request).await?;
        self.assembler().assemble(&records, &request.window, self.offset_for(request), plan)
    }

    /// [`team_report`](Self::team_report) that stops early once `token` is
    /// cancelled.
    #[instrument(skip(self, request, token), fields(team_id = %request.team_id))]
    pub async fn team_report_cancellable(
        &self,
        request: &ReportRequest,
        token: &CancellationToken,
    ) -> Result<Report> {
        ensure_live(token)?;
        let (records, plan) = self.load(request).await?;
        ensure_live(token)?;

        self.assembler().build_report_cancellable(
            &records,
            &request.window,
            self.offset_for(request),
            plan,
            token,
        )
    }

    /// Single project or user report: clipped to the window but not split
    /// into days.
    #[instrument(skip(self, request), fields(team_id = %request.team_id))]
    pub async fn entity_report(&self, request: &ReportRequest) -> Result<Report> {
        let (records, plan) = self.load(request).await?;
        Ok(self.assembler().build_entity_report(&records, &request.window, plan))
    }

    async fn load(&self, request: &ReportRequest) -> Result<(Vec<TimerRecord>, PlanTier)> {
        let plan = self.plans.resolve_plan_tier(&request.team_id).await?;
        let records = self.fetcher.fetch_intervals(&request.filter()).await?;
        debug!(plan = %plan, records = records.len(), "Loaded report input");
        Ok((records, plan))
    }

    fn assembler(&self) -> ReportAssembler {
        ReportAssembler::new(PlanDateFloor::new(self.retention.clone(), self.clock.now()))
    }

    fn offset_for(&self, request: &ReportRequest) -> i32 {
        request.tz_offset_minutes.unwrap_or(self.default_tz_offset_minutes)
    }
}

fn ensure_live(token: &CancellationToken) -> Result<()> {
    if token.is_cancelled() {
        return Err(WobblyError::Cancelled("report request cancelled".to_string()));
    }
    Ok(())
}
