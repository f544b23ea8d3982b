//! User timer list service

use std::sync::Arc;

use tracing::{debug, instrument};
use wobbly_domain::{
    Pagination, ReportWindow, ReportingConfig, Result, RetentionPolicy, SearchTerm, SortOrder,
    TimerFilter, TimerRecord,
};

use crate::clock::{Clock, SystemClock};
use crate::reporting::plan_floor::PlanDateFloor;
use crate::reporting::ports::{PlanResolver, TimerFetcher};

/// One page of a user's timers, optionally narrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerListQuery {
    pub pagination: Pagination,
    /// Only timers whose start lies inside this window.
    pub started_within: Option<ReportWindow>,
    pub search: Option<SearchTerm>,
}

impl TimerListQuery {
    pub fn new(pagination: Pagination) -> Self {
        Self { pagination, started_within: None, search: None }
    }

    pub fn started_within(mut self, window: ReportWindow) -> Self {
        self.started_within = Some(window);
        self
    }

    /// Title search; blank input clears it.
    pub fn search(mut self, raw: &str) -> Self {
        self.search = SearchTerm::new(raw);
        self
    }
}

/// Timer list service
pub struct TimerListService {
    fetcher: Arc<dyn TimerFetcher>,
    plans: Arc<dyn PlanResolver>,
    clock: Arc<dyn Clock>,
    retention: RetentionPolicy,
}

impl TimerListService {
    pub fn new(
        fetcher: Arc<dyn TimerFetcher>,
        plans: Arc<dyn PlanResolver>,
        config: &ReportingConfig,
    ) -> Self {
        Self { fetcher, plans, clock: Arc::new(SystemClock), retention: config.retention.clone() }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Newest-first page of `user_id`'s timers in `team_id`.
    ///
    /// Timers started before the team plan's retention floor are hidden.
    #[instrument(skip(self, query), fields(page = query.pagination.page()))]
    pub async fn list_user_timers(
        &self,
        user_id: &str,
        team_id: &str,
        query: &TimerListQuery,
    ) -> Result<Vec<TimerRecord>> {
        let plan = self.plans.resolve_plan_tier(team_id).await?;
        let floor = PlanDateFloor::new(self.retention.clone(), self.clock.now()).floor_for(plan);

        let mut filter = TimerFilter::for_team(team_id)
            .user(user_id)
            .search(query.search.clone())
            .paginate(query.pagination)
            .order(SortOrder::StartDescending);
        if let Some(window) = query.started_within {
            filter = filter.started_within(window);
        }
        if let Some(floor) = floor {
            filter = filter.started_after(floor);
        }

        let timers = self.fetcher.fetch_intervals(&filter).await?;
        debug!(plan = %plan, timers = timers.len(), "Listed user timers");
        Ok(timers)
    }
}
