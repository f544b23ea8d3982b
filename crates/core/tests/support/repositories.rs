//! Mock port implementations for testing
//!
//! In-memory stand-ins for the store and billing ports, enabling
//! deterministic service tests without a network.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wobbly_core::{PlanResolver, TimerFetcher};
use wobbly_domain::{PlanTier, Result as DomainResult, TimerFilter, TimerRecord, WobblyError};

/// In-memory mock for `TimerFetcher`.
///
/// Applies the filter the same way the store would and records every filter
/// it was asked for.
#[derive(Default, Clone)]
pub struct MockTimerFetcher {
    timers: Arc<Vec<TimerRecord>>,
    seen: Arc<Mutex<Vec<TimerFilter>>>,
    failure: Option<WobblyError>,
}

impl MockTimerFetcher {
    /// Create a new mock seeded with the provided timers.
    pub fn new(timers: Vec<TimerRecord>) -> Self {
        Self { timers: Arc::new(timers), ..Self::default() }
    }

    /// Mock whose every fetch fails with `error`.
    pub fn failing(error: WobblyError) -> Self {
        Self { failure: Some(error), ..Self::default() }
    }

    /// Filters received so far, oldest first.
    pub fn seen_filters(&self) -> Vec<TimerFilter> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TimerFetcher for MockTimerFetcher {
    async fn fetch_intervals(&self, filter: &TimerFilter) -> DomainResult<Vec<TimerRecord>> {
        self.seen.lock().unwrap().push(filter.clone());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(filter.apply(self.timers.iter().cloned()))
    }
}

/// In-memory mock for `PlanResolver`.
///
/// Unknown teams resolve to the fallback tier, like a team with no
/// subscription on record.
#[derive(Clone)]
pub struct MockPlanResolver {
    plans: HashMap<String, PlanTier>,
    fallback: PlanTier,
}

impl MockPlanResolver {
    pub fn new(fallback: PlanTier) -> Self {
        Self { plans: HashMap::new(), fallback }
    }

    pub fn with_plan(mut self, team_id: &str, plan: PlanTier) -> Self {
        self.plans.insert(team_id.to_string(), plan);
        self
    }
}

#[async_trait]
impl PlanResolver for MockPlanResolver {
    async fn resolve_plan_tier(&self, team_id: &str) -> DomainResult<PlanTier> {
        Ok(self.plans.get(team_id).copied().unwrap_or(self.fallback))
    }
}
