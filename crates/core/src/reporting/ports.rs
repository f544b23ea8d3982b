//! Port interfaces for report data
//!
//! Implemented in infra against the remote store; mocked in tests.

use async_trait::async_trait;
use wobbly_domain::{PlanTier, Result, TimerFilter, TimerRecord};

/// Source of raw timer records
#[async_trait]
pub trait TimerFetcher: Send + Sync {
    /// Records matching `filter`, honoring its order and pagination.
    async fn fetch_intervals(&self, filter: &TimerFilter) -> Result<Vec<TimerRecord>>;
}

/// Billing lookup for a team's subscription tier
#[async_trait]
pub trait PlanResolver: Send + Sync {
    /// Current tier of `team_id`. Teams with no subscription on record get the
    /// configured default tier rather than an error.
    async fn resolve_plan_tier(&self, team_id: &str) -> Result<PlanTier>;
}
