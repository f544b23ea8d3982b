//! Plan retention folded into the report window

use chrono::{DateTime, Utc};
use wobbly_domain::{PlanTier, ReportWindow, RetentionPolicy};

/// Earliest visible instant per plan, evaluated at a fixed reference time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanDateFloor {
    policy: RetentionPolicy,
    as_of: DateTime<Utc>,
}

impl PlanDateFloor {
    pub fn new(policy: RetentionPolicy, as_of: DateTime<Utc>) -> Self {
        Self { policy, as_of }
    }

    /// Floor that never restricts anything.
    pub fn unrestricted() -> Self {
        Self::new(RetentionPolicy::unrestricted(), DateTime::<Utc>::MIN_UTC)
    }

    pub fn as_of(&self) -> DateTime<Utc> {
        self.as_of
    }

    /// Oldest instant `plan` may see, `None` for full history.
    pub fn floor_for(&self, plan: PlanTier) -> Option<DateTime<Utc>> {
        self.policy.rule_for(plan).floor(self.as_of)
    }

    /// `requested` with its start raised to the plan floor.
    ///
    /// A floor past `requested.end` yields an empty window.
    pub fn effective_window(&self, requested: &ReportWindow, plan: PlanTier) -> ReportWindow {
        match self.floor_for(plan) {
            Some(floor) => requested.floored(floor),
            None => *requested,
        }
    }
}
