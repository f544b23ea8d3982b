//! Subscription plans and their history-retention rules

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{BASIC_RETENTION_DAYS, FREE_RETENTION_DAYS, PRO_RETENTION_DAYS};
use crate::impl_wire_name_conversions;

/// Subscription tier of a team, parsed from the billing plan name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Basic,
    Pro,
    Unlimited,
}

impl_wire_name_conversions!(PlanTier {
    Free => "free" | "trial",
    Basic => "basic" | "starter",
    Pro => "pro" | "professional",
    Unlimited => "unlimited" | "team" | "enterprise",
});

/// How far back a plan may see recorded time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RetentionRule {
    /// Full history.
    Unrestricted,
    /// Nothing before a fixed instant.
    Since { floor: DateTime<Utc> },
    /// Nothing older than `days` before the reference time.
    LookbackDays { days: u32 },
}

impl RetentionRule {
    /// Oldest visible instant relative to `now`, `None` when unrestricted.
    ///
    /// A look-back reaching past the earliest representable instant keeps
    /// the whole history.
    pub fn floor(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Self::Unrestricted => None,
            Self::Since { floor } => Some(*floor),
            Self::LookbackDays { days } => Some(
                now.checked_sub_signed(Duration::days(i64::from(*days)))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
        }
    }
}

/// Retention rule for every plan tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub free: RetentionRule,
    pub basic: RetentionRule,
    pub pro: RetentionRule,
    pub unlimited: RetentionRule,
}

impl RetentionPolicy {
    pub fn rule_for(&self, plan: PlanTier) -> RetentionRule {
        match plan {
            PlanTier::Free => self.free,
            PlanTier::Basic => self.basic,
            PlanTier::Pro => self.pro,
            PlanTier::Unlimited => self.unlimited,
        }
    }

    /// Policy that never restricts any plan.
    pub fn unrestricted() -> Self {
        Self {
            free: RetentionRule::Unrestricted,
            basic: RetentionRule::Unrestricted,
            pro: RetentionRule::Unrestricted,
            unlimited: RetentionRule::Unrestricted,
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            free: RetentionRule::LookbackDays { days: FREE_RETENTION_DAYS },
            basic: RetentionRule::LookbackDays { days: BASIC_RETENTION_DAYS },
            pro: RetentionRule::LookbackDays { days: PRO_RETENTION_DAYS },
            unlimited: RetentionRule::Unrestricted,
        }
    }
}
