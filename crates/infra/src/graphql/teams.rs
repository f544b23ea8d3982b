//! Team subscription lookup

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument, warn};
use wobbly_core::PlanResolver;
use wobbly_domain::{PlanTier, Result, WobblyError};

use super::client::GraphqlClient;

const TEAM_PLAN_QUERY: &str = r"
query team_plan($team_id: uuid!) {
    team_by_pk(id: $team_id) {
        payments(order_by: { created_at: asc }) {
            subscription { plan_name }
        }
    }
}
";

#[derive(Debug, Deserialize)]
struct TeamPlanData {
    team_by_pk: Option<TeamRow>,
}

#[derive(Debug, Deserialize)]
struct TeamRow {
    #[serde(default)]
    payments: Vec<PaymentRow>,
}

#[derive(Debug, Deserialize)]
struct PaymentRow {
    subscription: Option<SubscriptionRow>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionRow {
    plan_name: Option<String>,
}

/// [`PlanResolver`] reading the plan of the team's latest payment.
///
/// No payment, no subscription on it, or an unrecognized plan name all
/// resolve to the configured default tier.
#[derive(Clone)]
pub struct GraphqlPlanResolver {
    client: GraphqlClient,
    default_plan: PlanTier,
}

impl GraphqlPlanResolver {
    pub fn new(client: GraphqlClient, default_plan: PlanTier) -> Self {
        Self { client, default_plan }
    }
}

#[async_trait]
impl PlanResolver for GraphqlPlanResolver {
    #[instrument(skip(self))]
    async fn resolve_plan_tier(&self, team_id: &str) -> Result<PlanTier> {
        let data: TeamPlanData =
            self.client.execute(TEAM_PLAN_QUERY, &json!({ "team_id": team_id })).await?;
        let team =
            data.team_by_pk.ok_or_else(|| WobblyError::NotFound(format!("team {team_id}")))?;

        let plan_name = team
            .payments
            .into_iter()
            .next_back()
            .and_then(|payment| payment.subscription)
            .and_then(|subscription| subscription.plan_name);

        let plan = match plan_name {
            Some(name) => name.parse().unwrap_or_else(|err: String| {
                warn!(error = %err, "Unrecognized plan name; using default tier");
                self.default_plan
            }),
            None => self.default_plan,
        };
        debug!(plan = %plan, "Resolved team plan");
        Ok(plan)
    }
}
