//! `timer_v2` rows as [`TimerRecord`]s

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use wobbly_core::{TimeUtil, TimerFetcher};
use wobbly_domain::{Result, SyncStatus, TimeInterval, TimerFilter, TimerRecord};

use super::client::GraphqlClient;
use super::filter::timer_variables;

const TIMERS_QUERY: &str = r"
query timers(
    $where: timer_v2_bool_exp!
    $order_by: [timer_v2_order_by!]
    $limit: Int
    $offset: Int
) {
    timer_v2(where: $where, order_by: $order_by, limit: $limit, offset: $offset) {
        id
        issue
        title
        start_datetime
        end_datetime
        sync_jira_status
        user_id
        project_id
        project { name team_id }
        user { email }
    }
}
";

#[derive(Debug, Deserialize)]
struct TimersData {
    timer_v2: Vec<TimerRow>,
}

#[derive(Debug, Deserialize)]
struct TimerRow {
    id: String,
    issue: Option<String>,
    title: Option<String>,
    start_datetime: String,
    end_datetime: Option<String>,
    /// Stored as a boolean on newer rows and as `"true"`/`"false"` on older ones.
    #[serde(default)]
    sync_jira_status: Option<Value>,
    user_id: String,
    project_id: String,
    project: Option<ProjectRow>,
    user: Option<UserRow>,
}

#[derive(Debug, Deserialize)]
struct ProjectRow {
    name: Option<String>,
    team_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    email: Option<String>,
}

/// [`TimerFetcher`] backed by the GraphQL store.
#[derive(Clone)]
pub struct GraphqlTimerRepository {
    client: GraphqlClient,
}

impl GraphqlTimerRepository {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TimerFetcher for GraphqlTimerRepository {
    #[instrument(skip(self, filter), fields(team_id = ?filter.team_id))]
    async fn fetch_intervals(&self, filter: &TimerFilter) -> Result<Vec<TimerRecord>> {
        let data: TimersData = self.client.execute(TIMERS_QUERY, &timer_variables(filter)).await?;
        let fetched = data.timer_v2.len();

        let records: Vec<TimerRecord> = data.timer_v2.into_iter().filter_map(into_record).collect();
        debug!(fetched, kept = records.len(), "Fetched timers");
        Ok(records)
    }
}

/// Row to record; rows without a readable start are skipped.
///
/// An open timer (no end) or an unreadable end becomes a zero-length
/// interval at its start.
fn into_record(row: TimerRow) -> Option<TimerRecord> {
    let start = match TimeUtil.parse_timestamp(&row.start_datetime) {
        Ok(start) => start,
        Err(err) => {
            warn!(timer_id = %row.id, error = %err, "Skipping timer with unreadable start");
            return None;
        }
    };
    let end = match row.end_datetime.as_deref().map(|raw| TimeUtil.parse_timestamp(raw)) {
        Some(Ok(end)) => end,
        Some(Err(err)) => {
            warn!(timer_id = %row.id, error = %err, "Treating unreadable end as open timer");
            start
        }
        None => start,
    };

    let interval = TimeInterval { start, end };
    if interval.is_malformed() {
        warn!(timer_id = %row.id, "Timer ends before it starts; collapsing to its start");
    }

    let mut record = TimerRecord::new(row.id, row.user_id, row.project_id, start, end)
        .with_sync_status(sync_status(row.sync_jira_status.as_ref()));
    record.issue = row.issue;
    record.title = row.title;
    if let Some(project) = row.project {
        record.project_name = project.name;
        record.team_id = project.team_id;
    }
    record.user_email = row.user.and_then(|user| user.email);
    Some(record)
}

fn sync_status(raw: Option<&Value>) -> SyncStatus {
    match raw {
        Some(Value::Bool(synced)) => SyncStatus::from(*synced),
        Some(Value::String(text)) => text.parse().unwrap_or_default(),
        _ => SyncStatus::default(),
    }
}
