//! [`TimerFilter`] to GraphQL `where` / `order_by` variables
//!
//! Every criterion becomes one conjunct under `_and`, so criteria touching
//! the same column (a date range and a plan floor on `start_datetime`) never
//! overwrite each other.

use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use wobbly_core::TimeUtil;
use wobbly_domain::{ReportWindow, SortOrder, TimerFilter};

/// Variables for the timer list query: `where`, `order_by`, `limit`, `offset`.
pub fn timer_variables(filter: &TimerFilter) -> Value {
    let mut variables = Map::new();
    variables.insert("where".into(), where_clause(filter));
    variables.insert("order_by".into(), order_by(filter.order));

    if let Some(page) = filter.pagination {
        variables.insert("limit".into(), json!(page.limit()));
        variables.insert("offset".into(), json!(page.offset()));
    }

    Value::Object(variables)
}

/// Boolean expression selecting the timers `filter` describes.
pub fn where_clause(filter: &TimerFilter) -> Value {
    let mut conjuncts = Vec::new();

    if let Some(team_id) = &filter.team_id {
        conjuncts.push(json!({ "project": { "team_id": { "_eq": team_id } } }));
    }
    if let Some(user_id) = &filter.user_id {
        conjuncts.push(json!({ "user_id": { "_eq": user_id } }));
    }
    if !filter.project_names.is_empty() {
        conjuncts.push(json!({ "project": { "name": { "_in": filter.project_names } } }));
    }
    if !filter.user_emails.is_empty() {
        conjuncts.push(json!({ "user": { "email": { "_in": filter.user_emails } } }));
    }
    if let Some(window) = &filter.overlapping {
        conjuncts.push(overlap_clause(window));
    }
    if let Some(window) = &filter.started_within {
        conjuncts.push(json!({
            "start_datetime": { "_gte": timestamp(window.start), "_lte": timestamp(window.end) }
        }));
    }
    if let Some(floor) = filter.started_after {
        conjuncts.push(json!({ "start_datetime": { "_gte": timestamp(floor) } }));
    }
    if let Some(term) = &filter.search {
        let pattern = term.ilike_pattern();
        conjuncts.push(json!({
            "_or": [
                { "title": { "_ilike": pattern } },
                { "issue": { "_ilike": pattern } },
            ]
        }));
    }

    json!({ "_and": conjuncts })
}

/// Timers touching `window`, boundaries included.
///
/// Three branches instead of `start <= end && end >= start` so that a row
/// stored with `end` before `start` is still found by its start.
fn overlap_clause(window: &ReportWindow) -> Value {
    let (start, end) = (timestamp(window.start), timestamp(window.end));
    json!({
        "_or": [
            { "start_datetime": { "_gte": start, "_lte": end } },
            { "end_datetime": { "_gte": start, "_lte": end } },
            { "start_datetime": { "_lt": start }, "end_datetime": { "_gt": end } },
        ]
    })
}

fn order_by(order: SortOrder) -> Value {
    match order {
        SortOrder::StartAscending => json!([{ "start_datetime": "asc" }, { "id": "asc" }]),
        SortOrder::StartDescending => json!([{ "start_datetime": "desc" }, { "id": "desc" }]),
    }
}

fn timestamp(instant: DateTime<Utc>) -> String {
    TimeUtil.format_timestamp(instant)
}
