//! Timer records fetched from the remote store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::interval::TimeInterval;
use crate::constants::DEFAULT_ISSUE;
use crate::impl_wire_name_conversions;

/// Worklog synchronization state of a timer with the issue tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Not pushed to the issue tracker (the store's `false` / null).
    #[default]
    Unsynced,
    Synced,
}

impl_wire_name_conversions!(SyncStatus {
    Unsynced => "unsynced" | "false" | "pending",
    Synced => "synced" | "true",
});

impl From<bool> for SyncStatus {
    fn from(synced: bool) -> Self {
        if synced {
            Self::Synced
        } else {
            Self::Unsynced
        }
    }
}

/// One recorded timer entry.
///
/// Read-only snapshot owned by the data store. The reporting engine never
/// mutates a record; it derives clamped copies through
/// [`TimerRecord::with_interval`].
///
/// Fields the store may omit are optional:
/// - `issue`: falls back to [`DEFAULT_ISSUE`] via [`TimerRecord::issue_label`]
/// - `title`: falls back to the issue label via [`TimerRecord::display_title`]
/// - `project_name`, `user_email`, `team_id`: `None` when not selected by the
///   fetch query; filters on those fields then do not match the record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRecord {
    pub id: String,
    pub user_id: String,
    pub project_id: String,
    pub interval: TimeInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub sync_status: SyncStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl TimerRecord {
    /// Minimal record; optional attributes default to `None`/unsynced.
    ///
    /// A malformed `start > end` pair is collapsed to zero length at `start`.
    pub fn new(
        id: impl Into<String>,
        user_id: impl Into<String>,
        project_id: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            project_id: project_id.into(),
            interval: TimeInterval::new(start, end),
            issue: None,
            title: None,
            sync_status: SyncStatus::Unsynced,
            project_name: None,
            user_email: None,
            team_id: None,
        }
    }

    pub fn with_issue(mut self, issue: impl Into<String>) -> Self {
        self.issue = Some(issue.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn with_team_id(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }

    pub fn with_sync_status(mut self, status: SyncStatus) -> Self {
        self.sync_status = status;
        self
    }

    /// Derived copy carrying a different (clamped) interval.
    pub fn with_interval(&self, interval: TimeInterval) -> Self {
        Self { interval, ..self.clone() }
    }

    /// Issue label, or [`DEFAULT_ISSUE`] when absent or blank.
    pub fn issue_label(&self) -> &str {
        self.issue.as_deref().filter(|s| !s.trim().is_empty()).unwrap_or(DEFAULT_ISSUE)
    }

    /// Title shown in listings: explicit title, else the issue label.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => self.issue_label(),
        }
    }

    pub fn is_synced(&self) -> bool {
        self.sync_status == SyncStatus::Synced
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> TimerRecord {
        TimerRecord::new(
            "t-1",
            "u-1",
            "p-1",
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_issue_label_defaults_when_missing_or_blank() {
        assert_eq!(sample().issue_label(), DEFAULT_ISSUE);
        assert_eq!(sample().with_issue("   ").issue_label(), DEFAULT_ISSUE);
        assert_eq!(sample().with_issue("WOB-1 fix").issue_label(), "WOB-1 fix");
    }

    #[test]
    fn test_display_title_falls_back_to_issue() {
        let record = sample().with_issue("WOB-7 review");
        assert_eq!(record.display_title(), "WOB-7 review");

        let titled = record.with_title("Code review");
        assert_eq!(titled.display_title(), "Code review");
    }

    #[test]
    fn test_with_interval_keeps_identity() {
        let record = sample().with_issue("WOB-2");
        let clamped = TimeInterval::at(record.interval.start);
        let derived = record.with_interval(clamped);

        assert_eq!(derived.id, record.id);
        assert_eq!(derived.issue, record.issue);
        assert_eq!(derived.interval, clamped);
        // original untouched
        assert_eq!(record.interval.duration(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_sync_status_parsing() {
        assert_eq!("true".parse::<SyncStatus>().unwrap(), SyncStatus::Synced);
        assert_eq!("False".parse::<SyncStatus>().unwrap(), SyncStatus::Unsynced);
        assert_eq!(SyncStatus::from(true), SyncStatus::Synced);
        assert_eq!(SyncStatus::default().to_string(), "unsynced");
    }

    #[test]
    fn test_deserializes_with_absent_optional_fields() {
        let json = r#"{
            "id": "t-9",
            "user_id": "u-1",
            "project_id": "p-1",
            "interval": {"start": "2024-01-01T09:00:00Z", "end": "2024-01-01T09:30:00Z"}
        }"#;
        let record: TimerRecord = serde_json::from_str(json).unwrap();

        assert!(record.title.is_none());
        assert_eq!(record.sync_status, SyncStatus::Unsynced);
        assert_eq!(record.issue_label(), DEFAULT_ISSUE);
    }
}
