//! Typed filter criteria for fetching timers
//!
//! The data-access layer turns a [`TimerFilter`] into whatever query its
//! store speaks. [`TimerFilter::matches`] and [`TimerFilter::apply`] give the
//! reference semantics every adapter must reproduce, and double as an
//! in-memory store for tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::report::ReportWindow;
use super::timer::TimerRecord;
use crate::errors::{Result, WobblyError};

/// Ordering of fetched timers by start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    StartAscending,
    StartDescending,
}

/// One-based page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Pagination {
    /// Both `page` and `limit` must be positive.
    pub fn new(page: u32, limit: u32) -> Result<Self> {
        if page == 0 || limit == 0 {
            return Err(WobblyError::InvalidInput(format!(
                "page and limit must be positive (page={page}, limit={limit})"
            )));
        }
        Ok(Self { page, limit })
    }

    /// Parse raw query-string values.
    pub fn parse(page: &str, limit: &str) -> Result<Self> {
        let page = page
            .trim()
            .parse::<u32>()
            .map_err(|e| WobblyError::InvalidInput(format!("invalid page '{page}': {e}")))?;
        let limit = limit
            .trim()
            .parse::<u32>()
            .map_err(|e| WobblyError::InvalidInput(format!("invalid limit '{limit}': {e}")))?;
        Self::new(page, limit)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.limit) * u64::from(self.page - 1)
    }
}

/// Case-insensitive substring search on timer titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Lowercased, trimmed term; `None` when nothing is left to search for.
    pub fn new(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase();
        (!normalized.is_empty()).then_some(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `%term%` with SQL `LIKE` metacharacters escaped.
    pub fn ilike_pattern(&self) -> String {
        let mut escaped = String::with_capacity(self.0.len() + 2);
        escaped.push('%');
        for ch in self.0.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped.push('%');
        escaped
    }

    pub fn matches(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }
}

/// Criteria for the timers a fetch should return.
///
/// Empty `project_names` / `user_emails` mean "any".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimerFilter {
    pub team_id: Option<String>,
    pub user_id: Option<String>,
    pub project_names: Vec<String>,
    pub user_emails: Vec<String>,
    /// Keep timers overlapping this window (boundaries inclusive).
    pub overlapping: Option<ReportWindow>,
    /// Keep timers whose start lies inside this window.
    pub started_within: Option<ReportWindow>,
    /// Keep timers starting at or after this instant.
    pub started_after: Option<DateTime<Utc>>,
    pub search: Option<SearchTerm>,
    pub pagination: Option<Pagination>,
    pub order: SortOrder,
}

impl TimerFilter {
    pub fn for_team(team_id: impl Into<String>) -> Self {
        Self { team_id: Some(team_id.into()), ..Self::default() }
    }

    pub fn user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn projects<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.project_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn user_emails<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_emails = emails.into_iter().map(Into::into).collect();
        self
    }

    pub fn overlapping(mut self, window: ReportWindow) -> Self {
        self.overlapping = Some(window);
        self
    }

    pub fn started_within(mut self, window: ReportWindow) -> Self {
        self.started_within = Some(window);
        self
    }

    /// Keeps the later of an existing and the new lower bound.
    pub fn started_after(mut self, floor: DateTime<Utc>) -> Self {
        self.started_after = Some(self.started_after.map_or(floor, |current| current.max(floor)));
        self
    }

    pub fn search(mut self, term: Option<SearchTerm>) -> Self {
        self.search = term;
        self
    }

    pub fn paginate(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    /// Whether `record` satisfies every criterion except pagination.
    pub fn matches(&self, record: &TimerRecord) -> bool {
        let interval = record.interval.normalized();

        if let Some(team_id) = &self.team_id {
            if record.team_id.as_ref() != Some(team_id) {
                return false;
            }
        }
        if let Some(user_id) = &self.user_id {
            if &record.user_id != user_id {
                return false;
            }
        }
        if !self.project_names.is_empty()
            && !record.project_name.as_ref().is_some_and(|name| self.project_names.contains(name))
        {
            return false;
        }
        if !self.user_emails.is_empty()
            && !record.user_email.as_ref().is_some_and(|email| self.user_emails.contains(email))
        {
            return false;
        }
        if let Some(window) = &self.overlapping {
            match window.as_interval() {
                Some(bounds) if interval.overlaps(&bounds) => {}
                _ => return false,
            }
        }
        if let Some(window) = &self.started_within {
            if interval.start < window.start || interval.start > window.end {
                return false;
            }
        }
        if let Some(floor) = self.started_after {
            if interval.start < floor {
                return false;
            }
        }
        if let Some(term) = &self.search {
            if !term.matches(record.display_title()) {
                return false;
            }
        }
        true
    }

    /// Filter, order and page `records` in memory.
    pub fn apply<I>(&self, records: I) -> Vec<TimerRecord>
    where
        I: IntoIterator<Item = TimerRecord>,
    {
        let mut selected: Vec<TimerRecord> =
            records.into_iter().filter(|record| self.matches(record)).collect();

        match self.order {
            SortOrder::StartAscending => selected.sort_by_key(|r| r.interval.start),
            SortOrder::StartDescending => {
                selected.sort_by_key(|r| std::cmp::Reverse(r.interval.start));
            }
        }

        match self.pagination {
            Some(page) => selected
                .into_iter()
                .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
                .take(page.limit() as usize)
                .collect(),
            None => selected,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
    }

    fn timer(id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> TimerRecord {
        TimerRecord::new(id, "u-1", "p-1", start, end)
            .with_team_id("team-1")
            .with_project_name("wobbly")
            .with_user_email("dev@example.com")
    }

    #[test]
    fn test_pagination_offset() {
        assert_eq!(Pagination::new(1, 20).unwrap().offset(), 0);
        assert_eq!(Pagination::new(3, 20).unwrap().offset(), 40);
    }

    #[test]
    fn test_pagination_rejects_zero_and_garbage() {
        assert!(matches!(Pagination::new(0, 10), Err(WobblyError::InvalidInput(_))));
        assert!(matches!(Pagination::new(1, 0), Err(WobblyError::InvalidInput(_))));
        assert!(Pagination::parse("two", "10").is_err());
        assert!(Pagination::parse("-1", "10").is_err());
        assert_eq!(Pagination::parse(" 2 ", "5").unwrap().offset(), 5);
    }

    #[test]
    fn test_search_term_normalization_and_escaping() {
        assert!(SearchTerm::new("   ").is_none());

        let term = SearchTerm::new("  100% Done_ ").unwrap();
        assert_eq!(term.as_str(), "100% done_");
        assert_eq!(term.ilike_pattern(), "%100\\% done\\_%");
        assert!(term.matches("Release 100% DONE_ today"));
    }

    #[test]
    fn test_overlap_filter_is_boundary_inclusive() {
        let window = ReportWindow::new(at(2, 0), at(3, 0)).unwrap();
        let filter = TimerFilter::for_team("team-1").overlapping(window);

        assert!(filter.matches(&timer("touch-start", at(1, 20), at(2, 0))));
        assert!(filter.matches(&timer("touch-end", at(3, 0), at(3, 2))));
        assert!(filter.matches(&timer("spanning", at(1, 0), at(4, 0))));
        assert!(!filter.matches(&timer("before", at(1, 0), at(1, 23))));
    }

    #[test]
    fn test_project_and_email_lists() {
        let record = timer("t", at(1, 9), at(1, 10));

        assert!(TimerFilter::default().projects(["wobbly"]).matches(&record));
        assert!(!TimerFilter::default().projects(["other"]).matches(&record));
        assert!(TimerFilter::default().user_emails(["dev@example.com"]).matches(&record));
        assert!(!TimerFilter::default().user_emails(["ops@example.com"]).matches(&record));
        assert!(!TimerFilter::for_team("team-2").matches(&record));
    }

    #[test]
    fn test_started_after_keeps_latest_floor() {
        let filter = TimerFilter::default().started_after(at(2, 0)).started_after(at(1, 0));
        assert_eq!(filter.started_after, Some(at(2, 0)));
    }

    #[test]
    fn test_apply_orders_and_pages() {
        let records = vec![
            timer("a", at(1, 9), at(1, 10)),
            timer("c", at(3, 9), at(3, 10)),
            timer("b", at(2, 9), at(2, 10)),
        ];
        let filter = TimerFilter::for_team("team-1")
            .order(SortOrder::StartDescending)
            .paginate(Pagination::new(2, 2).unwrap());

        let page = filter.apply(records);
        let ids: Vec<_> = page.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }
}
