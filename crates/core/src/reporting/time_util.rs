//! Timestamp parsing/formatting and offset-aware day boundaries
//!
//! Offsets are minutes east of UTC (`+120` for UTC+2). A fixed offset has no
//! DST transitions, so every local day is exactly 24 hours long.

use chrono::{
    DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc,
};
use wobbly_domain::constants::MAX_TZ_OFFSET_MINUTES;
use wobbly_domain::{ReportWindow, Result, WobblyError};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Stateless date-math helpers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeUtil;

impl TimeUtil {
    /// Parse a store or request timestamp into a UTC instant.
    ///
    /// Accepts RFC 3339 with an offset, a zone-less `YYYY-MM-DDTHH:MM:SS[.f]`
    /// (the store drops the zone; read as UTC), or a bare `YYYY-MM-DD` date
    /// (UTC midnight).
    pub fn parse_timestamp(&self, raw: &str) -> Result<DateTime<Utc>> {
        let trimmed = raw.trim();

        if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(parsed.with_timezone(&Utc));
        }
        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(naive.and_utc());
            }
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(date.and_time(NaiveTime::MIN).and_utc());
        }

        Err(WobblyError::InvalidInput(format!("unrecognized timestamp '{raw}'")))
    }

    /// RFC 3339 with millisecond precision and a `Z` suffix.
    pub fn format_timestamp(&self, instant: DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Validated fixed offset for `minutes` east of UTC.
    pub fn offset(&self, minutes: i32) -> Result<FixedOffset> {
        if minutes.abs() > MAX_TZ_OFFSET_MINUTES {
            return Err(WobblyError::InvalidInput(format!(
                "timezone offset {minutes} minutes is outside +-{MAX_TZ_OFFSET_MINUTES}"
            )));
        }
        FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            WobblyError::InvalidInput(format!("timezone offset {minutes} minutes is invalid"))
        })
    }

    /// UTC instant of local midnight starting the day that contains `instant`.
    ///
    /// # Errors
    /// `InvalidInput` when that midnight lies outside the representable range.
    pub fn local_day_start(
        &self,
        instant: DateTime<Utc>,
        offset: FixedOffset,
    ) -> Result<DateTime<Utc>> {
        self.local_midnight(instant.with_timezone(&offset).date_naive(), offset)
    }

    /// UTC instant of local midnight starting `date`.
    ///
    /// # Errors
    /// `InvalidInput` when that midnight lies outside the representable range.
    pub fn local_midnight(&self, date: NaiveDate, offset: FixedOffset) -> Result<DateTime<Utc>> {
        date.and_time(NaiveTime::MIN)
            .checked_sub_signed(Duration::seconds(i64::from(offset.local_minus_utc())))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| out_of_range(format!("local midnight of {date}")))
    }

    /// `instant` moved forward by one day.
    ///
    /// # Errors
    /// `InvalidInput` past the end of the representable range.
    pub fn next_day(&self, instant: DateTime<Utc>) -> Result<DateTime<Utc>> {
        instant
            .checked_add_signed(Duration::days(1))
            .ok_or_else(|| out_of_range(format!("day after {instant}")))
    }

    /// Window covering whole local days `first..=last`.
    ///
    /// The window ends at local midnight after `last`.
    pub fn window_for_dates(
        &self,
        first: NaiveDate,
        last: NaiveDate,
        offset_minutes: i32,
    ) -> Result<ReportWindow> {
        let offset = self.offset(offset_minutes)?;
        let start = self.local_midnight(first, offset)?;
        let end = self.next_day(self.local_midnight(last, offset)?)?;
        ReportWindow::new(start, end)
    }

    /// Window from raw request strings, rejecting `start > end`.
    pub fn parse_window(&self, start: &str, end: &str) -> Result<ReportWindow> {
        ReportWindow::new(self.parse_timestamp(start)?, self.parse_timestamp(end)?)
    }
}

fn out_of_range(what: String) -> WobblyError {
    WobblyError::InvalidInput(format!("{what} is outside the supported date range"))
}
