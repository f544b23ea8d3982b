//! Local-day buckets and splitting intervals across them

use wobbly_domain::{
    Fragment, FragmentSource, ReportWindow, Result, SubPeriod, TimeInterval, TimerRecord,
};

use super::time_util::TimeUtil;

/// Splits intervals into per-day fragments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodSplitter;

impl PeriodSplitter {
    /// One half-open period per local calendar day, from the day containing
    /// `window.start` through the day containing `window.end` inclusive.
    ///
    /// Periods are contiguous and ascending. An empty window has none.
    pub fn build_periods(
        &self,
        window: &ReportWindow,
        offset_minutes: i32,
    ) -> Result<Vec<SubPeriod>> {
        let offset = TimeUtil.offset(offset_minutes)?;
        if window.is_empty() {
            return Ok(Vec::new());
        }

        let mut periods = Vec::new();
        let mut start = TimeUtil.local_day_start(window.start, offset)?;
        while start <= window.end {
            let end = TimeUtil.next_day(start)?;
            periods.push(SubPeriod { start, end });
            start = end;
        }
        Ok(periods)
    }

    /// Split bare intervals; fragments carry no source.
    pub fn split_intervals(&self, intervals: &[TimeInterval], periods: &[SubPeriod]) -> Vec<Fragment> {
        let mut fragments = Vec::with_capacity(intervals.len());
        for interval in intervals {
            cut(*interval, periods, |piece| fragments.push(Fragment::new(piece, None)));
        }
        fragments
    }

    /// Split records; each fragment carries its record's attributes.
    pub fn split_records(&self, records: &[TimerRecord], periods: &[SubPeriod]) -> Vec<Fragment> {
        let mut fragments = Vec::with_capacity(records.len());
        for record in records {
            self.split_record_into(record, periods, &mut fragments);
        }
        fragments
    }

    pub(crate) fn split_record_into(
        &self,
        record: &TimerRecord,
        periods: &[SubPeriod],
        out: &mut Vec<Fragment>,
    ) {
        let source = FragmentSource::from(record);
        cut(record.interval, periods, |piece| {
            out.push(Fragment::new(piece, Some(source.clone())));
        });
    }
}

/// Emit the pieces of `interval` falling in each period, in period order.
///
/// Positive-length pieces always count. A zero-length piece counts only when
/// the interval itself is zero-length and its instant lies in the period
/// under half-open membership, so an open entry lands in exactly one period.
fn cut(interval: TimeInterval, periods: &[SubPeriod], mut emit: impl FnMut(TimeInterval)) {
    let interval = interval.normalized();
    for period in periods {
        if period.start > interval.end {
            break;
        }
        let Some(piece) = interval.intersection(&period.as_interval()) else {
            continue;
        };
        if !piece.is_zero_length()
            || (interval.is_zero_length() && period.contains(interval.start))
        {
            emit(piece);
        }
    }
}
