//! Domain types and models

pub mod filter;
pub mod interval;
pub mod plan;
pub mod report;
pub mod timer;

pub use filter::{Pagination, SearchTerm, SortOrder, TimerFilter};
pub use interval::TimeInterval;
pub use plan::{PlanTier, RetentionPolicy, RetentionRule};
pub use report::{
    Fragment, FragmentSource, PeriodTotal, Report, ReportSummary, ReportWindow, SubPeriod,
};
pub use timer::{SyncStatus, TimerRecord};
