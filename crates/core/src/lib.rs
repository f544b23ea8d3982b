//! # Wobbly Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The reporting interval-normalization engine (clipping, day splitting,
//!   plan retention floors)
//! - Port/adapter interfaces (traits) for the data store and billing lookups
//! - Report and timer-list services orchestrating those ports
//!
//! ## Architecture Principles
//! - Only depends on `wobbly-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod clock;
pub mod reporting;
pub mod timers;

// Re-export specific items to avoid ambiguity
pub use clock::{Clock, FixedClock, SystemClock};
pub use reporting::ports::{PlanResolver, TimerFetcher};
pub use reporting::{
    PeriodSplitter, PlanDateFloor, ReportAssembler, ReportRequest, ReportService, TimeUtil,
    WindowClipper,
};
pub use timers::{TimerListQuery, TimerListService};
