//! Reporting interval-normalization engine
//!
//! Leaf to root:
//! - [`time_util`]: timestamp parsing and day-boundary math
//! - [`clipper`]: restricting one interval to a window
//! - [`periods`]: day buckets and per-bucket fragments
//! - [`plan_floor`]: plan retention folded into the window
//! - [`assembler`]: the pure pipeline tying them together
//! - [`service`]: fetch + plan lookup through [`ports`], then assembly

pub mod assembler;
pub mod clipper;
pub mod periods;
pub mod plan_floor;
pub mod ports;
pub mod service;
pub mod time_util;

pub use assembler::ReportAssembler;
pub use clipper::WindowClipper;
pub use periods::PeriodSplitter;
pub use plan_floor::PlanDateFloor;
pub use service::{ReportRequest, ReportService};
pub use time_util::TimeUtil;
