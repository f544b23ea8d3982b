//! Paged timer listing for a single user

pub mod service;

pub use service::{TimerListQuery, TimerListService};
