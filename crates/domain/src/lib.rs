//! # Wobbly Domain
//!
//! Business domain types and models for the Wobbly time-tracking backend.
//!
//! This crate contains:
//! - Interval, timer and report data types (TimeInterval, TimerRecord,
//!   ReportWindow, Fragment, etc.)
//! - Typed filter criteria handed to the data-access layer
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Wobbly crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
