//! Observability bootstrap
//!
//! Installs the global `tracing` subscriber used by every crate.

pub mod logging;

pub use logging::init_tracing;
