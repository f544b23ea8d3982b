//! # Wobbly Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - GraphQL store adapters (timers, team plans) over `reqwest`
//! - Configuration loading from environment and files
//! - Tracing subscriber bootstrap
//!
//! ## Architecture
//! - Implements traits defined in `wobbly-core`
//! - Contains all "impure" code (network, filesystem, process env)

pub mod config;
pub mod errors;
pub mod graphql;
pub mod observability;

// Re-export commonly used items
pub use errors::InfraError;
pub use graphql::{GraphqlClient, GraphqlPlanResolver, GraphqlTimerRepository};
pub use observability::init_tracing;
