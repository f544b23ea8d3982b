//! GraphQL store adapters
//!
//! The store is a Hasura-style GraphQL endpoint; timers live in `timer_v2`
//! and team subscriptions hang off `team.payments`.

pub mod client;
pub mod filter;
pub mod teams;
pub mod timers;

pub use client::{GraphqlClient, GraphqlClientBuilder};
pub use teams::GraphqlPlanResolver;
pub use timers::GraphqlTimerRepository;
