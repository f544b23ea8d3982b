//! Shared test helpers for `wobbly-core` integration tests.
//!
//! In-memory port mocks plus timestamp and record fixtures, so tests read as
//! scenarios rather than setup.

#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
