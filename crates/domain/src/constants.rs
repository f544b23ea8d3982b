//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Timer defaults
pub const DEFAULT_ISSUE: &str = "Untitled issue";

// Time zone offsets are minutes east of UTC; real zones stay within +-14h.
pub const MAX_TZ_OFFSET_MINUTES: i32 = 14 * 60;
pub const MINUTES_PER_DAY: i64 = 24 * 60;

// Plan retention defaults (days of history visible)
pub const FREE_RETENTION_DAYS: u32 = 30;
pub const BASIC_RETENTION_DAYS: u32 = 90;
pub const PRO_RETENTION_DAYS: u32 = 365;

// Data store defaults
pub const DEFAULT_STORE_ENDPOINT: &str = "http://localhost:8080/v1/graphql";
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;
pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";
