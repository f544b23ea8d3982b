//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STORE_ENDPOINT, DEFAULT_STORE_TIMEOUT_SECS};
use crate::types::{PlanTier, RetentionPolicy};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub reporting: ReportingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote GraphQL data store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub endpoint: String,
    #[serde(default, skip_serializing)]
    pub admin_secret: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_STORE_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    3
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_STORE_ENDPOINT.to_string(),
            admin_secret: None,
            timeout_secs: default_timeout_secs(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Report engine defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingConfig {
    /// Minutes east of UTC used when a request carries no offset.
    #[serde(default)]
    pub default_tz_offset_minutes: i32,
    /// Tier assumed for teams without a subscription on record.
    #[serde(default = "default_plan")]
    pub default_plan: PlanTier,
    #[serde(default)]
    pub retention: RetentionPolicy,
}

fn default_plan() -> PlanTier {
    PlanTier::Free
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            default_tz_offset_minutes: 0,
            default_plan: default_plan(),
            retention: RetentionPolicy::default(),
        }
    }
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `wobbly_core=debug`.
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level(), json: false }
    }
}
