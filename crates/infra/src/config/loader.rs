//! Configuration loader
//!
//! Environment wins when it names a store endpoint; otherwise the first
//! `config`/`wobbly` file (JSON or TOML) found near the process is used.
//!
//! ## Environment
//! - `WOBBLY_STORE_ENDPOINT`: GraphQL endpoint URL (required for env loading)
//! - `WOBBLY_STORE_ADMIN_SECRET`: Admin secret sent with every store request
//! - `WOBBLY_STORE_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `WOBBLY_STORE_MAX_ATTEMPTS`: Attempts per store request, retries included
//! - `WOBBLY_DEFAULT_TZ_OFFSET_MINUTES`: Day-boundary offset when a request has none
//! - `WOBBLY_DEFAULT_PLAN`: Plan tier for teams without a subscription
//! - `WOBBLY_LOG_LEVEL`: `EnvFilter` directive
//! - `WOBBLY_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! Retention rules have no env form; set them in a file.
//!
//! ## Files
//! `config.{json,toml}` then `wobbly.{json,toml}`, looked up in the working
//! directory, its parent, then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use wobbly_domain::constants::{DEFAULT_STORE_TIMEOUT_SECS, MAX_TZ_OFFSET_MINUTES};
use wobbly_domain::{
    Config, LoggingConfig, PlanTier, ReportingConfig, Result, StoreConfig, WobblyError,
};

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "wobbly.json", "wobbly.toml"];

/// Environment first, then a probed config file.
///
/// # Errors
/// `WobblyError::Config` when neither source yields a usable config.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Build a [`Config`] from `WOBBLY_*` variables.
///
/// Only `WOBBLY_STORE_ENDPOINT` is required; everything else falls back to
/// the defaults of [`Config`].
///
/// # Errors
/// Returns `WobblyError::Config` if the endpoint is missing or any value
/// fails to parse.
pub fn load_from_env() -> Result<Config> {
    let endpoint = env_var("WOBBLY_STORE_ENDPOINT")?;
    let admin_secret = std::env::var("WOBBLY_STORE_ADMIN_SECRET").ok().filter(|s| !s.is_empty());
    let timeout_secs =
        env_parse("WOBBLY_STORE_TIMEOUT_SECS", DEFAULT_STORE_TIMEOUT_SECS, "store timeout")?;
    let max_attempts = env_parse(
        "WOBBLY_STORE_MAX_ATTEMPTS",
        StoreConfig::default().max_attempts,
        "store max attempts",
    )?;

    let default_tz_offset_minutes =
        env_parse("WOBBLY_DEFAULT_TZ_OFFSET_MINUTES", 0i32, "default timezone offset")?;
    check_tz_offset(default_tz_offset_minutes)?;
    let default_plan = match std::env::var("WOBBLY_DEFAULT_PLAN") {
        Ok(raw) => PlanTier::from_str(&raw).map_err(WobblyError::Config)?,
        Err(_) => ReportingConfig::default().default_plan,
    };

    let logging_defaults = LoggingConfig::default();
    let level = std::env::var("WOBBLY_LOG_LEVEL").unwrap_or(logging_defaults.level);
    let json = env_bool("WOBBLY_LOG_JSON", logging_defaults.json);

    Ok(Config {
        store: StoreConfig { endpoint, admin_secret, timeout_secs, max_attempts },
        reporting: ReportingConfig {
            default_tz_offset_minutes,
            default_plan,
            ..ReportingConfig::default()
        },
        logging: LoggingConfig { level, json },
    })
}

/// Read `path`, or the first probed config file when `path` is `None`.
///
/// # Errors
/// `WobblyError::Config` for a missing file, an unreadable file, or content
/// that does not match its extension's format.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(WobblyError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            WobblyError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| WobblyError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, picking the format from the file extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    let config: Config = match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| WobblyError::Config(format!("Invalid TOML format: {}", e)))?,
        "json" => serde_json::from_str(contents)
            .map_err(|e| WobblyError::Config(format!("Invalid JSON format: {}", e)))?,
        _ => {
            return Err(WobblyError::Config(format!("Unsupported config format: {}", extension)))
        }
    };

    check_tz_offset(config.reporting.default_tz_offset_minutes)?;
    Ok(config)
}

fn check_tz_offset(minutes: i32) -> Result<()> {
    if minutes.abs() > MAX_TZ_OFFSET_MINUTES {
        return Err(WobblyError::Config(format!(
            "Default timezone offset {minutes} is outside +-{MAX_TZ_OFFSET_MINUTES} minutes"
        )));
    }
    Ok(())
}

/// First existing config file: working directory, its parent, then the
/// executable's directory.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Required variable; unset or empty is an error.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| WobblyError::Config(format!("Missing required environment variable: {}", key)))
}

/// Parse an optional environment variable, `default` when unset
fn env_parse<T>(key: &str, default: T, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| WobblyError::Config(format!("Invalid {}: {}", what, e))),
        Err(_) => Ok(default),
    }
}

/// Truthy env flag (`1`, `true`, `yes`, `on`); `default` when unset.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
