//! Tracing subscriber setup

use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use wobbly_domain::{LoggingConfig, Result, WobblyError};

/// Install the global subscriber described by `config`.
///
/// `RUST_LOG`, when set, takes precedence over `config.level`. Returns
/// `Ok(false)` when a global subscriber was already installed; that is not an
/// error, so tests and embedders may call this more than once.
///
/// # Errors
/// Returns `WobblyError::Config` when the level is not a valid filter
/// directive.
pub fn init_tracing(config: &LoggingConfig) -> Result<bool> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    match installed {
        Ok(()) => {
            debug!(level = %config.level, json = config.json, "tracing initialized");
            Ok(true)
        }
        Err(err) => {
            debug!(error = %err, "tracing already initialized; keeping existing subscriber");
            Ok(false)
        }
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(from_env) = EnvFilter::try_from_default_env() {
        return Ok(from_env);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| WobblyError::Config(format!("Invalid log level '{}': {}", config.level, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_tolerated() {
        let config = LoggingConfig::default();

        // Whichever call installs first, the second one must find it in place.
        init_tracing(&config).unwrap();
        assert!(!init_tracing(&config).unwrap());
    }

    #[test]
    fn test_invalid_level_is_config_error() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig { level: "wobbly_core=loud".to_string(), json: false };

        let err = build_filter(&config).unwrap_err();
        assert!(matches!(err, WobblyError::Config(_)));
    }

    #[test]
    fn test_directive_level_accepted() {
        let config = LoggingConfig { level: "info,wobbly_core=debug".to_string(), json: true };
        assert!(build_filter(&config).is_ok());
    }
}
