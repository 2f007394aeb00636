//! Logging configuration and initialization
//!
//! Structured logging with tracing: compact console output for
//! development, an optional non-blocking file layer, and a JSON format
//! for log aggregation.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry,
};

// Re-export so callers can store the flush guard without naming the
// appender crate.
pub use tracing_appender::non_blocking::WorkerGuard as LogGuard;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Enable console output (default: true)
    pub console_enabled: bool,
    /// Enable file logging (default: false)
    pub file_enabled: bool,
    /// Log file path (default: `immersive-audio.log` in the working
    /// directory)
    pub file_path: Option<PathBuf>,
    /// Use JSON format (default: false)
    pub json_format: bool,
    /// Level filter applied when no environment override is set
    pub default_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            file_enabled: false,
            file_path: None,
            json_format: false,
            default_level: "info".to_string(),
        }
    }
}

/// Initialize the logging system with the given configuration
///
/// Returns a guard that must be kept alive for the duration of the
/// program so file output is flushed. Fails if a global subscriber is
/// already installed.
///
/// # Environment Variables
///
/// - `IMMERSIVE_AUDIO_LOG`: level filter (e.g. "debug" or
///   "info,immersive_audio=trace"); falls back to `RUST_LOG`, then to
///   `default_level`
/// - `IMMERSIVE_AUDIO_LOG_FORMAT`: set to "json" for JSON output
pub fn init_logging(
    config: &LogConfig,
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_env("IMMERSIVE_AUDIO_LOG")
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let use_json = std::env::var("IMMERSIVE_AUDIO_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(config.json_format);

    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();
    let mut file_guard = None;

    if config.file_enabled {
        let log_path = config
            .file_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("immersive-audio.log"));
        let file = std::fs::File::create(&log_path)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        file_guard = Some(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_ansi(false);
        layers.push(if use_json {
            file_layer.json().boxed()
        } else {
            file_layer.boxed()
        });
    }

    if config.console_enabled {
        layers.push(if use_json {
            fmt::layer().json().with_target(true).boxed()
        } else {
            fmt::layer().with_target(true).compact().boxed()
        });
    }

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        json_format = use_json,
        file_enabled = config.file_enabled,
        "logging initialized"
    );

    Ok(file_guard)
}

/// Initialize logging with the default configuration
pub fn init_logging_default(
) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    init_logging(&LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert!(config.console_enabled);
        assert!(!config.file_enabled);
        assert!(!config.json_format);
        assert_eq!(config.default_level, "info");
    }

    #[test]
    fn test_init_logging_installs_once() {
        let first = init_logging_default();
        assert!(first.is_ok());
        // The global subscriber slot is taken now.
        assert!(init_logging_default().is_err());
    }
}
