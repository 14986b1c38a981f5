//! Logging bootstrap built on the tracing ecosystem.
//!
//! # Environment Variables
//!
//! - `PARLEY_LOG`: Filter directive (like `RUST_LOG`), e.g., `parley=debug`
//! - `PARLEY_LOG_FORMAT`: Output format for stderr: `pretty`, `json`, `compact`
//! - `PARLEY_LOG_DIR`: Directory for file logging (default `~/.parley/logs`)
//!
//! Defaults come from the `[logging]` section of `parley.toml`. Stderr
//! output is pretty on a TTY and compact otherwise; file logging, when
//! enabled, writes daily-rotated JSON lines.

use std::env;
use std::io;
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::Error;
use crate::config::LoggingSettings;

/// Log output format for stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Pretty, human-readable output with colors (default for TTY)
    #[default]
    Pretty,
    /// JSON output (one line per event)
    Json,
    /// Compact, single-line output
    Compact,
}

impl LogFormat {
    /// All available log formats.
    pub const VALUES: &[LogFormat] = &[LogFormat::Pretty, LogFormat::Json, LogFormat::Compact];

    /// Parse a log format from a string.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            "compact" => Some(LogFormat::Compact),
            _ => None,
        }
    }

    /// Get the string representation of this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
            LogFormat::Compact => "compact",
        }
    }
}

fn build_env_filter(settings: &LoggingSettings) -> EnvFilter {
    let filter = env::var("PARLEY_LOG")
        .ok()
        .or_else(|| env::var("RUST_LOG").ok())
        .unwrap_or_else(|| settings.level.clone());

    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter))
}

/// Determine the stderr format: env override, then config, then TTY detection.
fn detect_format(settings: &LoggingSettings) -> LogFormat {
    if let Ok(fmt_str) = env::var("PARLEY_LOG_FORMAT")
        && let Some(fmt) = LogFormat::parse_str(&fmt_str)
    {
        return fmt;
    }

    if let Some(fmt) = LogFormat::parse_str(&settings.format)
        && fmt != LogFormat::Pretty
    {
        return fmt;
    }

    if atty::is(atty::Stream::Stderr) { LogFormat::Pretty } else { LogFormat::Compact }
}

/// Get the log directory path.
fn log_dir() -> Result<PathBuf, Error> {
    if let Ok(custom_dir) = env::var("PARLEY_LOG_DIR") {
        return Ok(PathBuf::from(custom_dir));
    }

    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map_err(|_| Error::Config("could not determine home directory".to_string()))?;

    Ok(PathBuf::from(home).join(".parley").join("logs"))
}

/// Initialize the global tracing subscriber.
///
/// Returns the file appender's worker guard when file logging is enabled;
/// the caller must keep it alive for the process lifetime or buffered log
/// lines are dropped on exit.
pub fn init_logging(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, Error> {
    let env_filter = build_env_filter(settings);
    let format = detect_format(settings);

    let registry = Registry::default().with(env_filter);

    if settings.file.enabled {
        let log_dir = log_dir()?;
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| Error::Config(format!("failed to create log directory: {}", e)))?;

        let file_appender = tracing_appender::rolling::daily(log_dir, "parley.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        match format {
            LogFormat::Pretty => {
                registry
                    .with(fmt::layer().pretty().with_writer(io::stderr).with_ansi(true))
                    .with(fmt::layer().json().with_writer(non_blocking))
                    .init();
            }
            LogFormat::Json => {
                registry
                    .with(fmt::layer().json().with_writer(io::stderr))
                    .with(fmt::layer().json().with_writer(non_blocking))
                    .init();
            }
            LogFormat::Compact => {
                registry
                    .with(fmt::layer().compact().with_writer(io::stderr))
                    .with(fmt::layer().json().with_writer(non_blocking))
                    .init();
            }
        }

        Ok(Some(guard))
    } else {
        match format {
            LogFormat::Pretty => {
                registry
                    .with(fmt::layer().pretty().with_writer(io::stderr).with_ansi(true))
                    .init();
            }
            LogFormat::Json => {
                registry.with(fmt::layer().json().with_writer(io::stderr)).init();
            }
            LogFormat::Compact => {
                registry.with(fmt::layer().compact().with_writer(io::stderr)).init();
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parse_str() {
        assert_eq!(LogFormat::parse_str("pretty"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse_str("PRETTY"), Some(LogFormat::Pretty));
        assert_eq!(LogFormat::parse_str("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse_str("compact"), Some(LogFormat::Compact));
        assert_eq!(LogFormat::parse_str("invalid"), None);
    }

    #[test]
    fn test_log_format_as_str() {
        assert_eq!(LogFormat::Pretty.as_str(), "pretty");
        assert_eq!(LogFormat::Json.as_str(), "json");
        assert_eq!(LogFormat::Compact.as_str(), "compact");
    }

    #[test]
    fn test_log_format_round_trip() {
        for format in LogFormat::VALUES {
            assert_eq!(LogFormat::parse_str(format.as_str()), Some(*format));
        }
    }

    #[test]
    fn test_log_format_default() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }
}
