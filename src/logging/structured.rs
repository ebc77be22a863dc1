//! Subscriber setup for the CLI
//!
//! Human-readable events go to stderr so they never interleave with the
//! progress bar or the export summary on stdout. With `[logging]
//! local_enabled`, the same events are also written as JSON lines to
//! `<local_path>/strata.log`.
//!
//! ```no_run
//! use strata::config::LoggingConfig;
//! use strata::logging::init_logging;
//!
//! let _guard = init_logging("debug", &LoggingConfig::default())?;
//! # Ok::<(), strata::domain::StrataError>(())
//! ```

use crate::config::LoggingConfig;
use crate::domain::{Result, StrataError};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Flushes the JSON log file when dropped; hold it until exit
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Installs the global subscriber
///
/// `RUST_LOG` wins over `level` when set.
///
/// # Errors
///
/// [`StrataError::Configuration`] for an unknown level or a log directory
/// that cannot be created.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = parse_log_level(level)?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strata={level}")));

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter.clone())
        .boxed();
    let mut layers = vec![console];

    let mut file_guard = None;
    if config.local_enabled {
        let (writer, guard) = json_file_writer(config)?;
        layers.push(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_writer(writer)
                .with_filter(filter)
                .boxed(),
        );
        file_guard = Some(guard);
    }

    tracing_subscriber::registry().with(layers).init();
    tracing::debug!(
        local_enabled = config.local_enabled,
        local_path = %config.local_path,
        rotation = %config.local_rotation,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn json_file_writer(config: &LoggingConfig) -> Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        StrataError::Configuration(format!(
            "cannot create log directory {}: {e}",
            config.local_path
        ))
    })?;
    let appender = RollingFileAppender::new(
        parse_rotation(&config.local_rotation),
        &config.local_path,
        "strata.log",
    );
    Ok(tracing_appender::non_blocking(appender))
}

fn parse_rotation(rotation: &str) -> Rotation {
    match rotation {
        "hourly" => Rotation::HOURLY,
        "never" => Rotation::NEVER,
        _ => Rotation::DAILY,
    }
}

fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(StrataError::Configuration(format!(
            "unknown log level '{level}', expected trace, debug, info, warn or error"
        ))),
    }
}
