//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local file logs with rotation
//!
//! # Example
//!
//! ```no_run
//! use strata::logging::init_logging;
//! use strata::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! // Use tracing macros for logging
//! tracing::info!("Application started");
//! tracing::error!(error = "Something went wrong", "Error occurred");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export run
///
/// # Example
///
/// ```no_run
/// use strata::log_export_start;
///
/// log_export_start!("poster", 12, "/tmp/out");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($document:expr, $layers:expr, $destination:expr) => {
        tracing::info!(
            document = %$document,
            layers = $layers,
            destination = %$destination,
            "Starting export"
        );
    };
}

/// Log a layer that could not be exported
///
/// # Example
///
/// ```no_run
/// use strata::log_layer_failure;
/// use strata::domain::StrataError;
///
/// let error = StrataError::Render("disk full".to_string());
/// log_layer_failure!("Sky", &error);
/// ```
#[macro_export]
macro_rules! log_layer_failure {
    ($layer:expr, $error:expr) => {
        tracing::warn!(
            layer = %$layer,
            error = %$error,
            "Failed to export layer"
        );
    };
}

/// Log the completion of an export run
///
/// # Example
///
/// ```no_run
/// use strata::log_export_complete;
/// use std::time::Duration;
///
/// let count = 42;
/// let duration = Duration::from_secs(10);
/// log_export_complete!(count, duration);
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($count:expr, $duration:expr) => {
        tracing::info!(
            count = $count,
            duration_ms = $duration.as_millis() as u64,
            "Export completed"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use strata::log_error_with_context;
/// use strata::domain::StrataError;
///
/// let error = StrataError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
