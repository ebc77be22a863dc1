//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so this file
//! initializes logging in a single test.

use strata::config::LoggingConfig;
use strata::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_init_logging_creates_log_directory() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("debug", &config).unwrap();
    strata::log_export_start!("poster", 3, log_path.display());
    drop(guard);

    assert!(log_path.is_dir());
}

#[test]
fn test_init_logging_rejects_unknown_level() {
    let result = init_logging("chatty", &LoggingConfig::default());
    assert!(result.is_err());
}
