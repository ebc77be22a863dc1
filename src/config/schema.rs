//! Configuration schema types
//!
//! This module defines the configuration structure for Strata. Every section
//! is optional in the TOML file and falls back to its defaults.

use crate::domain::preferences::{DEFAULT_MAX_NAME_ATTEMPTS, MAX_NAME_ATTEMPTS};
use crate::domain::{ExportFormat, ExportPreferences, FormatOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound for `export.max_name_attempts`
pub const MAX_NAME_ATTEMPTS_LIMIT: usize = MAX_NAME_ATTEMPTS;

/// Main Strata configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrataConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Output format and its options
    #[serde(default)]
    pub format: ExportFormat,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StrataConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.export.validate()?;
        self.format
            .validate()
            .map_err(|e| format!("Invalid format.{}: {}", self.format.name(), e))?;
        self.logging.validate()?;
        Ok(())
    }

    /// Export preferences for one run, as configured
    pub fn export_preferences(&self) -> ExportPreferences {
        ExportPreferences {
            destination_directory: self.export.destination_directory.clone(),
            format: self.format.clone(),
            visible_only: self.export.visible_only,
            traverse_hidden_groups: self.export.traverse_hidden_groups,
            max_name_attempts: self.export.max_name_attempts,
            create_destination: self.export.create_destination,
            dry_run: self.application.dry_run,
        }
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (resolve names and log, write nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving one file per layer
    #[serde(default = "default_destination_directory")]
    pub destination_directory: PathBuf,

    /// Export only layers visible when the document was collected
    #[serde(default)]
    pub visible_only: bool,

    /// Descend into hidden groups when collecting layers
    #[serde(default = "default_true")]
    pub traverse_hidden_groups: bool,

    /// Candidate file names tried per layer before giving up
    #[serde(default = "default_max_name_attempts")]
    pub max_name_attempts: usize,

    /// Create the destination directory if it does not exist
    #[serde(default = "default_true")]
    pub create_destination: bool,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.destination_directory.as_os_str().is_empty() {
            return Err("export.destination_directory cannot be empty".to_string());
        }

        if self.max_name_attempts == 0 || self.max_name_attempts > MAX_NAME_ATTEMPTS_LIMIT {
            return Err(format!(
                "export.max_name_attempts must be between 1 and {}, got {}",
                MAX_NAME_ATTEMPTS_LIMIT, self.max_name_attempts
            ));
        }

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            destination_directory: default_destination_directory(),
            visible_only: false,
            traverse_hidden_groups: true,
            max_name_attempts: default_max_name_attempts(),
            create_destination: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_destination_directory() -> PathBuf {
    PathBuf::from("layers")
}

fn default_max_name_attempts() -> usize {
    DEFAULT_MAX_NAME_ATTEMPTS
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: StrataConfig = toml::from_str("").unwrap();

        assert_eq!(config.application.log_level, "info");
        assert!(!config.application.dry_run);
        assert_eq!(config.export.destination_directory, PathBuf::from("layers"));
        assert!(config.export.traverse_hidden_groups);
        assert_eq!(config.export.max_name_attempts, 100);
        assert_eq!(config.format.name(), "png");
        assert!(!config.logging.local_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_section_is_tagged() {
        let config: StrataConfig = toml::from_str(
            r#"
[format]
type = "jpeg"
quality = 75
"#,
        )
        .unwrap();

        assert_eq!(config.format.name(), "jpeg");
        assert_eq!(config.format.extension(), "jpg");
    }

    #[test]
    fn test_invalid_format_options_rejected() {
        let config: StrataConfig = toml::from_str(
            r#"
[format]
type = "jpeg"
quality = 0
"#,
        )
        .unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.contains("format.jpeg"));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = StrataConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().unwrap_err().contains("log_level"));
    }

    #[test]
    fn test_max_name_attempts_bounds() {
        let mut config = StrataConfig::default();
        config.export.max_name_attempts = 0;
        assert!(config.validate().is_err());

        config.export.max_name_attempts = MAX_NAME_ATTEMPTS_LIMIT + 1;
        assert!(config.validate().is_err());

        config.export.max_name_attempts = 2000;
        assert!(config.validate().is_err());

        config.export.max_name_attempts = 1000;
        assert!(config.validate().is_ok());

        config.export.max_name_attempts = 1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_rotation() {
        let mut config = StrataConfig::default();
        config.logging.local_rotation = "size".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_preferences_from_config() {
        let mut config = StrataConfig::default();
        config.export.destination_directory = PathBuf::from("/tmp/out");
        config.export.visible_only = true;
        config.export.traverse_hidden_groups = false;
        config.export.max_name_attempts = 5;
        config.application.dry_run = true;

        let prefs = config.export_preferences();
        assert_eq!(prefs.destination_directory, PathBuf::from("/tmp/out"));
        assert!(prefs.visible_only);
        assert!(!prefs.traverse_hidden_groups);
        assert_eq!(prefs.max_name_attempts, 5);
        assert!(prefs.dry_run);
        assert!(prefs.create_destination);
    }
}
