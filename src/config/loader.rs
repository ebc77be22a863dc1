//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::StrataConfig;
use crate::domain::errors::StrataError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into StrataConfig
/// 4. Applies environment variable overrides (STRATA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use strata::config::loader::load_config;
///
/// let config = load_config("strata.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<StrataConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StrataError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StrataError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads `path` if it exists, otherwise starts from defaults
///
/// Environment overrides and validation apply either way.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<StrataConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::debug!(path = %path.display(), "No configuration file, using defaults");
    let mut config = StrataConfig::default();
    apply_env_overrides(&mut config);
    validate(&config)?;
    Ok(config)
}

/// Parses configuration from TOML text
///
/// Substitution, overrides and validation are applied as in [`load_config`].
pub fn parse_config(contents: &str) -> Result<StrataConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: StrataConfig = toml::from_str(&contents)
        .map_err(|e| StrataError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);
    validate(&config)?;

    Ok(config)
}

fn validate(config: &StrataConfig) -> Result<()> {
    config.validate().map_err(|e| {
        StrataError::Configuration(format!("Configuration validation failed: {}", e))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| StrataError::Other(format!("Invalid substitution pattern: {}", e)))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed_line = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(StrataError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using STRATA_* prefix
///
/// Environment variables follow the pattern: STRATA_<SECTION>_<KEY>
/// For example: STRATA_EXPORT_DESTINATION_DIRECTORY, STRATA_APPLICATION_DRY_RUN
fn apply_env_overrides(config: &mut StrataConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("STRATA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("STRATA_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Export overrides
    if let Ok(val) = std::env::var("STRATA_EXPORT_DESTINATION_DIRECTORY") {
        config.export.destination_directory = PathBuf::from(val);
    }
    if let Ok(val) = std::env::var("STRATA_EXPORT_VISIBLE_ONLY") {
        config.export.visible_only = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("STRATA_EXPORT_TRAVERSE_HIDDEN_GROUPS") {
        config.export.traverse_hidden_groups = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("STRATA_EXPORT_MAX_NAME_ATTEMPTS") {
        if let Ok(attempts) = val.parse() {
            config.export.max_name_attempts = attempts;
        }
    }
    if let Ok(val) = std::env::var("STRATA_EXPORT_CREATE_DESTINATION") {
        config.export.create_destination = val.parse().unwrap_or(true);
    }

    // Logging overrides
    if let Ok(val) = std::env::var("STRATA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("STRATA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("STRATA_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
