//! Configuration management for Strata.
//!
//! # Overview
//!
//! Strata reads an optional TOML file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `STRATA_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation of every section
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strata::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("strata.toml")?;
//!
//! println!("Destination: {}", config.export.destination_directory.display());
//! println!("Format: {}", config.format);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and dry-run mode
//! - [`ExportConfig`] - Destination and layer selection
//! - `format` - Output format, tagged by `type`
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [export]
//! destination_directory = "${HOME}/exports/poster"
//! visible_only = false
//! max_name_attempts = 100
//!
//! [format]
//! type = "png"
//! bit_depth = 24
//! transparency = true
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{ApplicationConfig, ExportConfig, LoggingConfig, StrataConfig};
