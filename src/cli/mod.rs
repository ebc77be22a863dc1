//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Strata using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Strata - export every layer of a layered image into its own file
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(version, about, long_about = None)]
#[command(author = "Strata Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "strata.toml", env = "STRATA_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "STRATA_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export each layer of a document to its own image file
    Export(commands::export::ExportArgs),

    /// Show a document's layer tree and what an export would pick up
    Inspect(commands::inspect::InspectArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["strata", "export", "poster.json"]);
        assert_eq!(cli.config, "strata.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["strata", "--config", "custom.toml", "export", "a.json"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["strata", "--log-level", "debug", "inspect", "a.json"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Inspect(_)));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["strata", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["strata", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_export_requires_manifest() {
        assert!(Cli::try_parse_from(["strata", "export"]).is_err());
    }
}
