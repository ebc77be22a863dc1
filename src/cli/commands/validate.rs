//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Strata configuration file.

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!(
            "  Destination: {}",
            config.export.destination_directory.display()
        );
        println!("  Visible Only: {}", config.export.visible_only);
        println!(
            "  Traverse Hidden Groups: {}",
            config.export.traverse_hidden_groups
        );
        println!("  Max Name Attempts: {}", config.export.max_name_attempts);
        println!(
            "  Create Destination: {}",
            config.export.create_destination
        );
        println!("  Format: {}", config.format);
        if config.logging.local_enabled {
            println!(
                "  File Logging: {} ({})",
                config.logging.local_path, config.logging.local_rotation
            );
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config_exits_zero() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[export]\nvisible_only = true\n").unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_config_exits_two() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[format]\ntype = \"png\"\nbit_depth = 12\n")
            .unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(&file.path().to_string_lossy())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_missing_config_exits_two() {
        let code = ValidateArgs {}
            .execute("no-such-strata.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
