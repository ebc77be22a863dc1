//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "strata.toml")]
    pub output: String,

    /// Include every format's options as comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Strata configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Validate configuration: strata validate-config");
                println!("  3. Preview an export: strata inspect <manifest.json>");
                println!("  4. Run export: strata export <manifest.json>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Strata Configuration File

[application]
log_level = "info"
dry_run = false

[export]
destination_directory = "layers"
visible_only = false
traverse_hidden_groups = true
max_name_attempts = 100
create_destination = true

[format]
type = "png"
bit_depth = 24
transparency = true

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with every option documented
    fn generate_config_with_examples() -> String {
        r#"# Strata Configuration File
#
# Values may reference environment variables with ${VAR_NAME}. Every key can
# also be overridden with STRATA_<SECTION>_<KEY>, for example
# STRATA_EXPORT_DESTINATION_DIRECTORY.

[application]
# trace | debug | info | warn | error
log_level = "info"
# Resolve file names and log them without writing anything
dry_run = false

[export]
# One file per layer is written here as <layer name>[-NNN].<extension>
destination_directory = "${HOME}/exports/layers"
# Only export layers that are visible when the document is opened
visible_only = false
# Also collect layers inside hidden groups
traverse_hidden_groups = true
# Candidate names tried per layer: name, name-001 ... name-099
max_name_attempts = 100
create_destination = true

# Pick one format section.

[format]
type = "png"
bit_depth = 24          # 8 | 24
transparency = true
interlaced = false

# [format]
# type = "jpeg"
# quality = 90           # 1-100
# progressive = false

# [format]
# type = "targa"
# bit_depth = 32         # 16 | 24 | 32
# rle_compression = true

# [format]
# type = "bmp"
# bit_depth = 24         # 1 | 4 | 8 | 16 | 24 | 32
# rle_compression = false  # 4 and 8 bit only
# flip_row_order = false

# [format]
# type = "tiff"
# compression = "lzw"    # none | lzw | zip | jpeg
# transparency = true

[logging]
# JSON logs written to local_path, rotated daily | hourly | never
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrataConfig;
    use tempfile::TempDir;

    #[test]
    fn test_init_args_defaults() {
        let args = InitArgs {
            output: "strata.toml".to_string(),
            with_examples: false,
            force: false,
        };

        assert_eq!(args.output, "strata.toml");
        assert!(!args.with_examples);
        assert!(!args.force);
    }

    #[test]
    fn test_generate_minimal_config() {
        let config: StrataConfig = toml::from_str(&InitArgs::generate_minimal_config()).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_generate_config_with_examples() {
        // Parsed without env substitution, so ${HOME} stays literal
        let config: StrataConfig =
            toml::from_str(&InitArgs::generate_config_with_examples()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.format.name(), "png");
    }

    #[tokio::test]
    async fn test_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("strata.toml");
        fs::write(&output, "# existing").unwrap();

        let args = InitArgs {
            output: output.to_string_lossy().into_owned(),
            with_examples: false,
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&output).unwrap(), "# existing");

        let args = InitArgs { force: true, ..args };
        assert_eq!(args.execute().await.unwrap(), 0);
    }
}
