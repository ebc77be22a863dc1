//! Export command implementation
//!
//! This module implements the `export` command: load a layer manifest, collect
//! its layers and write one image file per layer.

use crate::adapters::manifest::load_manifest;
use crate::adapters::progress::{ConsoleProgress, NoopProgress, ProgressReporter};
use crate::adapters::renderer::{DryRunRenderer, Renderer, SourceFileRenderer};
use crate::config::{load_config_or_default, StrataConfig};
use crate::core::collect::TreeCollector;
use crate::core::export::{ExportPipeline, ExportResult};
use crate::domain::{ExportFormat, LayeredDocument, StrataError};
use clap::Args;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::watch;

/// Failures listed individually before the rest are summarised
const MAX_LISTED_FAILURES: usize = 10;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Layer manifest (JSON) describing the document
    pub manifest: PathBuf,

    /// Override the destination directory
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Export only layers that are currently visible
    #[arg(long, conflicts_with = "all")]
    pub visible_only: bool,

    /// Export every layer, including hidden ones
    #[arg(long)]
    pub all: bool,

    /// Override the output format (png, jpeg, targa, bmp, tiff)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Dry run mode - resolve file names without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl ExportArgs {
    /// Applies command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut StrataConfig) -> Result<(), StrataError> {
        if let Some(out) = &self.out {
            tracing::info!(destination = %out.display(), "Overriding destination from CLI");
            config.export.destination_directory = out.clone();
        }

        if self.visible_only {
            config.export.visible_only = true;
        } else if self.all {
            config.export.visible_only = false;
        }

        if let Some(format) = &self.format {
            let parsed = ExportFormat::from_str(format)?;
            // Keep configured options when the format itself is unchanged
            if parsed.name() != config.format.name() {
                tracing::info!(format = %parsed.name(), "Overriding format from CLI");
                config.format = parsed;
            }
        }

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        Ok(())
    }

    /// Execute the export command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(manifest = %self.manifest.display(), "Starting export command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2);
            }
        };

        if let Err(e) = self.apply_overrides(&mut config) {
            eprintln!("{e}");
            return Ok(2);
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let prefs = config.export_preferences();

        let mut document = match load_manifest(&self.manifest) {
            Ok(d) => d,
            Err(e) => {
                eprintln!("Failed to load document: {e}");
                return Ok(5);
            }
        };

        let progress: Arc<dyn ProgressReporter> = if self.no_progress {
            Arc::new(NoopProgress)
        } else {
            Arc::new(ConsoleProgress::new())
        };

        let collection = TreeCollector::new(prefs.traverse_hidden_groups)
            .collect(document.layers(), progress.as_ref());
        let selected = collection.work_subset(prefs.visible_only).len();

        if prefs.dry_run {
            println!("🔍 DRY RUN MODE - No files will be written");
            println!();
        }

        if !self.yes && !prefs.dry_run {
            progress.hide();
            println!("Export Configuration:");
            println!("  Document: {}", document.name());
            println!(
                "  Layers: {} of {} ({})",
                selected,
                collection.len(),
                if prefs.visible_only { "visible only" } else { "all" }
            );
            println!("  Destination: {}", prefs.destination_directory.display());
            println!("  Format: {}", prefs.format);
            println!();
            print!("Proceed with export? [y/N]: ");
            use std::io::{self, Write};
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;

            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Export cancelled.");
                return Ok(0);
            }
        }

        // Once the pipeline starts it runs to completion so the document is
        // always restored
        if *shutdown_signal.borrow() {
            tracing::info!("Shutdown requested before export started");
            println!("Export cancelled.");
            return Ok(130);
        }

        let renderer: Arc<dyn Renderer> = if prefs.dry_run {
            Arc::new(DryRunRenderer::new())
        } else {
            Arc::new(SourceFileRenderer::new())
        };

        println!("🚀 Exporting {} layers...", selected);
        let pipeline = ExportPipeline::new(renderer, progress);
        let result = match pipeline.run(&mut document, &collection, &prefs).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(exit_code_for(&e));
            }
        };

        result.log_summary();
        print_summary(&result);

        let exit_code = if result.is_successful() {
            println!("✅ Export completed successfully!");
            0
        } else {
            println!("⚠️  Export completed with failures");
            1
        };

        Ok(exit_code)
    }
}

/// Exit code for an error that aborted the run
pub fn exit_code_for(error: &StrataError) -> i32 {
    match error {
        StrataError::Configuration(_) => 2,
        StrataError::NoExportableLayers(_) => 3,
        _ => 5,
    }
}

fn print_summary(result: &ExportResult) {
    println!();
    println!("📊 Export Summary:");
    println!("  Layers: {}", result.total_layers);
    println!("  Exported: {}", result.exported_count);
    println!("  Failed: {}", result.failed_count());
    println!("  Duration: {:.2}s", result.duration.as_secs_f64());
    println!("  Success Rate: {:.2}%", result.success_rate());
    println!();

    if !result.failures.is_empty() {
        println!("⚠️  Errors encountered:");
        for failure in result.failures.iter().take(MAX_LISTED_FAILURES) {
            println!("  - {} ({:?}): {}", failure.layer, failure.kind, failure.message);
        }
        if result.failures.len() > MAX_LISTED_FAILURES {
            println!(
                "  ... and {} more failures",
                result.failures.len() - MAX_LISTED_FAILURES
            );
        }
        println!();
    }
}
