// Strata - Layered Image Batch Exporter
// Copyright (c) 2025 Strata Contributors
// Licensed under the MIT License

//! # Strata - Layered Image Batch Exporter
//!
//! Strata exports every leaf layer of a layered image document into its own
//! image file, named after the layer.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Collecting** the exportable layers of a layer tree in document order
//! - **Isolating** each layer by toggling visibility, one at a time
//! - **Restoring** the document's visibility and edit history afterwards
//! - **Naming** output files safely and without overwriting anything
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Export logic (collection, naming, snapshot, pipeline)
//! - [`adapters`] - Manifest loading, renderers, progress reporting
//! - [`domain`] - Documents, layers, formats and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use strata::adapters::manifest::load_manifest;
//! use strata::adapters::progress::ConsoleProgress;
//! use strata::adapters::renderer::SourceFileRenderer;
//! use strata::config::load_config;
//! use strata::core::collect::TreeCollector;
//! use strata::core::export::ExportPipeline;
//! use strata::domain::LayeredDocument;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("strata.toml")?;
//!     let prefs = config.export_preferences();
//!
//!     let mut document = load_manifest("poster.json")?;
//!     let progress = Arc::new(ConsoleProgress::new());
//!     let collection = TreeCollector::new(prefs.traverse_hidden_groups)
//!         .collect(document.layers(), progress.as_ref());
//!
//!     let pipeline = ExportPipeline::new(Arc::new(SourceFileRenderer::new()), progress);
//!     let result = pipeline.run(&mut document, &collection, &prefs).await?;
//!
//!     println!("Exported {} layers", result.exported_count);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Strata uses the [`domain::StrataError`] type for all errors. Failures that
//! affect a single layer are collected in the export result instead:
//!
//! ```rust,no_run
//! use strata::domain::StrataError;
//!
//! fn example() -> Result<(), StrataError> {
//!     let config = strata::config::load_config("strata.toml")?;
//!     let document = strata::adapters::manifest::load_manifest("poster.json")?;
//!     println!("{} -> {}", config.format, document.history_len());
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Strata uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!("Starting export");
//! warn!(layer = "Sky", "Layer has no pixel data");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
