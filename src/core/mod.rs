//! Core export logic for Strata.
//!
//! # Modules
//!
//! - [`collect`] - Flattening the layer tree into an ordered work list
//! - [`naming`] - File name sanitizing and collision-free resolution
//! - [`state`] - Visibility snapshot and restore around a run
//! - [`export`] - The export pipeline and its result
//!
//! # Export Workflow
//!
//! 1. **Collect**: Walk the layer tree once and cache the exportable layers
//! 2. **Capture**: Snapshot every node's visibility and the history position
//! 3. **Export**: For each layer, show only that layer, pick a free file name,
//!    and render
//! 4. **Restore**: Put visibility and history back as they were
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use strata::adapters::manifest::load_manifest;
//! use strata::adapters::progress::NoopProgress;
//! use strata::adapters::renderer::SourceFileRenderer;
//! use strata::core::collect::TreeCollector;
//! use strata::core::export::ExportPipeline;
//! use strata::domain::{ExportPreferences, LayeredDocument};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut document = load_manifest("poster.json")?;
//! let prefs = ExportPreferences::new("out");
//!
//! let collection = TreeCollector::new(prefs.traverse_hidden_groups)
//!     .collect(document.layers(), &NoopProgress);
//!
//! let pipeline = ExportPipeline::new(Arc::new(SourceFileRenderer::new()), Arc::new(NoopProgress));
//! let result = pipeline.run(&mut document, &collection, &prefs).await?;
//!
//! println!("Exported: {}", result.exported_count);
//! println!("Errors: {}", result.had_errors);
//! # Ok(())
//! # }
//! ```

pub mod collect;
pub mod export;
pub mod naming;
pub mod state;
