//! Export pipeline - renders every collected layer into its own file
//!
//! A run takes a cached [`Collection`], snapshots the document, hides the work
//! subset, and then for each layer in turn reveals it, resolves a free file
//! name, renders, and hides it again. The snapshot is restored at the end no
//! matter how individual layers fared.

use crate::adapters::progress::ProgressReporter;
use crate::adapters::renderer::{DryRunRenderer, Renderer};
use crate::core::collect::{Collection, LayerEntry};
use crate::core::export::summary::{ExportFailure, ExportResult};
use crate::core::naming::{sanitize_layer_name, UniqueFileResolver};
use crate::core::state::VisibilityGuard;
use crate::domain::{ExportPreferences, FormatOptions, LayeredDocument, Result, StrataError};
use crate::{log_export_complete, log_export_start, log_layer_failure};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Sequential per-layer exporter
pub struct ExportPipeline {
    renderer: Arc<dyn Renderer>,
    progress: Arc<dyn ProgressReporter>,
}

/// File names handed out during one run
struct Destinations<'a> {
    prefs: &'a ExportPreferences,
    resolver: UniqueFileResolver,
    claimed: HashSet<PathBuf>,
}

impl<'a> Destinations<'a> {
    fn new(prefs: &'a ExportPreferences) -> Self {
        Self {
            prefs,
            resolver: UniqueFileResolver::new(prefs.max_name_attempts),
            claimed: HashSet::new(),
        }
    }

    /// First free name for `layer`, taken on disk or earlier in this run
    fn claim(&mut self, layer: &LayerEntry) -> Result<PathBuf> {
        let base = self
            .prefs
            .destination_directory
            .join(sanitize_layer_name(&layer.name));
        let claimed = &self.claimed;
        let path = self
            .resolver
            .resolve(&base, self.prefs.file_extension(), |p| {
                claimed.contains(p) || p.exists()
            })?;
        self.claimed.insert(path.clone());
        Ok(path)
    }
}

impl ExportPipeline {
    /// Create a new pipeline
    pub fn new(renderer: Arc<dyn Renderer>, progress: Arc<dyn ProgressReporter>) -> Self {
        Self { renderer, progress }
    }

    /// Exports the collected layers of `document`
    ///
    /// Per-layer failures are recorded in the returned [`ExportResult`] and
    /// never stop the loop. With `prefs.dry_run` set, renders go through a
    /// [`DryRunRenderer`] whatever renderer the pipeline was built with. The
    /// progress reporter is hidden on every return.
    ///
    /// # Errors
    ///
    /// Fails before anything is written when:
    /// - the collection, or the subset selected by `visible_only`, is empty
    /// - the format options are invalid or the destination is unusable
    /// - the document cannot be snapshotted
    ///
    /// Also fails if the snapshot cannot be restored afterwards.
    pub async fn run(
        &self,
        document: &mut dyn LayeredDocument,
        collection: &Collection,
        prefs: &ExportPreferences,
    ) -> Result<ExportResult> {
        let outcome = self.export(document, collection, prefs).await;
        self.progress.hide();
        outcome
    }

    async fn export(
        &self,
        document: &mut dyn LayeredDocument,
        collection: &Collection,
        prefs: &ExportPreferences,
    ) -> Result<ExportResult> {
        let start_time = Instant::now();

        if collection.is_empty() {
            return Err(StrataError::NoExportableLayers(format!(
                "document '{}' contains no exportable layers",
                document.name()
            )));
        }

        prefs.format.validate().map_err(StrataError::Configuration)?;
        let renderer = self.renderer_for(prefs);
        let dry_run = renderer.is_dry_run();
        ensure_destination(prefs, dry_run)?;

        let mut destinations = Destinations::new(prefs);

        if let Some(background) = collection.single_background() {
            tracing::info!(
                document = %document.name(),
                layer = %background.name,
                "Document is a single background, exporting without snapshot"
            );
            let mut result = ExportResult::new(1, dry_run);
            result.special_case = true;
            self.progress.set_label("Exporting layers");
            export_layer(&*renderer, &*document, background, &mut destinations, &mut result)
                .await;
            self.progress.tick(1, 1);
            return Ok(finish(result, start_time));
        }

        let work = collection.work_subset(prefs.visible_only);
        if work.is_empty() {
            return Err(StrataError::NoExportableLayers(format!(
                "no visible layers to export in '{}'",
                document.name()
            )));
        }

        let total = work.len();
        let mut result = ExportResult::new(total, dry_run);
        log_export_start!(
            document.name(),
            total,
            prefs.destination_directory.display()
        );

        let mut guard = VisibilityGuard::new(document);
        guard.capture()?;

        for layer in &work {
            if let Err(e) = guard.conceal(&layer.path) {
                tracing::warn!(layer = %layer.name, error = %e, "Failed to hide layer before export");
            }
        }

        self.progress.set_label("Exporting layers");
        for (index, layer) in work.iter().enumerate() {
            match guard.isolate(&layer.path) {
                Ok(()) => {
                    export_layer(
                        &*renderer,
                        guard.document(),
                        layer,
                        &mut destinations,
                        &mut result,
                    )
                    .await;
                    if let Err(e) = guard.conceal(&layer.path) {
                        tracing::warn!(layer = %layer.name, error = %e, "Failed to hide layer after export");
                    }
                }
                Err(e) => {
                    log_layer_failure!(layer.name, e);
                    result.record_failure(ExportFailure::from_error(&layer.name, &e));
                }
            }

            self.progress.tick(index + 1, total);
            tokio::task::yield_now().await;
        }

        guard.restore()?;

        Ok(finish(result, start_time))
    }

    fn renderer_for(&self, prefs: &ExportPreferences) -> Arc<dyn Renderer> {
        if prefs.dry_run && !self.renderer.is_dry_run() {
            tracing::info!(
                renderer = self.renderer.name(),
                "Dry run requested, renders will not be written"
            );
            return Arc::new(DryRunRenderer::new());
        }
        Arc::clone(&self.renderer)
    }
}

/// Resolves a destination for one layer, renders it and records the outcome
async fn export_layer(
    renderer: &dyn Renderer,
    document: &dyn LayeredDocument,
    layer: &LayerEntry,
    destinations: &mut Destinations<'_>,
    result: &mut ExportResult,
) {
    let destination = match destinations.claim(layer) {
        Ok(path) => path,
        Err(e) => {
            log_layer_failure!(layer.name, e);
            result.record_failure(ExportFailure::from_error(&layer.name, &e));
            return;
        }
    };

    match renderer
        .render(document, layer, &destination, &destinations.prefs.format)
        .await
    {
        Ok(()) => {
            tracing::debug!(
                layer = %layer.name,
                destination = %destination.display(),
                renderer = renderer.name(),
                "Exported layer"
            );
            result.record_success(destination);
        }
        Err(e) => {
            log_layer_failure!(layer.name, e);
            result.record_failure(ExportFailure::from_error(&layer.name, &e));
        }
    }
}

fn finish(result: ExportResult, start_time: Instant) -> ExportResult {
    let result = result.with_duration(start_time.elapsed());
    log_export_complete!(result.exported_count, result.duration);
    result
}

/// Makes sure the destination directory exists
///
/// Dry runs never create it.
fn ensure_destination(prefs: &ExportPreferences, dry_run: bool) -> Result<()> {
    let dir: &Path = &prefs.destination_directory;
    if dir.is_dir() {
        return Ok(());
    }
    if dir.exists() {
        return Err(StrataError::Configuration(format!(
            "Destination {} is not a directory",
            dir.display()
        )));
    }
    if !prefs.create_destination {
        return Err(StrataError::Configuration(format!(
            "Destination directory {} does not exist",
            dir.display()
        )));
    }
    if dry_run {
        tracing::info!(destination = %dir.display(), "DRY RUN: would create destination directory");
        return Ok(());
    }

    std::fs::create_dir_all(dir).map_err(|e| {
        StrataError::Configuration(format!(
            "Failed to create destination directory {}: {}",
            dir.display(),
            e
        ))
    })?;
    tracing::info!(destination = %dir.display(), "Created destination directory");
    Ok(())
}
