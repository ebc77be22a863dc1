//! Renderer that writes nothing

use super::traits::Renderer;
use crate::core::collect::LayerEntry;
use crate::domain::{ExportFormat, FormatOptions, LayeredDocument, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records the destinations it would have written
#[derive(Debug, Default)]
pub struct DryRunRenderer {
    planned: Mutex<Vec<PathBuf>>,
}

impl DryRunRenderer {
    /// Creates the renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Destinations requested so far, in call order
    pub fn planned(&self) -> Vec<PathBuf> {
        self.planned
            .lock()
            .map(|p| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Renderer for DryRunRenderer {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    fn is_dry_run(&self) -> bool {
        true
    }

    async fn render(
        &self,
        document: &dyn LayeredDocument,
        layer: &LayerEntry,
        destination: &Path,
        format: &ExportFormat,
    ) -> Result<()> {
        tracing::info!(
            document = %document.name(),
            layer = %layer.name,
            destination = %destination.display(),
            format = %format.describe(),
            "DRY RUN: would write layer"
        );
        if let Ok(mut planned) = self.planned.lock() {
            planned.push(destination.to_path_buf());
        }
        Ok(())
    }
}
