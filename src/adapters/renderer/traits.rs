//! Renderer abstraction
//!
//! A renderer encodes the document as currently displayed (one layer isolated
//! by the pipeline) and writes it to a single file.

use crate::core::collect::LayerEntry;
use crate::domain::{ExportFormat, LayeredDocument, Result};
use async_trait::async_trait;
use std::path::Path;

/// Writes one encoded image per call
///
/// Implementations receive the document read-only and must not change its
/// state.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this renderer writes nothing to disk
    fn is_dry_run(&self) -> bool {
        false
    }

    /// Encodes `layer` and writes it to exactly `destination`
    ///
    /// # Arguments
    ///
    /// * `document` - Document with `layer` isolated
    /// * `layer` - Layer being exported
    /// * `destination` - Resolved, currently unused path
    /// * `format` - Output format and its options
    ///
    /// # Errors
    ///
    /// Returns an error if the layer cannot be encoded or the file cannot be
    /// written. The pipeline records it against this layer and moves on.
    async fn render(
        &self,
        document: &dyn LayeredDocument,
        layer: &LayerEntry,
        destination: &Path,
        format: &ExportFormat,
    ) -> Result<()>;
}
