//! Renderer backed by pre-encoded layer files
//!
//! Layers loaded from a manifest point at an already encoded image. This
//! renderer writes those bytes to the destination when the payload is already
//! in the requested format; format conversion is left to hosts with a real
//! encoder.

use super::traits::Renderer;
use crate::core::collect::LayerEntry;
use crate::domain::{ExportFormat, FormatOptions, LayeredDocument, Result, StrataError};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::{File, OpenOptions};

/// Copies each layer's source payload to its destination
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceFileRenderer;

impl SourceFileRenderer {
    /// Creates the renderer
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Renderer for SourceFileRenderer {
    fn name(&self) -> &'static str {
        "source-file"
    }

    async fn render(
        &self,
        document: &dyn LayeredDocument,
        layer: &LayerEntry,
        destination: &Path,
        format: &ExportFormat,
    ) -> Result<()> {
        let visible = document.node(&layer.path).map(|n| n.visible);
        if visible != Some(true) {
            return Err(StrataError::Render(format!(
                "layer '{}' is not visible in '{}'",
                layer.name,
                document.name()
            )));
        }

        let source = layer.source.as_deref().ok_or_else(|| {
            StrataError::Render(format!("layer '{}' has no pixel data", layer.name))
        })?;

        let source_ext = source
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        if !format.accepts_extension(source_ext) {
            return Err(StrataError::Render(format!(
                "cannot encode '{}' ({}) as {}",
                layer.name,
                source.display(),
                format.describe()
            )));
        }

        let mut input = File::open(source).await.map_err(|e| {
            StrataError::Render(format!("failed to open {}: {e}", source.display()))
        })?;
        // create_new: never clobber a file that appeared after name resolution
        let mut output = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(destination)
            .await
            .map_err(|e| {
                StrataError::Render(format!("failed to create {}: {e}", destination.display()))
            })?;

        let bytes = match copy_payload(&mut input, &mut output).await {
            Ok(bytes) => bytes,
            Err(e) => {
                drop(output);
                if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                    tracing::warn!(
                        destination = %destination.display(),
                        error = %remove_err,
                        "Failed to remove partial layer file"
                    );
                }
                return Err(StrataError::Render(format!(
                    "failed to write {}: {e}",
                    destination.display()
                )));
            }
        };

        tracing::debug!(
            layer = %layer.name,
            source = %source.display(),
            destination = %destination.display(),
            extension = format.extension(),
            bytes,
            "Wrote layer"
        );
        Ok(())
    }
}

async fn copy_payload(input: &mut File, output: &mut File) -> std::io::Result<u64> {
    let bytes = tokio::io::copy(input, output).await?;
    output.sync_all().await?;
    Ok(bytes)
}
