//! JSON layer manifests
//!
//! A manifest describes a layered document: its layer tree and, per leaf, the
//! file holding that layer's encoded pixels. Relative `source` paths are
//! resolved against the manifest's directory.
//!
//! ```json
//! {
//!   "name": "poster",
//!   "layers": [
//!     { "name": "Title", "source": "layers/title.png" },
//!     { "name": "Shapes", "kind": "group", "visible": false, "children": [
//!       { "name": "Circle", "source": "layers/circle.png" }
//!     ]},
//!     { "name": "Background", "kind": "background", "source": "layers/bg.png" }
//!   ]
//! }
//! ```

use crate::domain::{Document, LayeredDocument, Node, Result, StrataError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk manifest layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerManifest {
    /// Document name; defaults to the manifest file stem
    #[serde(default)]
    pub name: Option<String>,

    /// Whether the document keeps an edit history that can be snapshotted
    #[serde(default = "default_history")]
    pub history: bool,

    /// Top-level layers in document order
    pub layers: Vec<Node>,
}

fn default_history() -> bool {
    true
}

impl LayerManifest {
    /// Parses a manifest from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| StrataError::Manifest(format!("Failed to parse manifest: {e}")))
    }

    /// Builds the in-memory document, resolving sources against `base_dir`
    pub fn into_document(mut self, base_dir: &Path, fallback_name: &str) -> Document {
        resolve_sources(&mut self.layers, base_dir);
        let name = self.name.unwrap_or_else(|| fallback_name.to_string());
        let document = Document::new(name, self.layers);
        if self.history {
            document
        } else {
            document.without_history()
        }
    }
}

fn resolve_sources(nodes: &mut [Node], base_dir: &Path) {
    for node in nodes {
        if let Some(source) = node.source.as_mut() {
            if source.is_relative() {
                *source = base_dir.join(&*source);
            }
        }
        resolve_sources(&mut node.children, base_dir);
    }
}

/// Loads a layered document from a manifest file
///
/// # Errors
///
/// Returns [`StrataError::Manifest`] if the file is missing, unreadable or
/// malformed.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(StrataError::Manifest(format!(
            "Manifest not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        StrataError::Manifest(format!("Failed to read manifest {}: {}", path.display(), e))
    })?;

    let manifest = LayerManifest::from_json(&contents)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let fallback_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());

    let document = manifest.into_document(base_dir, &fallback_name);
    tracing::info!(
        manifest = %path.display(),
        document = %document.name(),
        "Loaded layer manifest"
    );
    Ok(document)
}
