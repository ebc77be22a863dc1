//! Layered document capability and its in-memory implementation
//!
//! [`LayeredDocument`] is the seam between the export core and whatever host
//! owns the layer tree. The core only reads the tree, flips visibility flags,
//! and asks for a history marker it can later rewind to.

use super::errors::DocumentError;
use super::node::{Node, NodeKind, NodePath};

/// Opaque position in a document's edit history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HistoryMarker {
    generation: u64,
}

impl HistoryMarker {
    /// Edit generation this marker points at
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Host document capability consumed by the export core
pub trait LayeredDocument: Send + Sync {
    /// Document name, used for logging
    fn name(&self) -> &str;

    /// Top-level nodes in document order
    fn layers(&self) -> &[Node];

    /// Node at `path`, if any
    fn node(&self, path: &NodePath) -> Option<&Node> {
        path.resolve(self.layers())
    }

    /// Sets the visibility flag of the node at `path`
    ///
    /// Hosts may propagate the change (revealing a layer typically reveals its
    /// enclosing groups as well).
    fn set_visible(&mut self, path: &NodePath, visible: bool) -> Result<(), DocumentError>;

    /// Current history position, or `None` when the host keeps no history
    fn history_marker(&self) -> Option<HistoryMarker>;

    /// Discards every edit recorded after `marker`
    fn rewind_history(&mut self, marker: HistoryMarker) -> Result<(), DocumentError>;
}

/// Visibility of every node in a forest, groups included, in depth-first order
pub fn visibility_states(roots: &[Node]) -> Vec<(NodePath, bool)> {
    fn walk(nodes: &[Node], parent: Option<&NodePath>, out: &mut Vec<(NodePath, bool)>) {
        for (index, node) in nodes.iter().enumerate() {
            let path = match parent {
                Some(p) => p.child(index),
                None => NodePath::top(index),
            };
            out.push((path.clone(), node.visible));
            walk(&node.children, Some(&path), out);
        }
    }

    let mut out = Vec::new();
    walk(roots, None, &mut out);
    out
}

#[derive(Debug, Clone)]
struct HistoryEntry {
    path: NodePath,
    visible: bool,
}

/// In-memory layered document
///
/// Every visibility change is appended to an edit history whose length is the
/// current generation. Revealing a node reveals its ancestor groups, the way
/// image editors do.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    layers: Vec<Node>,
    history: Option<Vec<HistoryEntry>>,
}

impl Document {
    /// Creates a document with edit history enabled
    pub fn new(name: impl Into<String>, layers: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            layers,
            history: Some(Vec::new()),
        }
    }

    /// Disables edit history; such documents cannot be snapshotted
    pub fn without_history(mut self) -> Self {
        self.history = None;
        self
    }

    /// Number of edits currently in the history
    pub fn history_len(&self) -> usize {
        self.history.as_ref().map_or(0, Vec::len)
    }

    /// A document made of a single background layer has been flattened
    pub fn is_flattened(&self) -> bool {
        self.layers.len() == 1 && self.layers[0].kind == NodeKind::Background
    }

    fn record(&mut self, path: &NodePath, visible: bool) {
        if let Some(history) = self.history.as_mut() {
            history.push(HistoryEntry {
                path: path.clone(),
                visible,
            });
        }
    }

    fn apply(&mut self, path: &NodePath, visible: bool) -> Result<(), DocumentError> {
        let node = path
            .resolve_mut(&mut self.layers)
            .ok_or_else(|| DocumentError::LayerNotFound(path.to_string()))?;
        if node.visible != visible {
            node.visible = visible;
            self.record(path, visible);
        }
        Ok(())
    }
}

impl LayeredDocument for Document {
    fn name(&self) -> &str {
        &self.name
    }

    fn layers(&self) -> &[Node] {
        &self.layers
    }

    fn set_visible(&mut self, path: &NodePath, visible: bool) -> Result<(), DocumentError> {
        if self.is_flattened() {
            let name = self.layers[0].name.clone();
            return Err(DocumentError::VisibilityLocked(name));
        }

        self.apply(path, visible)?;

        if visible {
            let mut ancestor = path.parent();
            while let Some(p) = ancestor {
                self.apply(&p, true)?;
                ancestor = p.parent();
            }
        }
        Ok(())
    }

    fn history_marker(&self) -> Option<HistoryMarker> {
        self.history.as_ref().map(|h| HistoryMarker {
            generation: h.len() as u64,
        })
    }

    fn rewind_history(&mut self, marker: HistoryMarker) -> Result<(), DocumentError> {
        let history = self
            .history
            .as_mut()
            .ok_or(DocumentError::UnknownHistoryMarker(marker.generation))?;
        let generation = usize::try_from(marker.generation)
            .map_err(|_| DocumentError::UnknownHistoryMarker(marker.generation))?;
        if generation > history.len() {
            return Err(DocumentError::UnknownHistoryMarker(marker.generation));
        }

        for entry in &history[generation..] {
            tracing::trace!(
                path = %entry.path,
                visible = entry.visible,
                "Discarding history entry"
            );
        }
        history.truncate(generation);
        Ok(())
    }
}
