//! Visibility snapshot and restore
//!
//! The guard holds the only mutable borrow of the document for as long as it
//! lives, so a second snapshot of the same document cannot be taken while one
//! is outstanding. Dropping a guard that is still holding a snapshot restores
//! it.

use crate::domain::{
    visibility_states, HistoryMarker, LayeredDocument, NodePath, Result, StrataError,
};

/// Lifecycle of a [`VisibilityGuard`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// Nothing captured yet
    Idle,
    /// Holding a snapshot; toggling is allowed
    Captured,
    /// Snapshot applied back; a new capture may start
    Restored,
}

impl GuardState {
    fn as_str(self) -> &'static str {
        match self {
            GuardState::Idle => "idle",
            GuardState::Captured => "captured",
            GuardState::Restored => "restored",
        }
    }
}

/// Visibility of every node plus the history position, taken before export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    visibility: Vec<(NodePath, bool)>,
    history: HistoryMarker,
}

impl Snapshot {
    /// Number of nodes recorded
    pub fn len(&self) -> usize {
        self.visibility.len()
    }

    /// Whether the snapshot records no nodes
    pub fn is_empty(&self) -> bool {
        self.visibility.is_empty()
    }

    /// History position to rewind to
    pub fn history(&self) -> HistoryMarker {
        self.history
    }
}

/// Scoped owner of a document's visibility state during an export
pub struct VisibilityGuard<'a> {
    document: &'a mut dyn LayeredDocument,
    state: GuardState,
    snapshot: Option<Snapshot>,
}

impl<'a> VisibilityGuard<'a> {
    /// Wraps a document; nothing is captured yet
    pub fn new(document: &'a mut dyn LayeredDocument) -> Self {
        Self {
            document,
            state: GuardState::Idle,
            snapshot: None,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Read access for renderers while the guard is held
    pub fn document(&self) -> &dyn LayeredDocument {
        &*self.document
    }

    /// Records every node's visibility and the current history position
    ///
    /// # Errors
    ///
    /// - [`StrataError::InvalidGuardState`] if a snapshot is already held
    /// - [`StrataError::SnapshotUnavailable`] if the document keeps no history
    pub fn capture(&mut self) -> Result<()> {
        if self.state == GuardState::Captured {
            return Err(self.invalid("capture"));
        }

        let history = self.document.history_marker().ok_or_else(|| {
            StrataError::SnapshotUnavailable(format!(
                "document '{}' keeps no edit history",
                self.document.name()
            ))
        })?;

        let snapshot = Snapshot {
            visibility: visibility_states(self.document.layers()),
            history,
        };

        tracing::debug!(
            document = %self.document.name(),
            nodes = snapshot.len(),
            generation = history.generation(),
            "Captured visibility snapshot"
        );

        self.snapshot = Some(snapshot);
        self.state = GuardState::Captured;
        Ok(())
    }

    /// Makes the node at `path` visible
    ///
    /// Other nodes are left as they are; hiding the previous layer is the
    /// caller's job.
    pub fn isolate(&mut self, path: &NodePath) -> Result<()> {
        self.toggle("isolate", path, true)
    }

    /// Hides the node at `path`
    pub fn conceal(&mut self, path: &NodePath) -> Result<()> {
        self.toggle("conceal", path, false)
    }

    fn toggle(&mut self, operation: &'static str, path: &NodePath, visible: bool) -> Result<()> {
        if self.state != GuardState::Captured {
            return Err(self.invalid(operation));
        }
        self.document.set_visible(path, visible)?;
        Ok(())
    }

    /// Reapplies the captured visibility and rewinds history
    ///
    /// Every node is attempted even if one fails; the first failure is
    /// returned. The snapshot is consumed either way.
    pub fn restore(&mut self) -> Result<()> {
        if self.state != GuardState::Captured {
            return Err(self.invalid("restore"));
        }
        let snapshot = self
            .snapshot
            .take()
            .ok_or_else(|| self.invalid("restore"))?;
        self.state = GuardState::Restored;

        let mut first_error: Option<StrataError> = None;

        // Descendants before ancestors, so a host that reveals parents along
        // with a child cannot override a parent's recorded flag.
        for (path, visible) in snapshot.visibility.iter().rev() {
            let current = self.document.node(path).map(|n| n.visible);
            if current == Some(*visible) {
                continue;
            }
            if let Err(e) = self.document.set_visible(path, *visible) {
                tracing::error!(path = %path, error = %e, "Failed to restore layer visibility");
                first_error.get_or_insert(e.into());
            }
        }

        if let Err(e) = self.document.rewind_history(snapshot.history) {
            tracing::error!(error = %e, "Failed to rewind document history");
            first_error.get_or_insert(e.into());
        }

        tracing::debug!(
            document = %self.document.name(),
            nodes = snapshot.len(),
            "Restored visibility snapshot"
        );

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn invalid(&self, operation: &'static str) -> StrataError {
        StrataError::InvalidGuardState {
            operation,
            state: self.state.as_str(),
        }
    }
}

impl Drop for VisibilityGuard<'_> {
    fn drop(&mut self) {
        if self.state == GuardState::Captured {
            tracing::warn!("Visibility guard dropped while captured, restoring");
            if let Err(e) = self.restore() {
                tracing::error!(error = %e, "Restore on drop failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Document, Node};

    fn doc() -> Document {
        Document::new(
            "scene",
            vec![
                Node::group(
                    "Props",
                    vec![Node::leaf("Lamp"), Node::leaf("Chair").hidden()],
                )
                .hidden(),
                Node::leaf("Actor"),
                Node::leaf("Fog").hidden(),
            ],
        )
    }

    #[test]
    fn test_state_transitions() {
        let mut doc = doc();
        let mut guard = VisibilityGuard::new(&mut doc);
        assert_eq!(guard.state(), GuardState::Idle);
        guard.capture().unwrap();
        assert_eq!(guard.state(), GuardState::Captured);
        guard.restore().unwrap();
        assert_eq!(guard.state(), GuardState::Restored);
        guard.capture().unwrap();
        assert_eq!(guard.state(), GuardState::Captured);
    }

    #[test]
    fn test_double_capture_rejected() {
        let mut doc = doc();
        let mut guard = VisibilityGuard::new(&mut doc);
        guard.capture().unwrap();
        let err = guard.capture().unwrap_err();
        assert!(matches!(err, StrataError::InvalidGuardState { operation: "capture", .. }));
    }

    #[test]
    fn test_toggle_requires_capture() {
        let mut doc = doc();
        let mut guard = VisibilityGuard::new(&mut doc);
        assert!(guard.isolate(&NodePath::top(1)).is_err());
        assert!(guard.conceal(&NodePath::top(1)).is_err());
        assert!(guard.restore().is_err());
    }

    #[test]
    fn test_capture_without_history_fails() {
        let mut doc = doc().without_history();
        let mut guard = VisibilityGuard::new(&mut doc);
        let err = guard.capture().unwrap_err();
        assert!(matches!(err, StrataError::SnapshotUnavailable(_)));
        assert_eq!(guard.state(), GuardState::Idle);
    }

    #[test]
    fn test_restore_after_cascading_reveal() {
        let mut doc = doc();
        let before = visibility_states(doc.layers());
        {
            let mut guard = VisibilityGuard::new(&mut doc);
            guard.capture().unwrap();
            // Revealing Chair also reveals the hidden Props group
            guard.isolate(&NodePath::top(0).child(1)).unwrap();
            guard.conceal(&NodePath::top(1)).unwrap();
            guard.isolate(&NodePath::top(2)).unwrap();
            guard.restore().unwrap();
        }
        assert_eq!(visibility_states(doc.layers()), before);
        assert_eq!(doc.history_len(), 0);
    }

    #[test]
    fn test_restore_for_every_toggle_permutation() {
        let paths = [
            NodePath::top(0),
            NodePath::top(0).child(0),
            NodePath::top(0).child(1),
            NodePath::top(1),
            NodePath::top(2),
        ];
        // Each bit pattern picks which nodes to reveal; the rest are hidden
        for mask in 0u32..(1 << paths.len()) {
            let mut doc = doc();
            let before = visibility_states(doc.layers());
            {
                let mut guard = VisibilityGuard::new(&mut doc);
                guard.capture().unwrap();
                for (i, path) in paths.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        guard.isolate(path).unwrap();
                    } else {
                        guard.conceal(path).unwrap();
                    }
                }
                guard.restore().unwrap();
            }
            assert_eq!(visibility_states(doc.layers()), before, "mask {mask:05b}");
        }
    }

    #[test]
    fn test_drop_restores() {
        let mut doc = doc();
        let before = visibility_states(doc.layers());
        {
            let mut guard = VisibilityGuard::new(&mut doc);
            guard.capture().unwrap();
            guard.conceal(&NodePath::top(1)).unwrap();
            guard.isolate(&NodePath::top(2)).unwrap();
        }
        assert_eq!(visibility_states(doc.layers()), before);
        assert_eq!(doc.history_len(), 0);
    }

    #[test]
    fn test_restore_keeps_earlier_history() {
        let mut doc = doc();
        doc.set_visible(&NodePath::top(2), true).unwrap();
        let before = visibility_states(doc.layers());
        {
            let mut guard = VisibilityGuard::new(&mut doc);
            guard.capture().unwrap();
            guard.conceal(&NodePath::top(2)).unwrap();
            guard.restore().unwrap();
        }
        assert_eq!(visibility_states(doc.layers()), before);
        assert_eq!(doc.history_len(), 1);
    }

    #[test]
    fn test_isolate_missing_layer() {
        let mut doc = doc();
        let mut guard = VisibilityGuard::new(&mut doc);
        guard.capture().unwrap();
        let err = guard.isolate(&NodePath::top(42)).unwrap_err();
        assert!(matches!(err, StrataError::Document(_)));
        guard.restore().unwrap();
    }
}
