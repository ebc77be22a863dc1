//! Layer tree flattening
//!
//! Walks the layer hierarchy once per session and produces the ordered list of
//! exportable layers plus the subset that was visible at collection time.

use crate::adapters::progress::ProgressReporter;
use crate::domain::{Node, NodeKind, NodePath};
use std::path::PathBuf;

/// One exportable layer, captured at collection time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerEntry {
    /// Handle into the document
    pub path: NodePath,
    /// Layer name
    pub name: String,
    /// Leaf or background
    pub kind: NodeKind,
    /// Own visibility flag when collected
    pub visible: bool,
    /// Encoded pixel payload, if the document provides one
    pub source: Option<PathBuf>,
}

impl LayerEntry {
    fn from_node(path: NodePath, node: &Node) -> Self {
        Self {
            path,
            name: node.name.clone(),
            kind: node.kind,
            visible: node.visible,
            source: node.source.clone(),
        }
    }
}

/// Result of a tree walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    /// Exportable layers in document order
    pub layers: Vec<LayerEntry>,
    /// Indices into `layers` of the layers classified visible
    pub visible: Vec<usize>,
}

impl Collection {
    /// Number of collected layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether nothing exportable was found
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Number of layers classified visible
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Layers classified visible, in document order
    pub fn visible_layers(&self) -> impl Iterator<Item = &LayerEntry> {
        self.visible.iter().map(|&i| &self.layers[i])
    }

    /// The sole layer, when the document is a single flattened background
    pub fn single_background(&self) -> Option<&LayerEntry> {
        match self.layers.as_slice() {
            [only] if only.kind == NodeKind::Background => Some(only),
            _ => None,
        }
    }

    /// Layers to export: everything, or only the visible subset
    pub fn work_subset(&self, visible_only: bool) -> Vec<&LayerEntry> {
        if visible_only {
            self.visible_layers().collect()
        } else {
            self.layers.iter().collect()
        }
    }
}

/// Depth-first collector of exportable layers
#[derive(Debug, Clone, Copy)]
pub struct TreeCollector {
    traverse_hidden_groups: bool,
}

impl TreeCollector {
    /// Creates a collector
    ///
    /// Hidden groups are only descended into when `traverse_hidden_groups` is
    /// set.
    pub fn new(traverse_hidden_groups: bool) -> Self {
        Self {
            traverse_hidden_groups,
        }
    }

    /// Flattens `roots` into a [`Collection`]
    ///
    /// Emits one progress tick per top-level node.
    pub fn collect(&self, roots: &[Node], progress: &dyn ProgressReporter) -> Collection {
        let mut collection = Collection::default();
        let total = roots.len();
        progress.set_label("Collecting layers");

        for (index, node) in roots.iter().enumerate() {
            let path = NodePath::top(index);
            let entries = self.flatten(node, path, true);
            for (entry, counts_visible) in entries {
                if counts_visible {
                    collection.visible.push(collection.layers.len());
                }
                collection.layers.push(entry);
            }
            progress.tick(index + 1, total);
        }

        tracing::debug!(
            top_level = total,
            collected = collection.len(),
            visible = collection.visible_count(),
            traverse_hidden_groups = self.traverse_hidden_groups,
            "Collected layers"
        );

        collection
    }

    /// Exportable nodes under `node`, each paired with its visible-subset flag
    ///
    /// `chain_visible` is true when every group above `node` is visible.
    fn flatten(&self, node: &Node, path: NodePath, chain_visible: bool) -> Vec<(LayerEntry, bool)> {
        if !node.is_group() {
            let counts_visible = chain_visible && node.visible;
            return vec![(LayerEntry::from_node(path, node), counts_visible)];
        }

        if !(self.traverse_hidden_groups || node.visible) {
            return Vec::new();
        }

        let chain_visible = chain_visible && node.visible;
        node.children
            .iter()
            .enumerate()
            .flat_map(|(i, child)| self.flatten(child, path.child(i), chain_visible))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::progress::NoopProgress;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Ticks(Mutex<Vec<(usize, usize)>>);

    impl ProgressReporter for Ticks {
        fn tick(&self, current: usize, total: usize) {
            self.0.lock().unwrap().push((current, total));
        }
        fn set_label(&self, _label: &str) {}
        fn hide(&self) {}
    }

    fn names(collection: &Collection) -> Vec<&str> {
        collection.layers.iter().map(|l| l.name.as_str()).collect()
    }

    fn visible_names(collection: &Collection) -> Vec<&str> {
        collection.visible_layers().map(|l| l.name.as_str()).collect()
    }

    fn tree() -> Vec<Node> {
        vec![
            Node::leaf("Top"),
            Node::group(
                "Shown",
                vec![
                    Node::leaf("A"),
                    Node::leaf("B").hidden(),
                    Node::group("Inner", vec![Node::leaf("C")]).hidden(),
                ],
            ),
            Node::group("Hidden", vec![Node::leaf("D"), Node::leaf("E").hidden()]).hidden(),
            Node::background("Background"),
        ]
    }

    #[test]
    fn test_full_traversal_preserves_document_order() {
        let collection = TreeCollector::new(true).collect(&tree(), &NoopProgress);
        assert_eq!(names(&collection), vec!["Top", "A", "B", "C", "D", "E", "Background"]);
        assert_eq!(collection.layers[3].path, NodePath::from_indices(vec![1, 2, 0]));
    }

    #[test]
    fn test_full_traversal_counts_all_exportable_nodes() {
        let roots = tree();
        let expected: usize = roots.iter().map(Node::exportable_count).sum();
        let collection = TreeCollector::new(true).collect(&roots, &NoopProgress);
        assert_eq!(collection.len(), expected);
        assert!(collection.layers.iter().all(|l| l.kind != NodeKind::Group));
    }

    #[test]
    fn test_hidden_groups_skipped_without_traversal() {
        let collection = TreeCollector::new(false).collect(&tree(), &NoopProgress);
        assert_eq!(names(&collection), vec!["Top", "A", "B", "Background"]);
    }

    #[test]
    fn test_visible_subset_follows_visible_chain() {
        let collection = TreeCollector::new(true).collect(&tree(), &NoopProgress);
        // C and D are visible themselves but sit under hidden groups
        assert_eq!(visible_names(&collection), vec!["Top", "A", "Background"]);
    }

    #[test]
    fn test_visible_subset_is_subset() {
        let collection = TreeCollector::new(true).collect(&tree(), &NoopProgress);
        for entry in collection.visible_layers() {
            assert!(entry.visible);
            assert!(collection.layers.contains(entry));
        }
    }

    #[test]
    fn test_one_tick_per_top_level_node() {
        let ticks = Ticks::default();
        TreeCollector::new(true).collect(&tree(), &ticks);
        assert_eq!(*ticks.0.lock().unwrap(), vec![(1, 4), (2, 4), (3, 4), (4, 4)]);
    }

    #[test]
    fn test_single_background() {
        let roots = vec![Node::background("Background")];
        let collection = TreeCollector::new(true).collect(&roots, &NoopProgress);
        assert_eq!(collection.single_background().unwrap().name, "Background");

        let collection = TreeCollector::new(true).collect(&tree(), &NoopProgress);
        assert!(collection.single_background().is_none());

        let roots = vec![Node::leaf("Only")];
        let collection = TreeCollector::new(true).collect(&roots, &NoopProgress);
        assert!(collection.single_background().is_none());
    }

    #[test]
    fn test_empty_groups_yield_nothing() {
        let roots = vec![Node::group("Empty", vec![])];
        let collection = TreeCollector::new(true).collect(&roots, &NoopProgress);
        assert!(collection.is_empty());
    }

    #[test]
    fn test_work_subset() {
        let collection = TreeCollector::new(true).collect(&tree(), &NoopProgress);
        assert_eq!(collection.work_subset(false).len(), 7);
        let visible: Vec<&str> = collection
            .work_subset(true)
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(visible, vec!["Top", "A", "Background"]);
    }
}
