//! Layer tree nodes and the paths that address them
//!
//! A document owns a forest of [`Node`]s. Code outside the document refers to
//! nodes through [`NodePath`] handles so that the tree can be mutated (only its
//! visibility flags, in practice) while a flattened work list is alive.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Kind of a layer tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Ordinary image layer, independently exportable
    #[default]
    Leaf,
    /// Container of other nodes; traversed, never exported
    Group,
    /// Flattened background layer
    Background,
}

impl NodeKind {
    /// Whether nodes of this kind end up in the export work list
    pub fn is_exportable(self) -> bool {
        !matches!(self, NodeKind::Group)
    }

    /// Lowercase name used in logs and manifests
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Leaf => "leaf",
            NodeKind::Group => "group",
            NodeKind::Background => "background",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of the layer hierarchy
///
/// `children` is only meaningful for [`NodeKind::Group`]. `source` points at the
/// pre-encoded pixel payload of a leaf, when the document was loaded from a
/// manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Layer name as shown in the host application
    pub name: String,

    /// Current visibility flag
    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Node kind
    #[serde(default)]
    pub kind: NodeKind,

    /// Child nodes (groups only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,

    /// Encoded pixel data backing this layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

fn default_visible() -> bool {
    true
}

impl Node {
    /// Creates a visible leaf layer
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            kind: NodeKind::Leaf,
            children: Vec::new(),
            source: None,
        }
    }

    /// Creates a visible background layer
    pub fn background(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Background,
            ..Self::leaf(name)
        }
    }

    /// Creates a visible group holding `children`
    pub fn group(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            kind: NodeKind::Group,
            children,
            ..Self::leaf(name)
        }
    }

    /// Returns the node with its visibility flag cleared
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Attaches a pixel payload path
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether this node is a group
    pub fn is_group(&self) -> bool {
        self.kind == NodeKind::Group
    }

    /// Number of exportable (leaf and background) nodes in this subtree
    pub fn exportable_count(&self) -> usize {
        if self.is_group() {
            self.children.iter().map(Node::exportable_count).sum()
        } else {
            1
        }
    }

    /// Total number of nodes in this subtree, groups included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// Index path from the document root to a node
///
/// `[2, 0]` is the first child of the third top-level node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of a top-level node
    pub fn top(index: usize) -> Self {
        Self(vec![index])
    }

    /// Creates a path from raw indices
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Path of the parent node, `None` for top-level nodes
    pub fn parent(&self) -> Option<Self> {
        if self.0.len() <= 1 {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Nesting depth; top-level nodes have depth 0
    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Raw indices
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Looks the node up in a forest
    pub fn resolve<'a>(&self, roots: &'a [Node]) -> Option<&'a Node> {
        let (first, rest) = self.0.split_first()?;
        let mut node = roots.get(*first)?;
        for index in rest {
            node = node.children.get(*index)?;
        }
        Some(node)
    }

    /// Looks the node up mutably in a forest
    pub fn resolve_mut<'a>(&self, roots: &'a mut [Node]) -> Option<&'a mut Node> {
        let (first, rest) = self.0.split_first()?;
        let mut node = roots.get_mut(*first)?;
        for index in rest {
            node = node.children.get_mut(*index)?;
        }
        Some(node)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", parts.join("/"))
    }
}
