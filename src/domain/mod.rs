//! Domain models and types for Strata.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Layer tree** ([`Node`], [`NodeKind`], [`NodePath`])
//! - **Host document capability** ([`LayeredDocument`]) and an in-memory
//!   implementation ([`Document`])
//! - **Output formats** ([`ExportFormat`], [`FormatOptions`])
//! - **Run settings** ([`ExportPreferences`])
//! - **Error types** ([`StrataError`], [`DocumentError`]) and the [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use strata::domain::{Document, LayeredDocument, Node, NodePath};
//!
//! let mut doc = Document::new(
//!     "poster",
//!     vec![Node::group("Text", vec![Node::leaf("Title")]).hidden()],
//! );
//!
//! // Revealing a layer reveals its enclosing group too
//! doc.set_visible(&NodePath::top(0).child(0), true).unwrap();
//! assert!(doc.node(&NodePath::top(0)).unwrap().visible);
//! ```

pub mod document;
pub mod errors;
pub mod format;
pub mod node;
pub mod preferences;
pub mod result;

// Re-export commonly used types for convenience
pub use document::{visibility_states, Document, HistoryMarker, LayeredDocument};
pub use errors::{DocumentError, StrataError};
pub use format::{ExportFormat, FormatOptions};
pub use node::{Node, NodeKind, NodePath};
pub use preferences::ExportPreferences;
pub use result::Result;
