//! File naming for exported layers
//!
//! - [`sanitize`] - layer name to safe file name stem
//! - [`resolver`] - collision-free destination paths

pub mod resolver;
pub mod sanitize;

pub use resolver::UniqueFileResolver;
pub use sanitize::{sanitize_layer_name, FALLBACK_NAME};
