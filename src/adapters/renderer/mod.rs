//! Layer renderers
//!
//! - [`traits`] - the [`Renderer`] capability consumed by the export pipeline
//! - [`source`] - writes each layer's pre-encoded payload
//! - [`dry_run`] - logs and records, writes nothing

pub mod dry_run;
pub mod source;
pub mod traits;

pub use dry_run::DryRunRenderer;
pub use source::SourceFileRenderer;
pub use traits::Renderer;
