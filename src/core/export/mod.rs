//! Export orchestration and reporting
//!
//! - [`pipeline`] - the per-layer export loop
//! - [`summary`] - outcome of a run

pub mod pipeline;
pub mod summary;

pub use pipeline::ExportPipeline;
pub use summary::{ExportFailure, ExportResult, FailureKind};
