//! Export result and reporting
//!
//! This module defines structures for tracking and reporting the outcome of
//! one export run.

use crate::domain::StrataError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Outcome of an export run
#[derive(Debug, Clone)]
pub struct ExportResult {
    /// Identifier used to correlate log lines of one run
    pub run_id: Uuid,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Number of layers the run attempted
    pub total_layers: usize,

    /// Number of layers written (or planned, in a dry run)
    pub exported_count: usize,

    /// Whether any layer failed
    pub had_errors: bool,

    /// Per-layer failures in encounter order
    pub failures: Vec<ExportFailure>,

    /// Destination of every successful layer, in export order
    pub written: Vec<PathBuf>,

    /// Duration of the run
    pub duration: Duration,

    /// Nothing was written to disk
    pub dry_run: bool,

    /// The document was a single flattened background
    pub special_case: bool,
}

impl ExportResult {
    /// Create a new empty result
    pub fn new(total_layers: usize, dry_run: bool) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            total_layers,
            exported_count: 0,
            had_errors: false,
            failures: Vec::new(),
            written: Vec::new(),
            duration: Duration::from_secs(0),
            dry_run,
            special_case: false,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a layer written to `destination`
    pub fn record_success(&mut self, destination: PathBuf) {
        self.exported_count += 1;
        self.written.push(destination);
    }

    /// Record a layer that could not be exported
    pub fn record_failure(&mut self, failure: ExportFailure) {
        self.had_errors = true;
        self.failures.push(failure);
    }

    /// Number of failed layers
    pub fn failed_count(&self) -> usize {
        self.failures.len()
    }

    /// Check if the export was successful (no failures)
    pub fn is_successful(&self) -> bool {
        !self.had_errors
    }

    /// Get success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_layers == 0 {
            return 100.0;
        }
        (self.exported_count as f64 / self.total_layers as f64) * 100.0
    }

    /// Log the result
    pub fn log_summary(&self) {
        tracing::info!(
            run_id = %self.run_id,
            total_layers = self.total_layers,
            exported = self.exported_count,
            failed = self.failed_count(),
            dry_run = self.dry_run,
            duration_ms = self.duration.as_millis() as u64,
            success_rate = format!("{:.2}%", self.success_rate()),
            "Export completed"
        );

        if self.had_errors {
            tracing::warn!(
                run_id = %self.run_id,
                error_count = self.failures.len(),
                "Export completed with errors"
            );
            for failure in &self.failures {
                tracing::warn!(
                    kind = ?failure.kind,
                    layer = %failure.layer,
                    message = %failure.message,
                    "Export error"
                );
            }
        }
    }
}

/// Why a single layer failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Every candidate file name was taken
    NameSpaceExhausted,
    /// The renderer could not write the layer
    Render,
    /// The layer's visibility could not be toggled
    Visibility,
    /// Anything else
    Unknown,
}

impl FailureKind {
    /// Classifies a per-layer error
    pub fn of(error: &StrataError) -> Self {
        match error {
            StrataError::ExhaustedNameSpace { .. } => FailureKind::NameSpaceExhausted,
            StrataError::Render(_) | StrataError::Io(_) => FailureKind::Render,
            StrataError::Document(_) | StrataError::InvalidGuardState { .. } => {
                FailureKind::Visibility
            }
            _ => FailureKind::Unknown,
        }
    }
}

/// A layer that could not be exported
#[derive(Debug, Clone)]
pub struct ExportFailure {
    /// Type of failure
    pub kind: FailureKind,

    /// Name of the layer as shown in the document
    pub layer: String,

    /// Error message
    pub message: String,
}

impl ExportFailure {
    /// Create a new failure record
    pub fn new(kind: FailureKind, layer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            layer: layer.into(),
            message: message.into(),
        }
    }

    /// Builds a failure record from the error that caused it
    pub fn from_error(layer: impl Into<String>, error: &StrataError) -> Self {
        Self::new(FailureKind::of(error), layer, error.to_string())
    }
}
