//! Export preferences
//!
//! Built once before a run (from configuration and CLI overrides) and never
//! mutated while the run is in progress.

use super::format::{ExportFormat, FormatOptions};
use std::path::PathBuf;

/// Default number of candidate file names tried per layer
pub const DEFAULT_MAX_NAME_ATTEMPTS: usize = 100;

/// Largest attempt count whose suffixes all fit in three digits (`-999`)
pub const MAX_NAME_ATTEMPTS: usize = 1000;

/// Settings for one export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPreferences {
    /// Directory receiving one file per exported layer
    pub destination_directory: PathBuf,

    /// Output format and its options
    pub format: ExportFormat,

    /// Export only layers that were visible at collection time
    pub visible_only: bool,

    /// Descend into hidden groups while collecting layers
    pub traverse_hidden_groups: bool,

    /// Candidate names tried before a layer fails with name-space exhaustion
    pub max_name_attempts: usize,

    /// Create the destination directory when it does not exist
    pub create_destination: bool,

    /// Resolve names and log, but write nothing
    pub dry_run: bool,
}

impl ExportPreferences {
    /// Preferences with defaults for everything but the destination
    pub fn new(destination_directory: impl Into<PathBuf>) -> Self {
        Self {
            destination_directory: destination_directory.into(),
            format: ExportFormat::default(),
            visible_only: false,
            traverse_hidden_groups: true,
            max_name_attempts: DEFAULT_MAX_NAME_ATTEMPTS,
            create_destination: true,
            dry_run: false,
        }
    }

    /// Sets the output format
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// Restricts the run to layers visible at collection time
    pub fn visible_only(mut self, visible_only: bool) -> Self {
        self.visible_only = visible_only;
        self
    }

    /// Enables dry-run mode
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// File extension for the selected format
    pub fn file_extension(&self) -> &'static str {
        self.format.extension()
    }
}
