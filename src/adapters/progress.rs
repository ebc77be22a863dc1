//! Progress reporting
//!
//! The export core emits discrete ticks and never reads anything back, so
//! reporters are fire-and-forget.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receiver of progress updates
pub trait ProgressReporter: Send + Sync {
    /// `current` of `total` steps are done
    fn tick(&self, current: usize, total: usize);

    /// Describes the phase currently running
    fn set_label(&self, label: &str);

    /// Removes the indicator
    fn hide(&self);
}

/// Reporter that discards every update
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {
    fn tick(&self, _current: usize, _total: usize) {}

    fn set_label(&self, _label: &str) {}

    fn hide(&self) {}
}

/// Terminal progress bar
pub struct ConsoleProgress {
    bar: ProgressBar,
}

impl ConsoleProgress {
    /// Creates a bar drawing to stderr
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// Creates a bar drawing nowhere, useful when output is not a terminal
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        let style = ProgressStyle::with_template(
            "{spinner:.green} {msg:<24} [{bar:40.cyan/blue}] {pos}/{len} ETA: {eta}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
        bar.set_style(style);
        Self { bar }
    }

    /// Current position of the bar
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn tick(&self, current: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(current as u64);
    }

    fn set_label(&self, label: &str) {
        // Starts a new phase, also after a previous hide()
        self.bar.reset();
        self.bar.set_message(label.to_string());
    }

    fn hide(&self) {
        self.bar.finish_and_clear();
    }
}
