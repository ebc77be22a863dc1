//! Integrations at the edges of the export core.
//!
//! - [`manifest`] - Loading a layered document from a JSON manifest
//! - [`progress`] - Progress reporters (terminal bar, no-op)
//! - [`renderer`] - Layer renderers (source payload copy, dry run)
//!
//! # Design Pattern
//!
//! The core only sees the [`progress::ProgressReporter`] and
//! [`renderer::Renderer`] traits, so hosts can plug in their own encoder or
//! UI and tests can record every call.

pub mod manifest;
pub mod progress;
pub mod renderer;
