// Document state capture and restore

pub mod guard;

pub use guard::{GuardState, Snapshot, VisibilityGuard};
