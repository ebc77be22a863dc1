//! Collision-safe destination paths
//!
//! The resolver only checks candidates; it never creates files. Callers decide what
//! "taken" means by passing an existence predicate, which lets the export
//! pipeline treat names claimed earlier in the same run as taken even when
//! nothing was written (dry runs).

use crate::domain::preferences::{DEFAULT_MAX_NAME_ATTEMPTS, MAX_NAME_ATTEMPTS};
use crate::domain::{Result, StrataError};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Finds a free `base[-NNN].ext` path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueFileResolver {
    max_attempts: usize,
}

impl UniqueFileResolver {
    /// Creates a resolver probing at most `max_attempts` candidates
    ///
    /// The unsuffixed name counts as the first attempt, so 100 attempts cover
    /// `base.ext` and `base-001.ext` through `base-099.ext`. The count is
    /// clamped to `1..=1000` so suffixes never grow past `-999`.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.clamp(1, MAX_NAME_ATTEMPTS),
        }
    }

    /// Maximum number of candidates checked
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns the first candidate for which `exists` is false
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::ExhaustedNameSpace`] when every candidate is taken.
    pub fn resolve<F>(&self, base: &Path, extension: &str, exists: F) -> Result<PathBuf>
    where
        F: Fn(&Path) -> bool,
    {
        for attempt in 0..self.max_attempts {
            let candidate = candidate_path(base, attempt, extension);
            if !exists(&candidate) {
                if attempt > 0 {
                    tracing::debug!(
                        base = %base.display(),
                        attempt,
                        path = %candidate.display(),
                        "Resolved name collision with numeric suffix"
                    );
                }
                return Ok(candidate);
            }
        }

        Err(StrataError::ExhaustedNameSpace {
            base: base.to_path_buf(),
            attempts: self.max_attempts,
        })
    }

    /// [`resolve`](Self::resolve) against the filesystem
    pub fn resolve_on_disk(&self, base: &Path, extension: &str) -> Result<PathBuf> {
        self.resolve(base, extension, |p| p.exists())
    }
}

impl Default for UniqueFileResolver {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_NAME_ATTEMPTS)
    }
}

/// `base.ext` for attempt 0, `base-NNN.ext` afterwards
///
/// The extension is appended, so dots already in the stem survive.
fn candidate_path(base: &Path, attempt: usize, extension: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    if attempt > 0 {
        name.push(format!("-{attempt:03}"));
    }
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_free_name_is_unsuffixed() {
        let resolver = UniqueFileResolver::default();
        let path = resolver
            .resolve(Path::new("/out/Sky"), "png", |_| false)
            .unwrap();
        assert_eq!(path, PathBuf::from("/out/Sky.png"));
    }

    #[test]
    fn test_suffix_is_zero_padded() {
        let taken: HashSet<PathBuf> = [
            PathBuf::from("/out/Sky.png"),
            PathBuf::from("/out/Sky-001.png"),
        ]
        .into_iter()
        .collect();

        let path = UniqueFileResolver::default()
            .resolve(Path::new("/out/Sky"), "png", |p| taken.contains(p))
            .unwrap();
        assert_eq!(path, PathBuf::from("/out/Sky-002.png"));
    }

    #[test]
    fn test_dots_in_stem_preserved() {
        let path = UniqueFileResolver::default()
            .resolve(Path::new("out/v1.2_final"), "jpg", |_| false)
            .unwrap();
        assert_eq!(path, PathBuf::from("out/v1.2_final.jpg"));
    }

    #[test]
    fn test_exhausted_after_max_attempts() {
        let resolver = UniqueFileResolver::new(100);
        let err = resolver
            .resolve(Path::new("/out/Sky"), "png", |_| true)
            .unwrap_err();
        match err {
            StrataError::ExhaustedNameSpace { base, attempts } => {
                assert_eq!(base, PathBuf::from("/out/Sky"));
                assert_eq!(attempts, 100);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_last_candidate_is_099() {
        let resolver = UniqueFileResolver::new(100);
        let path = resolver
            .resolve(Path::new("Sky"), "png", |p| p != Path::new("Sky-099.png"))
            .unwrap();
        assert_eq!(path, PathBuf::from("Sky-099.png"));
    }

    #[test]
    fn test_zero_attempts_still_checks_once() {
        let resolver = UniqueFileResolver::new(0);
        assert_eq!(resolver.max_attempts(), 1);
    }

    #[test]
    fn test_suffix_never_exceeds_three_digits() {
        let resolver = UniqueFileResolver::new(2000);
        assert_eq!(resolver.max_attempts(), 1000);

        let path = resolver
            .resolve(Path::new("A"), "png", |p| p != Path::new("A-999.png"))
            .unwrap();
        assert_eq!(path, PathBuf::from("A-999.png"));

        let err = resolver
            .resolve(Path::new("A"), "png", |p| p != Path::new("A-1000.png"))
            .unwrap_err();
        assert!(matches!(
            err,
            StrataError::ExhaustedNameSpace { attempts: 1000, .. }
        ));
    }

    #[test]
    fn test_on_disk_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("Layer_1");
        fs::write(dir.path().join("Layer_1.png"), b"x").unwrap();

        let resolver = UniqueFileResolver::default();
        let first = resolver.resolve_on_disk(&base, "png").unwrap();
        let second = resolver.resolve_on_disk(&base, "png").unwrap();
        assert_eq!(first, second);
        assert_eq!(first, dir.path().join("Layer_1-001.png"));
        assert!(!first.exists());
    }
}
