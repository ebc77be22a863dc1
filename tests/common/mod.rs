//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A poster with a hidden group, a duplicate name and a background
///
/// ```text
/// 👁 Title            layers/title.png
///    Shapes/          (hidden)
///   👁 Circle         layers/circle.png
///      Square         layers/square.png (hidden)
/// 👁 Title            layers/title2.png
/// 👁 Notes: draft     layers/notes.jpg
/// 👁 Paper [background] layers/paper.png
/// ```
pub const POSTER_MANIFEST: &str = r#"{
    "name": "poster",
    "layers": [
        { "name": "Title", "source": "layers/title.png" },
        { "name": "Shapes", "kind": "group", "visible": false, "children": [
            { "name": "Circle", "source": "layers/circle.png" },
            { "name": "Square", "visible": false, "source": "layers/square.png" }
        ]},
        { "name": "Title", "source": "layers/title2.png" },
        { "name": "Notes: draft", "source": "layers/notes.jpg" },
        { "name": "Paper", "kind": "background", "source": "layers/paper.png" }
    ]
}"#;

/// Workspace holding a manifest, its layer payloads and an output directory
pub struct Fixture {
    pub dir: TempDir,
    pub manifest: PathBuf,
    pub out: PathBuf,
}

impl Fixture {
    /// Writes `manifest` plus a payload for every file the poster refers to
    pub fn new(manifest: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let layers = dir.path().join("layers");
        fs::create_dir_all(&layers).unwrap();
        for name in [
            "title.png",
            "circle.png",
            "square.png",
            "title2.png",
            "notes.jpg",
            "paper.png",
        ] {
            fs::write(layers.join(name), format!("payload:{name}")).unwrap();
        }

        let manifest_path = dir.path().join("poster.json");
        fs::write(&manifest_path, manifest).unwrap();
        let out = dir.path().join("out");

        Self {
            dir,
            manifest: manifest_path,
            out,
        }
    }

    /// The poster fixture
    pub fn poster() -> Self {
        Self::new(POSTER_MANIFEST)
    }
}

/// Sorted file names in `dir`, or nothing if it does not exist
pub fn file_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
