//! Inspect command implementation
//!
//! Prints a document's layer tree and the layers an export would pick up,
//! without touching the document or the destination.

use crate::adapters::manifest::load_manifest;
use crate::adapters::progress::NoopProgress;
use crate::config::load_config_or_default;
use crate::core::collect::{Collection, TreeCollector};
use crate::core::naming::{sanitize_layer_name, UniqueFileResolver};
use crate::domain::{ExportPreferences, LayeredDocument, Node, NodeKind};
use clap::Args;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Layer manifest (JSON) describing the document
    pub manifest: PathBuf,

    /// Print the layer tree as JSON instead of a tree
    #[arg(long)]
    pub json: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(manifest = %self.manifest.display(), "Inspecting document");

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };
        let prefs = config.export_preferences();

        let document = match load_manifest(&self.manifest) {
            Ok(d) => d,
            Err(e) => {
                println!("❌ Failed to load document");
                println!("   Error: {e}");
                return Ok(5);
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(document.layers())?);
            return Ok(0);
        }

        let collection =
            TreeCollector::new(prefs.traverse_hidden_groups).collect(document.layers(), &NoopProgress);

        println!("📄 {}", document.name());
        print!("{}", render_tree(document.layers()));
        println!();
        let nodes: usize = document.layers().iter().map(Node::node_count).sum();
        println!("Nodes: {}", nodes);
        println!("Layers: {}", collection.len());
        println!("Visible: {}", collection.visible_count());
        if collection.single_background().is_some() {
            println!("Single background: exported as-is");
        }
        println!();

        let planned = planned_names(&collection, &prefs);
        if planned.is_empty() {
            println!("⚠️  Nothing to export");
            return Ok(3);
        }

        println!("Would export to {}:", prefs.destination_directory.display());
        for (layer, name) in planned {
            println!("  {layer} -> {name}");
        }
        Ok(0)
    }
}

/// Indented tree with visibility markers, one node per line
pub fn render_tree(roots: &[Node]) -> String {
    fn walk(nodes: &[Node], depth: usize, out: &mut String) {
        for node in nodes {
            let marker = if node.visible { "👁" } else { "  " };
            let suffix = match node.kind {
                NodeKind::Group => "/",
                NodeKind::Background => " [background]",
                NodeKind::Leaf => "",
            };
            let _ = writeln!(out, "{}{} {}{}", "  ".repeat(depth), marker, node.name, suffix);
            walk(&node.children, depth + 1, out);
        }
    }

    let mut out = String::new();
    walk(roots, 0, &mut out);
    out
}

/// File names an export would use, ignoring files already on disk
fn planned_names(collection: &Collection, prefs: &ExportPreferences) -> Vec<(String, String)> {
    let resolver = UniqueFileResolver::new(prefs.max_name_attempts);
    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut planned = Vec::new();

    let layers = match collection.single_background() {
        Some(background) => vec![background],
        None => collection.work_subset(prefs.visible_only),
    };

    for layer in layers {
        let base = PathBuf::from(sanitize_layer_name(&layer.name));
        let name = match resolver.resolve(&base, prefs.file_extension(), |p| claimed.contains(p)) {
            Ok(path) => {
                let name = path.display().to_string();
                claimed.insert(path);
                name
            }
            Err(e) => format!("<{e}>"),
        };
        planned.push((layer.name.clone(), name));
    }
    planned
}
