use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::output::ensure_directory;

/// Subdirectories scaffolded inside every output workspace.
pub const WORKSPACE_DIRS: [&str; 4] = ["scripts", "images", "data", "docs"];

/// Pinned list of the plotting/numeric crates behind the generated artifacts.
/// Plain text, never parsed by this program.
pub fn dependency_manifest() -> &'static str {
    "plotters 0.3\n\
     csv 1.3\n\
     serde 1.0\n\
     serde_json 1.0\n\
     toml 0.8\n\
     anyhow 1.0\n\
     clap 4.5\n"
}

/// Newline-separated glob patterns for build artifacts.
pub fn ignore_rules() -> &'static str {
    "target/\n\
     *.tmp\n\
     *.swp\n\
     .DS_Store\n"
}

/// Create the workspace skeleton idempotently: subdirectories are created if
/// missing and left untouched otherwise, the two text files are overwritten
/// deterministically.
pub fn scaffold(root: &Path) -> Result<Vec<PathBuf>> {
    ensure_directory(root)?;
    for dir in WORKSPACE_DIRS {
        ensure_directory(&root.join(dir))?;
    }

    let manifest = root.join("DEPENDENCIES.txt");
    fs::write(&manifest, dependency_manifest())
        .with_context(|| format!("Failed to write {}", manifest.display()))?;

    let ignore = root.join(".gitignore");
    fs::write(&ignore, ignore_rules())
        .with_context(|| format!("Failed to write {}", ignore.display()))?;

    Ok(vec![manifest, ignore])
}
