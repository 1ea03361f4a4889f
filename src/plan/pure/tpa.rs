//! Trusted platform assembly list construction
//!
//! The runtime binds an assembly by simple name, first match wins. An
//! assembly present in the app directory must therefore replace the
//! framework entry of the same name rather than follow it.

use std::path::{Path, PathBuf};

fn simple_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().to_lowercase())
}

/// Framework entries in their given order, with app entries of the same
/// name substituted in place; remaining app entries follow.
pub fn merge_trusted_assemblies(framework: &[PathBuf], app: &[PathBuf]) -> Vec<PathBuf> {
    let mut merged: Vec<PathBuf> = Vec::with_capacity(framework.len() + app.len());
    let mut seen: Vec<String> = Vec::new();

    for path in framework {
        let Some(name) = simple_name(path) else {
            continue;
        };
        if seen.contains(&name) {
            continue;
        }
        let chosen = app
            .iter()
            .find(|a| simple_name(a).as_deref() == Some(name.as_str()))
            .unwrap_or(path);
        merged.push(chosen.clone());
        seen.push(name);
    }

    for path in app {
        let Some(name) = simple_name(path) else {
            continue;
        };
        if !seen.contains(&name) {
            merged.push(path.clone());
            seen.push(name);
        }
    }

    merged
}
