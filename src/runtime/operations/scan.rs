//! Shared runtime discovery
//!
//! Lists `<shared root>/<version>` directories. No caching: every query
//! rescans, so runtimes installed while the launcher runs are picked up.

use std::fs;
use std::path::{Component, Path};

use super::super::pure::{compare_versions, is_version_dir_name, parse_major};
use super::super::types::RuntimeInstallation;

/// All installed versions under `shared_root`, oldest first
pub fn scan_installations(shared_root: &Path) -> Vec<RuntimeInstallation> {
    let entries = match fs::read_dir(shared_root) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("No shared runtime root at {}: {}", shared_root.display(), e);
            return Vec::new();
        }
    };

    let mut installed: Vec<RuntimeInstallation> = entries
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if !is_version_dir_name(&name) {
                tracing::debug!("Ignoring non-version directory {}", name);
                return None;
            }
            Some(RuntimeInstallation {
                major_version: parse_major(&name)?,
                full_version: name,
                root_path: entry.path(),
            })
        })
        .collect();

    installed.sort_by(|a, b| compare_versions(&a.full_version, &b.full_version));
    installed
}

/// The installation named exactly `version`, if that directory exists.
///
/// Only a single plain path component is accepted so a pin can never point
/// outside the shared root.
pub fn installation_at(shared_root: &Path, version: &str) -> Option<RuntimeInstallation> {
    let mut components = Path::new(version).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => {
            tracing::warn!("Ignoring malformed pinned runtime version '{}'", version);
            return None;
        }
    }

    let root_path = shared_root.join(version);
    if !root_path.is_dir() {
        return None;
    }

    Some(RuntimeInstallation {
        major_version: parse_major(version).unwrap_or(0),
        full_version: version.to_string(),
        root_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn shared_root_with(versions: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for v in versions {
            fs::create_dir_all(tmp.path().join(v)).unwrap();
        }
        tmp
    }

    #[test]
    fn test_scan_sorts_by_version() {
        let tmp = shared_root_with(&["9.0.8", "10.0.1", "8.0.11", "8.0.2"]);
        let versions: Vec<String> = scan_installations(tmp.path())
            .into_iter()
            .map(|i| i.full_version)
            .collect();
        assert_eq!(versions, ["8.0.2", "8.0.11", "9.0.8", "10.0.1"]);
    }

    #[test]
    fn test_scan_skips_files_and_odd_names() {
        let tmp = shared_root_with(&["8.0.11", "staging"]);
        fs::write(tmp.path().join("9.0.0"), b"not a dir").unwrap();
        let installed = scan_installations(tmp.path());
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].major_version, 8);
    }

    #[test]
    fn test_scan_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_installations(&tmp.path().join("nope")).is_empty());
    }

    #[test]
    fn test_installation_at_rejects_traversal() {
        let tmp = shared_root_with(&["8.0.11"]);
        assert!(installation_at(tmp.path(), "8.0.11").is_some());
        assert!(installation_at(tmp.path(), "../8.0.11").is_none());
        assert!(installation_at(tmp.path(), "9.0.0").is_none());
    }
}
