//! Read-only filesystem probes used while building a plan

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LaunchError;

pub fn is_assembly(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dll"))
}

pub fn require_file(path: &Path) -> Result<(), LaunchError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(LaunchError::missing(path))
    }
}

pub fn require_dir(path: &Path) -> Result<(), LaunchError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(LaunchError::missing(path))
    }
}

/// `*.dll` files directly inside `dir` (not recursive), sorted by path
pub fn list_assemblies(dir: &Path) -> Result<Vec<PathBuf>, LaunchError> {
    let mut found: Vec<PathBuf> = fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_assembly(path))
        .collect();
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_lists_only_top_level_assemblies() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.dll"), b"b").unwrap();
        fs::write(tmp.path().join("A.DLL"), b"a").unwrap();
        fs::write(tmp.path().join("libcoreclr.so"), b"so").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub/c.dll"), b"c").unwrap();

        let names: Vec<String> = list_assemblies(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["A.DLL", "b.dll"]);
    }

    #[test]
    fn test_require_file_names_missing_path() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("Game.dll");
        match require_file(&missing) {
            Err(LaunchError::MissingFile { path }) => assert_eq!(path, missing),
            other => panic!("unexpected {:?}", other),
        }
    }
}
