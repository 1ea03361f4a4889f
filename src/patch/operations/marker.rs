//! Patch-set version marker file

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const MARKER_FILE: &str = ".dotlaunch_patch_version";

pub fn marker_path(game_dir: &Path) -> PathBuf {
    game_dir.join(MARKER_FILE)
}

/// `Ok(None)` when no marker exists; an error when it exists but does not
/// hold a decimal integer
pub fn read_marker(game_dir: &Path) -> io::Result<Option<u32>> {
    let content = match fs::read_to_string(marker_path(game_dir)) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };
    content
        .trim()
        .parse::<u32>()
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

pub fn write_marker(game_dir: &Path, version: u32) -> io::Result<()> {
    fs::write(marker_path(game_dir), format!("{}\n", version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_then_written() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(read_marker(tmp.path()).unwrap(), None);
        write_marker(tmp.path(), 2).unwrap();
        assert_eq!(read_marker(tmp.path()).unwrap(), Some(2));
    }

    #[test]
    fn test_garbled_marker_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(marker_path(tmp.path()), "two").unwrap();
        assert!(read_marker(tmp.path()).is_err());
    }
}
