//! File replacement primitives

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::super::types::BACKUP_SUFFIX;

/// `<name>.backup` next to `path`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    path.with_file_name(name)
}

/// Copy `path` to its backup unless a backup already exists. The first
/// backup is the authoritative original and is never overwritten.
///
/// Returns whether a backup was created.
pub fn create_backup_once(path: &Path) -> io::Result<bool> {
    let backup = backup_path(path);
    if backup.exists() {
        return Ok(false);
    }
    fs::copy(path, &backup)?;
    Ok(true)
}

/// Replace `path` with `bytes` via a sibling temp file and rename, so a
/// failed write never leaves a truncated assembly behind
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp_name: OsString = OsString::from(".");
    tmp_name.push(path.file_name().unwrap_or_default());
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);

    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}
