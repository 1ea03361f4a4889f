//! Bundled patch archive reading

use std::io::{Cursor, Read};

use zip::ZipArchive;
use zip::result::ZipError;

use super::super::types::PatchBlobs;

/// Largest single assembly accepted from the archive
const MAX_ENTRY_BYTES: u64 = 256 * 1024 * 1024;

/// Last path component of an archive entry name, either separator style
fn entry_basename(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// Every `*.dll` entry keyed by basename. Directory prefixes are dropped;
/// a later entry with the same basename replaces an earlier one.
pub fn read_archive_assemblies(bytes: &[u8]) -> Result<PatchBlobs, ZipError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut blobs = PatchBlobs::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry.name().to_string();
        if !name.to_ascii_lowercase().ends_with(".dll") {
            continue;
        }
        let basename = entry_basename(&name);
        if basename.is_empty() {
            continue;
        }

        // Header sizes are untrusted; grow as bytes actually arrive
        let mut data = Vec::new();
        (&mut entry).take(MAX_ENTRY_BYTES + 1).read_to_end(&mut data)?;
        if data.len() as u64 > MAX_ENTRY_BYTES {
            return Err(ZipError::Io(std::io::Error::other(format!(
                "entry {} exceeds {} bytes",
                name, MAX_ENTRY_BYTES
            ))));
        }
        if blobs.insert(basename.to_string(), data).is_some() {
            tracing::debug!("Archive entry {} replaces an earlier {}", name, basename);
        }
    }

    Ok(blobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_keeps_assemblies_by_basename() {
        let bytes = archive(&[
            ("MonoMod/MonoMod.Core.dll", b"core"),
            ("MonoMod/readme.txt", b"text"),
            ("0Harmony.DLL", b"harmony"),
        ]);
        let blobs = read_archive_assemblies(&bytes).unwrap();
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs["MonoMod.Core.dll"], b"core");
        assert_eq!(blobs["0Harmony.DLL"], b"harmony");
    }

    #[test]
    fn test_duplicate_basename_last_wins() {
        let bytes = archive(&[("net6/A.dll", b"first"), ("net8/A.dll", b"second")]);
        let blobs = read_archive_assemblies(&bytes).unwrap();
        assert_eq!(blobs["A.dll"], b"second");
    }

    #[test]
    fn test_backslash_prefix_stripped() {
        assert_eq!(entry_basename("lib\\net8\\A.dll"), "A.dll");
        assert_eq!(entry_basename("A.dll"), "A.dll");
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(read_archive_assemblies(b"not a zip").is_err());
    }

    /// Rewrite every uncompressed-size field of a stored single-entry zip to
    /// `size` without touching the data
    fn forge_size(mut bytes: Vec<u8>, size: u32) -> Vec<u8> {
        let find = |bytes: &[u8], sig: &[u8]| bytes.windows(4).position(|w| w == sig).unwrap();
        let local = find(&bytes, b"PK\x03\x04");
        bytes[local + 22..local + 26].copy_from_slice(&size.to_le_bytes());
        let central = find(&bytes, b"PK\x01\x02");
        bytes[central + 24..central + 28].copy_from_slice(&size.to_le_bytes());
        bytes
    }

    #[test]
    fn test_forged_entry_size_is_an_error_not_an_abort() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let stored = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file("A.dll", stored).unwrap();
        writer.write_all(b"tiny").unwrap();
        let bytes = forge_size(writer.finish().unwrap().into_inner(), u32::MAX - 1);

        let result = std::panic::catch_unwind(|| read_archive_assemblies(&bytes));
        assert!(result.is_ok());
        assert!(result.unwrap().map(|b| b["A.dll"] == b"tiny").unwrap_or(true));
    }
}
