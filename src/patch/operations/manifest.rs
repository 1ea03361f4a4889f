//! Patch manifest loading

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::super::types::{METADATA_FILE, PatchMetadataDocument};
use super::sources::PatchSources;

fn read_document(dir: &Path) -> Option<PatchMetadataDocument> {
    let path = dir.join(METADATA_FILE);
    let file = File::open(&path).ok()?;
    match serde_json::from_reader(BufReader::new(file)) {
        Ok(doc) => Some(doc),
        Err(e) => {
            tracing::warn!("Ignoring unreadable manifest {}: {}", path.display(), e);
            None
        }
    }
}

/// The external manifest if present and parseable, otherwise the bundled
/// one, otherwise an empty document
pub fn load_manifest_document(sources: &PatchSources) -> PatchMetadataDocument {
    if let Some(doc) = read_document(&sources.external_dir) {
        tracing::debug!("Loaded {} patch manifests from external dir", doc.patches.len());
        return doc;
    }
    if let Some(doc) = read_document(&sources.bundled_dir) {
        tracing::debug!("Loaded {} patch manifests from bundled dir", doc.patches.len());
        return doc;
    }
    tracing::debug!("No patch manifest found");
    PatchMetadataDocument::default()
}
