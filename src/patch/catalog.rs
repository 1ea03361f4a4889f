//! Patch catalog
//!
//! Gathers patch bytes from the bundled base archive and from enabled custom
//! patches, and merges them into one set keyed by output filename.

use std::fs;

use crate::error::PatchIssue;

use super::operations::{PatchSources, load_manifest_document, read_archive_assemblies};
use super::pure::merge_patch_sets;
use super::types::{MergedPatchSet, PatchBlobs, PatchDescriptor};

/// Subject reported when the base archive cannot be read
pub const BASE_ARCHIVE_ID: &str = "base-archive";

#[derive(Debug, Clone)]
pub struct PatchCatalog {
    sources: PatchSources,
}

impl PatchCatalog {
    pub fn new(sources: PatchSources) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &PatchSources {
        &self.sources
    }

    /// Every descriptor from the active manifest, in manifest order
    pub fn load_descriptors(&self) -> Vec<PatchDescriptor> {
        load_manifest_document(&self.sources)
            .patches
            .into_iter()
            .map(PatchDescriptor::from)
            .collect()
    }

    /// Assemblies of the bundled archive keyed by basename. An unreadable
    /// archive degrades to no base patches.
    pub fn load_base_patches(archive_bytes: &[u8]) -> Result<PatchBlobs, PatchIssue> {
        read_archive_assemblies(archive_bytes).map_err(|e| {
            tracing::warn!("Base patch archive is unreadable: {}", e);
            PatchIssue::SourceUnavailable {
                patch_id: BASE_ARCHIVE_ID.to_string(),
                file: e.to_string(),
            }
        })
    }

    /// Bytes of every enabled descriptor's assembly. Patches whose file is in
    /// neither location are skipped and reported.
    pub fn load_custom_patches(
        &self,
        descriptors: &[PatchDescriptor],
    ) -> (PatchBlobs, Vec<PatchIssue>) {
        let mut blobs = PatchBlobs::new();
        let mut issues = Vec::new();

        for descriptor in descriptors.iter().filter(|d| d.enabled) {
            let unavailable = || PatchIssue::SourceUnavailable {
                patch_id: descriptor.id.clone(),
                file: descriptor.dll_file_name.clone(),
            };

            let Some(path) = self.sources.resolve(&descriptor.dll_file_name) else {
                tracing::warn!(
                    "Skipping patch {}: {} not found",
                    descriptor.id,
                    descriptor.dll_file_name
                );
                issues.push(unavailable());
                continue;
            };

            match fs::read(&path) {
                Ok(bytes) => {
                    tracing::debug!("Loaded patch {} from {}", descriptor.id, path.display());
                    blobs.insert(descriptor.dll_file_name.clone(), bytes);
                }
                Err(e) => {
                    tracing::warn!("Skipping patch {}: {}: {}", descriptor.id, path.display(), e);
                    issues.push(unavailable());
                }
            }
        }

        (blobs, issues)
    }

    /// Custom entries win on filename collision
    pub fn merge(base: PatchBlobs, custom: PatchBlobs) -> MergedPatchSet {
        merge_patch_sets(base, custom)
    }
}
