//! Assembly patch module
//!
//! Loads patch assemblies from the bundled base archive and user-installed
//! custom patches, applies them over a game directory with versioned purge
//! and one-time backups, and composes startup hooks.
//!
//! ## Module Structure
//! - `types.rs`: manifests, descriptors, merged sets, reports
//! - `catalog.rs`: PatchCatalog
//! - `gate.rs`: PatchVersionGate
//! - `pure/`: merging, applicability, ordering, purge allow-list
//! - `operations/`: archive, manifest and enablement I/O, file primitives, locking
//! - `pipelines/`: AssemblyPatchApplier, StartupHookComposer

mod catalog;
mod gate;
mod operations;
mod pipelines;
mod pure;
mod types;

pub use catalog::{BASE_ARCHIVE_ID, PatchCatalog};
pub use gate::{CURRENT_PATCH_VERSION, GateState, PatchVersionGate, PurgeReport};
pub use operations::{MARKER_FILE, PatchEnablement, PatchSources};
pub use pipelines::{AssemblyPatchApplier, SHARED_DEPENDENCY, StartupHookComposer};
pub use pure::{PurgeManifest, applies_to};
pub use types::{
    ApplyReport, BACKUP_SUFFIX, ENABLEMENT_FILE, EntryPoint, EntryPointCall, HookComposition,
    METADATA_FILE, MergedPatchSet, PatchBlobs, PatchDescriptor, PatchManifest,
    PatchMetadataDocument,
};
