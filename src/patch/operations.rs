//! Operations module (atomic side effects)

mod archive;
mod enablement;
mod files;
mod lock;
mod manifest;
mod marker;
mod sources;

pub use archive::read_archive_assemblies;
pub use enablement::PatchEnablement;
pub use files::{backup_path, create_backup_once, write_atomic};
pub use lock::lock_game_dir;
pub use manifest::load_manifest_document;
pub use marker::{MARKER_FILE, marker_path, read_marker, write_marker};
pub use sources::PatchSources;
