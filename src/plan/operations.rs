//! Operations module (filesystem probes)

mod probe;

pub use probe::{is_assembly, list_assemblies, require_dir, require_file};
