//! Pipelines module (orchestration)

pub mod apply;
pub mod hooks;

pub use apply::AssemblyPatchApplier;
pub use hooks::{SHARED_DEPENDENCY, StartupHookComposer};
