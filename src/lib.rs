//! dotlaunch - launch preparation core for managed game binaries
//!
//! Picks a runtime, brings a game directory's patch assemblies up to date,
//! composes startup hooks and hands the resulting [`LaunchPlan`] to a native
//! host. Nothing here starts a process.

pub mod config;
pub mod error;
pub mod launch;
pub mod patch;
pub mod paths;
pub mod plan;
pub mod runtime;

pub use config::LauncherConfig;
pub use error::{LaunchError, Outcome, PatchIssue};
pub use launch::{prepare_launch, EntryPointInvoker, LaunchRequest, PreparedLaunch};
pub use patch::{
    AssemblyPatchApplier, MergedPatchSet, PatchCatalog, PatchDescriptor, PatchVersionGate,
    StartupHookComposer,
};
pub use plan::{LaunchMode, LaunchPlan, LaunchPlanBuilder};
pub use runtime::{RuntimeInstallation, RuntimeInventory, RuntimePolicy};
