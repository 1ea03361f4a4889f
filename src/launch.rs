//! Launch module - launch preparation and orchestration
//!
//! This module provides:
//! - Request validation (assembly, renderer)
//! - The full preparation sequence from runtime choice to LaunchPlan
//! - Entry point hand-off to the native host layer
//!
//! ## Module Structure
//! - `types.rs`: LaunchRequest, PreparedLaunch, EntryPointInvoker
//! - `pure/`: Pure functions (validation)
//! - `pipelines/`: High-level orchestration (prepare)

mod pipelines;
mod pure;
mod types;

// Re-export public API
pub use pipelines::{dispatch_entry_points, prepare_launch};
pub use pure::{validate_assembly, validate_game_dir, validate_renderer};
pub use types::{EntryPointInvoker, LaunchRequest, PreparedLaunch};
