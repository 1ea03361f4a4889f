//! Pure functions module (no side effects)

mod env;
mod renderer;
mod tpa;

pub use env::{join_path_list, trace_env};
pub use renderer::{KNOWN_RENDERERS, renderer_env};
pub use tpa::merge_trusted_assemblies;
