//! Pure functions for runtime selection
//!
//! These functions have no side effects and are deterministic.

mod version;

pub use version::{compare_versions, is_version_dir_name, parse_major, pick_preferred};
