//! Pipelines module (orchestration)

pub mod prepare;

pub use prepare::{dispatch_entry_points, prepare_launch};
