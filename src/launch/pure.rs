//! Pure functions module

mod validation;

pub use validation::{validate_assembly, validate_game_dir, validate_renderer};
