//! Pure functions module (no side effects)

mod applicability;
mod merge;
mod order;
mod purge;

pub use applicability::applies_to;
pub use merge::merge_patch_sets;
pub use order::order_by_priority;
pub use purge::PurgeManifest;
