use std::cmp::Reverse;
use std::collections::HashSet;

use super::super::types::PatchDescriptor;

/// Highest priority first, catalog order among equals. A repeated id keeps
/// only its first occurrence after ordering.
pub fn order_by_priority(descriptors: &[PatchDescriptor]) -> Vec<&PatchDescriptor> {
    let mut ordered: Vec<&PatchDescriptor> = descriptors.iter().collect();
    ordered.sort_by_key(|d| Reverse(d.priority));

    let mut seen = HashSet::new();
    ordered.retain(|d| seen.insert(d.id.as_str()));
    ordered
}
