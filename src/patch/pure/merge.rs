use super::super::types::{MergedPatchSet, PatchBlobs};

/// Custom entries override base entries that share an output filename,
/// compared without regard to ASCII case
pub fn merge_patch_sets(base: PatchBlobs, custom: PatchBlobs) -> MergedPatchSet {
    let mut merged = base;
    for (name, bytes) in custom {
        let shadowed: Vec<String> = merged
            .keys()
            .filter(|k| k.eq_ignore_ascii_case(&name))
            .cloned()
            .collect();
        for key in shadowed {
            tracing::debug!("Custom patch {} overrides base {}", name, key);
            merged.remove(&key);
        }
        merged.insert(name, bytes);
    }
    MergedPatchSet(merged)
}
