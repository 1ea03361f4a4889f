//! Patch file lookup across the external and bundled locations

use std::path::{Component, Path, PathBuf};

/// Where patch assemblies and manifests live. External (user-installed,
/// writable) is always consulted before bundled (read-only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchSources {
    pub external_dir: PathBuf,
    pub bundled_dir: PathBuf,
}

impl PatchSources {
    pub fn new(external_dir: impl Into<PathBuf>, bundled_dir: impl Into<PathBuf>) -> Self {
        Self {
            external_dir: external_dir.into(),
            bundled_dir: bundled_dir.into(),
        }
    }

    /// Absolute path of `file_name` in the first location holding it.
    ///
    /// Only bare file names resolve; anything with a directory part is
    /// refused so a manifest cannot reach outside the patch directories.
    pub fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        let mut components = Path::new(file_name).components();
        if !matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        ) {
            tracing::warn!("Refusing patch file name '{}'", file_name);
            return None;
        }

        [&self.external_dir, &self.bundled_dir]
            .into_iter()
            .map(|dir| dir.join(file_name))
            .find(|path| path.is_file())
            .map(|path| std::path::absolute(&path).unwrap_or(path))
    }
}
