//! Versioned purge allow-list
//!
//! Each patch-set generation lists the output files it installs. A stale
//! directory is cleaned of every file any generation up to the current one
//! may have left behind, and of nothing else. Protected names are never
//! purged, whatever a generation lists.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeManifest {
    generations: BTreeMap<u32, Vec<String>>,
    protected: Vec<String>,
}

impl Default for PurgeManifest {
    /// Generations shipped with the bundled archive
    fn default() -> Self {
        Self::new()
            .generation(
                1,
                &[
                    "MonoMod.RuntimeDetour.dll",
                    "MonoMod.Utils.dll",
                    "MonoMod.Common.dll",
                ],
            )
            .generation(
                2,
                &[
                    "MonoMod.Backports.dll",
                    "MonoMod.Core.dll",
                    "MonoMod.ILHelpers.dll",
                    "MonoMod.Iced.dll",
                    "0Harmony.dll",
                ],
            )
            // Games ship their own required build
            .protect("Mono.Cecil.dll")
    }
}

impl PurgeManifest {
    pub fn new() -> Self {
        Self {
            generations: BTreeMap::new(),
            protected: Vec::new(),
        }
    }

    pub fn generation(mut self, version: u32, files: &[&str]) -> Self {
        self.generations
            .entry(version)
            .or_default()
            .extend(files.iter().map(|f| f.to_string()));
        self
    }

    pub fn protect(mut self, file: &str) -> Self {
        self.protected.push(file.to_string());
        self
    }

    pub fn is_protected(&self, file_name: &str) -> bool {
        self.protected
            .iter()
            .any(|p| p.eq_ignore_ascii_case(file_name))
    }

    /// Every purgeable file name for generations `<= current`, sorted
    pub fn purge_list(&self, current: u32) -> Vec<String> {
        let mut files: Vec<String> = self
            .generations
            .range(..=current)
            .flat_map(|(_, files)| files.iter())
            .filter(|f| !self.is_protected(f))
            .cloned()
            .collect();
        files.sort();
        files.dedup();
        files
    }

    pub fn allows(&self, current: u32, file_name: &str) -> bool {
        self.purge_list(current)
            .iter()
            .any(|f| f.eq_ignore_ascii_case(file_name))
    }
}
