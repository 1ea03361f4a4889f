use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::patch::{PatchSources, SHARED_DEPENDENCY};
use crate::paths::{
    PATH_BASE_ARCHIVE, PATH_BUNDLED_PATCHES, PATH_DOTNET, PATH_EXTERNAL_PATCHES,
    shared_runtime_root,
};
use crate::runtime::RuntimePolicy;

/// Launcher settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Which runtime version launches use
    #[serde(default)]
    pub runtime: RuntimePolicy,
    /// Precompute TPA/NSP instead of letting the host resolve them
    #[serde(default)]
    pub direct_host: bool,
    #[serde(default)]
    pub verbose_trace: bool,
    /// Renderer id; `None` leaves the graphics environment alone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dotnet_root: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_patches_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundled_patches_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_patch_archive: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_dependency_source: Option<PathBuf>,

    /// Legacy field - migrated to `runtime` on load
    #[serde(default, skip_serializing)]
    pub dotnet_framework: Option<String>,
}

impl LauncherConfig {
    /// Migrate legacy settings to current format
    /// Call this after loading config from disk
    pub fn migrate(&mut self) {
        let Some(legacy) = self.dotnet_framework.take() else {
            return;
        };
        if self.runtime != RuntimePolicy::default() {
            return;
        }
        let legacy = legacy.trim();

        // "net8" selected a major line, "8.0.11" a concrete version
        if let Some(major) = legacy
            .strip_prefix("net")
            .and_then(|m| m.parse::<u32>().ok())
        {
            self.runtime.preferred_major = Some(major);
        } else if legacy.chars().next().is_some_and(|c| c.is_ascii_digit()) {
            self.runtime.pinned_version = Some(legacy.to_string());
        }
    }

    pub fn dotnet_root(&self) -> PathBuf {
        self.dotnet_root.clone().unwrap_or_else(|| PATH_DOTNET.clone())
    }

    pub fn shared_runtime_root(&self) -> PathBuf {
        shared_runtime_root(&self.dotnet_root())
    }

    pub fn patch_sources(&self) -> PatchSources {
        PatchSources::new(
            self.external_patches_dir
                .clone()
                .unwrap_or_else(|| PATH_EXTERNAL_PATCHES.clone()),
            self.bundled_patches_dir
                .clone()
                .unwrap_or_else(|| PATH_BUNDLED_PATCHES.clone()),
        )
    }

    pub fn base_patch_archive(&self) -> PathBuf {
        self.base_patch_archive
            .clone()
            .unwrap_or_else(|| PATH_BASE_ARCHIVE.clone())
    }

    /// Explicit override, else the shared dependency shipped with the
    /// bundled patches
    pub fn shared_dependency_source(&self) -> PathBuf {
        self.shared_dependency_source
            .clone()
            .unwrap_or_else(|| self.patch_sources().bundled_dir.join(SHARED_DEPENDENCY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(value: &str) -> LauncherConfig {
        LauncherConfig {
            dotnet_framework: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_migrate_major_line() {
        let mut cfg = legacy("net8");
        cfg.migrate();
        assert_eq!(cfg.runtime, RuntimePolicy::major(8));
        assert!(cfg.dotnet_framework.is_none());
    }

    #[test]
    fn test_migrate_concrete_version() {
        let mut cfg = legacy("8.0.11");
        cfg.migrate();
        assert_eq!(cfg.runtime, RuntimePolicy::pinned("8.0.11"));
    }

    #[test]
    fn test_migrate_auto_and_existing_policy() {
        let mut cfg = legacy("auto");
        cfg.migrate();
        assert_eq!(cfg.runtime, RuntimePolicy::latest());

        let mut cfg = legacy("net6");
        cfg.runtime = RuntimePolicy::major(9);
        cfg.migrate();
        assert_eq!(cfg.runtime, RuntimePolicy::major(9));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let cfg = LauncherConfig {
            dotnet_root: Some(PathBuf::from("/opt/dotnet")),
            bundled_patches_dir: Some(PathBuf::from("/opt/patches")),
            ..Default::default()
        };
        assert_eq!(
            cfg.shared_runtime_root(),
            PathBuf::from("/opt/dotnet/shared/Microsoft.NETCore.App")
        );
        assert_eq!(
            cfg.shared_dependency_source(),
            PathBuf::from("/opt/patches/0Harmony.dll")
        );
    }
}
