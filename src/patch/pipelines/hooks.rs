//! Startup hook composition
//!
//! Orders enabled patches by priority, stages the shared interception
//! library into the game directory once, and resolves each patch's own
//! assembly to the absolute path the runtime loads as a startup hook.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LaunchError, PatchIssue};
use crate::plan::join_path_list;

use super::super::operations::PatchSources;
use super::super::pure::order_by_priority;
use super::super::types::{EntryPointCall, HookComposition, PatchDescriptor};

/// Interception library every hook patch links against
pub const SHARED_DEPENDENCY: &str = "0Harmony.dll";

#[derive(Debug, Clone)]
pub struct StartupHookComposer {
    game_dir: PathBuf,
    sources: PatchSources,
    shared_dependency_source: Option<PathBuf>,
}

impl StartupHookComposer {
    pub fn new(game_dir: impl Into<PathBuf>, sources: PatchSources) -> Self {
        Self {
            game_dir: game_dir.into(),
            sources,
            shared_dependency_source: None,
        }
    }

    /// Canonical copy of the shared dependency to stage from
    pub fn with_shared_dependency_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.shared_dependency_source = Some(source.into());
        self
    }

    /// Hook paths for `descriptors`, highest priority first. Disabled or
    /// unresolvable patches are left out; the latter are reported.
    pub fn compose(&self, descriptors: &[PatchDescriptor]) -> HookComposition {
        let enabled: Vec<PatchDescriptor> =
            descriptors.iter().filter(|d| d.enabled).cloned().collect();

        let mut composition = HookComposition::default();
        let mut seen_paths: HashSet<PathBuf> = HashSet::new();
        let mut dependency_checked = false;

        for descriptor in order_by_priority(&enabled) {
            if !dependency_checked {
                self.stage_shared_dependency();
                dependency_checked = true;
            }

            let Some(path) = self.sources.resolve(&descriptor.dll_file_name) else {
                tracing::warn!(
                    "Omitting startup hook for {}: {} not found",
                    descriptor.id,
                    descriptor.dll_file_name
                );
                composition.issues.push(PatchIssue::HookUnresolved {
                    patch_id: descriptor.id.clone(),
                    message: format!("{} not found", descriptor.dll_file_name),
                });
                continue;
            };

            if !seen_paths.insert(path.clone()) {
                tracing::debug!("Hook {} already listed, skipping {}", path.display(), descriptor.id);
                continue;
            }

            if let (Some(type_name), Some(method_name)) =
                (&descriptor.entry_type, &descriptor.entry_method)
            {
                composition.entry_points.push(EntryPointCall {
                    patch_id: descriptor.id.clone(),
                    assembly_path: path.clone(),
                    type_name: type_name.clone(),
                    method_name: method_name.clone(),
                });
            }

            tracing::debug!(
                "Startup hook {} (priority {}): {}",
                descriptor.id,
                descriptor.priority,
                path.display()
            );
            composition.hook_paths.push(path);
        }

        composition
    }

    /// Delimited value for the runtime's startup-hook variable
    pub fn env_value(composition: &HookComposition) -> Result<String, LaunchError> {
        join_path_list(&composition.hook_paths)
    }

    /// Copy the shared dependency into the game directory unless one is
    /// already there. Failure only costs the hooks that need it.
    fn stage_shared_dependency(&self) {
        let target = self.game_dir.join(SHARED_DEPENDENCY);
        if target.exists() {
            return;
        }
        let Some(source) = self.shared_dependency_path() else {
            tracing::warn!("No source for {}, hooks may fail to load", SHARED_DEPENDENCY);
            return;
        };
        match fs::copy(&source, &target) {
            Ok(_) => tracing::info!("Staged {} into {}", SHARED_DEPENDENCY, self.game_dir.display()),
            Err(e) => tracing::warn!(
                "Failed to stage {} from {}: {}",
                SHARED_DEPENDENCY,
                source.display(),
                e
            ),
        }
    }

    fn shared_dependency_path(&self) -> Option<PathBuf> {
        match &self.shared_dependency_source {
            Some(path) if Path::new(path).is_file() => Some(path.clone()),
            Some(_) => None,
            None => self.sources.resolve(SHARED_DEPENDENCY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        game: PathBuf,
        sources: PatchSources,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let game = tmp.path().join("game");
        let sources = PatchSources::new(tmp.path().join("external"), tmp.path().join("bundled"));
        for dir in [&game, &sources.external_dir, &sources.bundled_dir] {
            fs::create_dir_all(dir).unwrap();
        }
        Fixture {
            _tmp: tmp,
            game,
            sources,
        }
    }

    fn descriptor(id: &str, priority: i32) -> PatchDescriptor {
        PatchDescriptor {
            id: id.to_string(),
            display_name: id.to_string(),
            description: String::new(),
            version: "1.0.0".to_string(),
            author: "Unknown".to_string(),
            dll_file_name: format!("{}.dll", id),
            target_pattern: "*".to_string(),
            entry_type: None,
            entry_method: None,
            priority,
            enabled: true,
        }
    }

    #[test]
    fn test_priority_order() {
        let f = fixture();
        fs::write(f.sources.external_dir.join("ten.dll"), b"10").unwrap();
        fs::write(f.sources.bundled_dir.join("twenty.dll"), b"20").unwrap();

        let composer = StartupHookComposer::new(&f.game, f.sources.clone());
        let hooks = composer.compose(&[descriptor("ten", 10), descriptor("twenty", 20)]);

        assert_eq!(
            hooks.hook_paths,
            vec![
                f.sources.bundled_dir.join("twenty.dll"),
                f.sources.external_dir.join("ten.dll"),
            ]
        );
        let value = StartupHookComposer::env_value(&hooks).unwrap();
        assert!(value.find("twenty.dll").unwrap() < value.find("ten.dll").unwrap());
    }

    #[test]
    fn test_unresolved_patch_is_omitted() {
        let f = fixture();
        fs::write(f.sources.external_dir.join("ok.dll"), b"ok").unwrap();
        let composer = StartupHookComposer::new(&f.game, f.sources.clone());
        let hooks = composer.compose(&[descriptor("missing", 50), descriptor("ok", 1)]);

        assert_eq!(hooks.hook_paths.len(), 1);
        assert_eq!(hooks.issues.len(), 1);
        assert_eq!(hooks.issues[0].subject(), "missing");
    }

    #[test]
    fn test_same_file_listed_once() {
        let f = fixture();
        fs::write(f.sources.external_dir.join("shared.dll"), b"s").unwrap();
        let mut a = descriptor("a", 5);
        let mut b = descriptor("b", 1);
        a.dll_file_name = "shared.dll".to_string();
        b.dll_file_name = "shared.dll".to_string();

        let hooks = StartupHookComposer::new(&f.game, f.sources.clone()).compose(&[a, b]);
        assert_eq!(hooks.hook_paths.len(), 1);
    }

    #[test]
    fn test_shared_dependency_staged_once() {
        let f = fixture();
        fs::write(f.sources.bundled_dir.join(SHARED_DEPENDENCY), b"harmony").unwrap();
        fs::write(f.sources.external_dir.join("a.dll"), b"a").unwrap();
        let composer = StartupHookComposer::new(&f.game, f.sources.clone());

        composer.compose(&[descriptor("a", 0)]);
        assert_eq!(fs::read(f.game.join(SHARED_DEPENDENCY)).unwrap(), b"harmony");

        fs::write(f.game.join(SHARED_DEPENDENCY), b"game-copy").unwrap();
        composer.compose(&[descriptor("a", 0)]);
        assert_eq!(fs::read(f.game.join(SHARED_DEPENDENCY)).unwrap(), b"game-copy");
    }

    #[test]
    fn test_no_enabled_patches_stages_nothing() {
        let f = fixture();
        fs::write(f.sources.bundled_dir.join(SHARED_DEPENDENCY), b"harmony").unwrap();
        let mut off = descriptor("off", 0);
        off.enabled = false;

        let hooks = StartupHookComposer::new(&f.game, f.sources.clone()).compose(&[off]);
        assert!(hooks.hook_paths.is_empty());
        assert!(!f.game.join(SHARED_DEPENDENCY).exists());
    }

    #[test]
    fn test_entry_points_collected() {
        let f = fixture();
        fs::write(f.sources.external_dir.join("ep.dll"), b"ep").unwrap();
        let mut ep = descriptor("ep", 0);
        ep.entry_type = Some("Ep.Patch".to_string());
        ep.entry_method = Some("Init".to_string());

        let hooks = StartupHookComposer::new(&f.game, f.sources.clone()).compose(&[ep]);
        assert_eq!(hooks.entry_points.len(), 1);
        assert_eq!(hooks.entry_points[0].method_name, "Init");
        assert_eq!(hooks.entry_points[0].assembly_path, hooks.hook_paths[0]);
    }
}
