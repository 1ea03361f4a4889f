//! Per-game patch enablement store

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::paths::normalize_path;

use super::super::types::{ENABLEMENT_FILE, PatchDescriptor};

/// Store key for a game assembly: absolute with dot segments folded, so
/// every spelling of one path reads the same choices
fn game_key(game: &str) -> String {
    normalize_path(Path::new(game)).to_string_lossy().to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct EnablementDocument {
    /// Game assembly path -> ids the user switched on
    #[serde(default)]
    enabled_patches: BTreeMap<String, Vec<String>>,
    /// Game assembly path -> ids the user switched off
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    disabled_patches: BTreeMap<String, Vec<String>>,
}

/// Which patches the user turned on or off for each game. A patch with no
/// recorded choice keeps its manifest default.
#[derive(Debug)]
pub struct PatchEnablement {
    path: PathBuf,
    doc: EnablementDocument,
}

impl PatchEnablement {
    /// Load `patch_manager.json` from `dir`; a missing or corrupt file reads
    /// as "no choices recorded"
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(ENABLEMENT_FILE);
        let doc = match File::open(&path) {
            Ok(file) => serde_json::from_reader(BufReader::new(file)).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable {}: {}", path.display(), e);
                EnablementDocument::default()
            }),
            Err(_) => EnablementDocument::default(),
        };
        Self { path, doc }
    }

    pub fn is_enabled(&self, game: &str, descriptor: &PatchDescriptor) -> bool {
        let game = game_key(game);
        let listed = |map: &BTreeMap<String, Vec<String>>| {
            map.get(&game)
                .is_some_and(|ids| ids.iter().any(|id| *id == descriptor.id))
        };
        if listed(&self.doc.enabled_patches) {
            return true;
        }
        if listed(&self.doc.disabled_patches) {
            return false;
        }
        descriptor.enabled
    }

    /// Record a choice and persist it immediately
    pub fn set_patch_enabled(
        &mut self,
        game: &str,
        patch_id: &str,
        enabled: bool,
    ) -> Result<(), Box<dyn Error>> {
        let game = game_key(game);
        let (add_to, remove_from) = if enabled {
            (&mut self.doc.enabled_patches, &mut self.doc.disabled_patches)
        } else {
            (&mut self.doc.disabled_patches, &mut self.doc.enabled_patches)
        };

        if let Some(ids) = remove_from.get_mut(&game) {
            ids.retain(|id| id != patch_id);
            if ids.is_empty() {
                remove_from.remove(&game);
            }
        }
        let ids = add_to.entry(game).or_default();
        if !ids.iter().any(|id| id == patch_id) {
            ids.push(patch_id.to_string());
        }

        self.save()
    }

    fn save(&self) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &self.doc)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const GAME: &str = "/games/Celeste/Celeste.dll";

    fn descriptor(id: &str, enabled: bool) -> PatchDescriptor {
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
            priority: 0,
            enabled,
        }
    }

    #[test]
    fn test_defaults_to_manifest_flag() {
        let tmp = TempDir::new().unwrap();
        let store = PatchEnablement::load(tmp.path());
        assert!(store.is_enabled(GAME, &descriptor("on", true)));
        assert!(!store.is_enabled(GAME, &descriptor("off", false)));
    }

    #[test]
    fn test_choice_persists_per_game() {
        let tmp = TempDir::new().unwrap();
        let mut store = PatchEnablement::load(tmp.path());
        store.set_patch_enabled(GAME, "off", true).unwrap();
        store.set_patch_enabled(GAME, "on", false).unwrap();

        let reloaded = PatchEnablement::load(tmp.path());
        assert!(reloaded.is_enabled(GAME, &descriptor("off", false)));
        assert!(!reloaded.is_enabled(GAME, &descriptor("on", true)));
        assert!(reloaded.is_enabled("/games/Other.dll", &descriptor("on", true)));
    }

    #[test]
    fn test_reads_enabled_patches_document() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(ENABLEMENT_FILE),
            format!(r#"{{"enabled_patches":{{"{}":["fps"]}}}}"#, GAME),
        )
        .unwrap();
        let store = PatchEnablement::load(tmp.path());
        assert!(store.is_enabled(GAME, &descriptor("fps", false)));
    }

    #[test]
    fn test_path_spellings_share_choices() {
        let tmp = TempDir::new().unwrap();
        let mut store = PatchEnablement::load(tmp.path());
        store
            .set_patch_enabled("/games/Celeste/./lib/../Celeste.dll", "fps", false)
            .unwrap();
        assert!(!store.is_enabled(GAME, &descriptor("fps", true)));

        let cwd = std::env::current_dir().unwrap();
        let absolute = cwd.join("Game.dll").to_string_lossy().to_string();
        store.set_patch_enabled("./Game.dll", "fps", false).unwrap();
        let reloaded = PatchEnablement::load(tmp.path());
        assert!(!reloaded.is_enabled(&absolute, &descriptor("fps", true)));
    }
}
