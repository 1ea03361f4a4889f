//! Patch type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Manifest document listing every patch a source ships
pub const METADATA_FILE: &str = "patch_metadata.json";

/// Per-game enablement store, kept in the external patches directory
pub const ENABLEMENT_FILE: &str = "patch_manager.json";

/// Suffix appended to an original assembly before it is first overwritten
pub const BACKUP_SUFFIX: &str = ".backup";

/// Managed entry point a patch asks to have invoked after load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoint {
    #[serde(default)]
    pub type_name: String,
    #[serde(default)]
    pub method_name: String,
}

/// One patch entry as written in `patch_metadata.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchManifest {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_author")]
    pub author: String,
    pub dll_file_name: String,
    #[serde(default)]
    pub target_games: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<EntryPoint>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_author() -> String {
    "Unknown".to_string()
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchMetadataDocument {
    #[serde(default)]
    pub patches: Vec<PatchManifest>,
}

/// A loaded patch; immutable after load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchDescriptor {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub version: String,
    pub author: String,
    pub dll_file_name: String,
    /// Matched against the game's primary assembly path
    pub target_pattern: String,
    pub entry_type: Option<String>,
    pub entry_method: Option<String>,
    /// Higher runs first
    pub priority: i32,
    pub enabled: bool,
}

impl PatchDescriptor {
    pub fn has_entry_point(&self) -> bool {
        self.entry_type.is_some() && self.entry_method.is_some()
    }

    /// Same descriptor with enablement replaced by a per-game choice
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl From<PatchManifest> for PatchDescriptor {
    fn from(m: PatchManifest) -> Self {
        let (entry_type, entry_method) = match m.entry_point {
            Some(ep) => (non_empty(ep.type_name), non_empty(ep.method_name)),
            None => (None, None),
        };
        let display_name = if m.name.is_empty() { m.id.clone() } else { m.name };
        PatchDescriptor {
            id: m.id,
            display_name,
            description: m.description,
            version: m.version,
            author: m.author,
            dll_file_name: m.dll_file_name,
            target_pattern: m.target_games.into_iter().next().unwrap_or_default(),
            entry_type,
            entry_method,
            priority: m.priority,
            enabled: m.enabled,
        }
    }
}

/// Output filename -> patch bytes
pub type PatchBlobs = BTreeMap<String, Vec<u8>>;

/// One definitive byte blob per output filename, whatever its source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedPatchSet(pub(crate) PatchBlobs);

impl MergedPatchSet {
    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.0.get(file_name).map(Vec::as_slice)
    }

    /// Entry whose file name matches `file_name` ignoring ASCII case, with
    /// the name as stored
    pub fn find_ignore_case(&self, file_name: &str) -> Option<(&str, &[u8])> {
        self.iter().find(|(name, _)| name.eq_ignore_ascii_case(file_name))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Result of one apply pass over a game directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Existing assemblies overwritten with patch bytes
    pub replaced: usize,
    /// Patch files written where no assembly existed
    pub added: usize,
    /// Existing assemblies already identical to the patch
    pub unchanged: usize,
    /// Files removed by a stale-version purge
    pub purged: usize,
    pub backups_created: usize,
    #[serde(skip)]
    pub issues: Vec<crate::error::PatchIssue>,
}

impl ApplyReport {
    /// Entries of the merged set now present in the game directory
    pub fn patched_count(&self) -> usize {
        self.replaced + self.added + self.unchanged
    }
}

/// `(assembly, type, method)` handed to an entry point invoker, never run here
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPointCall {
    pub patch_id: String,
    pub assembly_path: PathBuf,
    pub type_name: String,
    pub method_name: String,
}

/// Startup hooks composed for one launch
#[derive(Debug, Clone, Default, Serialize)]
pub struct HookComposition {
    pub hook_paths: Vec<PathBuf>,
    pub entry_points: Vec<EntryPointCall>,
    #[serde(skip)]
    pub issues: Vec<crate::error::PatchIssue>,
}
