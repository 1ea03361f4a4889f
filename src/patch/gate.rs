//! Patch-set version gate
//!
//! CLOSED while the game directory's marker is at the compiled-in version,
//! OPEN when the marker is missing, older, or unreadable. The gate never
//! closes itself: a finished apply pass writes a fresh marker.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PatchIssue;

use super::operations::{create_backup_once, marker_path, read_marker, write_marker};
use super::pure::PurgeManifest;

/// Generation of the bundled patch archive this build installs
pub const CURRENT_PATCH_VERSION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Closed,
    /// Installed patches are stale and must be purged before reapplying
    Open,
}

/// What one purge removed and what it could not
#[derive(Debug, Default)]
pub struct PurgeReport {
    pub removed: usize,
    pub backups_created: usize,
    pub issues: Vec<PatchIssue>,
}

#[derive(Debug, Clone)]
pub struct PatchVersionGate {
    current: u32,
    purge: PurgeManifest,
}

impl Default for PatchVersionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchVersionGate {
    pub fn new() -> Self {
        Self::with_version(CURRENT_PATCH_VERSION)
    }

    pub fn with_version(current: u32) -> Self {
        Self {
            current,
            purge: PurgeManifest::default(),
        }
    }

    pub fn with_purge_manifest(mut self, purge: PurgeManifest) -> Self {
        self.purge = purge;
        self
    }

    pub fn current_version(&self) -> u32 {
        self.current
    }

    pub fn is_protected(&self, file_name: &str) -> bool {
        self.purge.is_protected(file_name)
    }

    pub fn marker_path(&self, game_dir: &Path) -> PathBuf {
        marker_path(game_dir)
    }

    pub fn state_for(&self, marker: Option<u32>) -> GateState {
        match marker {
            Some(v) if v >= self.current => GateState::Closed,
            _ => GateState::Open,
        }
    }

    /// Current state for `game_dir`. A marker that cannot be read counts as
    /// OPEN so stale binaries are reinstalled rather than kept.
    pub fn evaluate(&self, game_dir: &Path) -> GateState {
        match read_marker(game_dir) {
            Ok(marker) => {
                let state = self.state_for(marker);
                tracing::debug!(
                    "Patch marker {:?} vs current {} -> {:?}",
                    marker,
                    self.current,
                    state
                );
                state
            }
            Err(e) => {
                tracing::warn!(
                    "Unreadable patch marker in {}, forcing reinstall: {}",
                    game_dir.display(),
                    e
                );
                GateState::Open
            }
        }
    }

    /// Delete every allow-listed file directly inside `game_dir`, then the
    /// marker. Nothing outside the allow-list is touched.
    ///
    /// Each file is backed up once before removal; one whose backup fails
    /// is reported and left in place.
    pub fn purge(&self, game_dir: &Path) -> PurgeReport {
        let mut report = PurgeReport::default();

        let entries = match fs::read_dir(game_dir) {
            Ok(entries) => entries,
            Err(e) => {
                report.issues.push(PatchIssue::ApplyIo {
                    file: game_dir.to_path_buf(),
                    message: e.to_string(),
                });
                return report;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if !self.purge.allows(self.current, &name) {
                continue;
            }
            match create_backup_once(&path) {
                Ok(created) => {
                    if created {
                        report.backups_created += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!("Keeping {}, backup failed: {}", path.display(), e);
                    report.issues.push(PatchIssue::ApplyIo {
                        file: path,
                        message: format!("backup failed: {}", e),
                    });
                    continue;
                }
            }
            match fs::remove_file(&path) {
                Ok(()) => {
                    tracing::info!("Purged stale patch file {}", name);
                    report.removed += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to purge {}: {}", path.display(), e);
                    report.issues.push(PatchIssue::ApplyIo {
                        file: path,
                        message: e.to_string(),
                    });
                }
            }
        }

        let marker = marker_path(game_dir);
        if let Err(e) = fs::remove_file(&marker) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to remove {}: {}", marker.display(), e);
            }
        }

        report
    }

    pub fn write_marker(&self, game_dir: &Path) -> std::io::Result<()> {
        write_marker(game_dir, self.current)
    }
}
