//! Patch application over a game directory
//!
//! One pass, under the directory lock:
//! 1. purge stale outputs when the version gate is open
//! 2. overwrite every existing assembly that has a patch, backing it up once
//! 3. add patches with no existing counterpart at the directory root
//! 4. write the fresh version marker
//!
//! A file that fails is reported and skipped; the pass carries on.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{LaunchError, PatchIssue};
use crate::plan::is_assembly;

use super::super::gate::{GateState, PatchVersionGate};
use super::super::operations::{create_backup_once, lock_game_dir, write_atomic};
use super::super::types::{ApplyReport, MergedPatchSet};

enum FileResult {
    Replaced { backed_up: bool },
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct AssemblyPatchApplier {
    gate: PatchVersionGate,
}

impl AssemblyPatchApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate(gate: PatchVersionGate) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &PatchVersionGate {
        &self.gate
    }

    /// Apply `patches` to `game_dir`.
    ///
    /// Fails only when the directory itself cannot be used. Per-file problems
    /// land in [`ApplyReport::issues`] and lower the patched count.
    pub fn apply(
        &self,
        game_dir: &Path,
        patches: &MergedPatchSet,
    ) -> Result<ApplyReport, LaunchError> {
        check_game_dir(game_dir)?;
        let _lock = lock_game_dir(game_dir);

        let mut report = ApplyReport::default();

        if self.gate.evaluate(game_dir) == GateState::Open {
            tracing::info!(
                "Patch set in {} is stale, reinstalling version {}",
                game_dir.display(),
                self.gate.current_version()
            );
            let purge = self.gate.purge(game_dir);
            report.purged = purge.removed;
            report.backups_created += purge.backups_created;
            report.issues.extend(purge.issues);
        }

        let mut present: HashSet<String> = HashSet::new();

        for path in existing_assemblies(game_dir) {
            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            let Some((patch_name, bytes)) = patches.find_ignore_case(&name) else {
                continue;
            };
            present.insert(patch_name.to_ascii_lowercase());

            if self.gate.is_protected(&name) {
                tracing::debug!("Leaving protected {} untouched", path.display());
                continue;
            }

            match replace_file(&path, bytes) {
                Ok(FileResult::Unchanged) => report.unchanged += 1,
                Ok(FileResult::Replaced { backed_up }) => {
                    tracing::info!("Patched {}", path.display());
                    report.replaced += 1;
                    if backed_up {
                        report.backups_created += 1;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to patch {}: {}", path.display(), e);
                    report.issues.push(PatchIssue::ApplyIo {
                        file: path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }

        for (name, bytes) in patches.iter() {
            if present.contains(&name.to_ascii_lowercase()) || self.gate.is_protected(name) {
                continue;
            }
            let target = game_dir.join(name);
            match write_atomic(&target, bytes) {
                Ok(()) => {
                    tracing::info!("Added {}", target.display());
                    report.added += 1;
                }
                Err(e) => {
                    tracing::warn!("Failed to add {}: {}", target.display(), e);
                    report.issues.push(PatchIssue::ApplyIo {
                        file: target,
                        message: e.to_string(),
                    });
                }
            }
        }

        if let Err(e) = self.gate.write_marker(game_dir) {
            tracing::warn!("Failed to write patch marker in {}: {}", game_dir.display(), e);
        }

        tracing::info!(
            "Patched {} of {} assemblies in {} ({} skipped)",
            report.patched_count(),
            patches.len(),
            game_dir.display(),
            report.issues.len()
        );
        Ok(report)
    }
}

fn check_game_dir(game_dir: &Path) -> Result<(), LaunchError> {
    let meta = fs::metadata(game_dir).map_err(|e| LaunchError::inaccessible(game_dir, e))?;
    if !meta.is_dir() {
        return Err(LaunchError::inaccessible(
            game_dir,
            io::Error::other("not a directory"),
        ));
    }
    fs::read_dir(game_dir).map_err(|e| LaunchError::inaccessible(game_dir, e))?;
    Ok(())
}

/// Every assembly under `game_dir`, any depth, in a stable order
fn existing_assemblies(game_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(game_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_assembly(e.path()))
        .map(|e| e.into_path())
        .collect()
}

fn replace_file(path: &Path, bytes: &[u8]) -> io::Result<FileResult> {
    if fs::read(path)? == bytes {
        return Ok(FileResult::Unchanged);
    }
    let backed_up = create_backup_once(path)?;
    write_atomic(path, bytes)?;
    Ok(FileResult::Replaced { backed_up })
}
