//! Launch type definitions

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::patch::{ApplyReport, EntryPointCall, HookComposition};
use crate::paths::normalize_path;
use crate::plan::LaunchPlan;
use crate::runtime::RuntimeInstallation;

/// What to launch
#[derive(Debug, Clone)]
pub struct LaunchRequest {
    /// Game's primary managed assembly
    pub assembly_path: PathBuf,
    /// Directory to patch; defaults to the assembly's directory
    pub game_dir: Option<PathBuf>,
}

impl LaunchRequest {
    pub fn new(assembly_path: impl Into<PathBuf>) -> Self {
        Self {
            assembly_path: assembly_path.into(),
            game_dir: None,
        }
    }

    pub fn with_game_dir(mut self, game_dir: impl Into<PathBuf>) -> Self {
        self.game_dir = Some(game_dir.into());
        self
    }

    /// Directory to patch, absolute with dot segments folded
    pub fn game_dir(&self) -> Option<PathBuf> {
        match &self.game_dir {
            Some(dir) => Some(normalize_path(dir)),
            None => normalize_path(&self.assembly_path)
                .parent()
                .map(Path::to_path_buf),
        }
    }
}

/// Everything prepared for one launch
#[derive(Debug, Clone, Serialize)]
pub struct PreparedLaunch {
    pub runtime: RuntimeInstallation,
    pub plan: LaunchPlan,
    pub apply: ApplyReport,
    pub hooks: HookComposition,
}

/// Runs a patch's managed entry point inside the launched runtime.
///
/// Implemented by the native host layer; launch preparation only hands over
/// fully resolved calls.
pub trait EntryPointInvoker {
    fn invoke(&mut self, call: &EntryPointCall) -> Result<(), String>;
}
