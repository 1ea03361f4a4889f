//! Runtime inventory
//!
//! Enumerates the shared runtime versions installed side by side under one
//! dotnet root and resolves which one a launch uses.
//!
//! ## Module Structure
//! - `types.rs`: RuntimeInstallation, RuntimePolicy
//! - `pure/`: version parsing and ordering
//! - `operations/`: directory scans

use std::path::{Path, PathBuf};

use crate::error::LaunchError;
use crate::paths::shared_runtime_root;

mod operations;
mod pure;
mod types;

pub use pure::compare_versions;
pub use types::{RuntimeInstallation, RuntimePolicy};

use operations::{installation_at, scan_installations};
use pure::pick_preferred;

pub struct RuntimeInventory {
    shared_root: PathBuf,
}

impl RuntimeInventory {
    /// Inventory over an explicit shared runtime root
    pub fn new(shared_root: impl Into<PathBuf>) -> Self {
        Self {
            shared_root: shared_root.into(),
        }
    }

    /// Inventory over `<dotnet_root>/shared/Microsoft.NETCore.App`
    pub fn from_dotnet_root(dotnet_root: &Path) -> Self {
        Self::new(shared_runtime_root(dotnet_root))
    }

    pub fn shared_root(&self) -> &Path {
        &self.shared_root
    }

    /// Installed versions, oldest first
    pub fn list_installed(&self) -> Vec<RuntimeInstallation> {
        scan_installations(&self.shared_root)
    }

    /// Resolve the runtime for a launch.
    ///
    /// 1. an existing pinned version, verbatim
    /// 2. the newest version of the preferred major line
    /// 3. the newest version overall
    ///
    /// A step that yields nothing falls through to the next one.
    pub fn resolve_preferred(
        &self,
        policy: &RuntimePolicy,
    ) -> Result<RuntimeInstallation, LaunchError> {
        if let Some(pin) = &policy.pinned_version {
            if let Some(inst) = installation_at(&self.shared_root, pin) {
                tracing::info!("Using pinned runtime {}", inst.full_version);
                return Ok(inst);
            }
            tracing::warn!(
                "Pinned runtime {} is not installed under {}",
                pin,
                self.shared_root.display()
            );
        }

        let installed = self.list_installed();

        if let Some(major) = policy.preferred_major {
            if let Some(inst) = pick_preferred(&installed, Some(major)) {
                tracing::info!("Using runtime {} for major {}", inst.full_version, major);
                return Ok(inst.clone());
            }
            tracing::warn!("No runtime of major {} installed, falling back to latest", major);
        }

        match pick_preferred(&installed, None) {
            Some(inst) => {
                tracing::info!("Using latest runtime {}", inst.full_version);
                Ok(inst.clone())
            }
            None => {
                tracing::error!("No runtime versions installed in {}", self.shared_root.display());
                Err(LaunchError::RuntimeNotFound(policy.describe()))
            }
        }
    }
}
