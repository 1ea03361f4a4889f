//! Launch plan type definitions

use serde::Serialize;
use std::path::PathBuf;

use crate::error::LaunchError;
use crate::paths::dotnet_root_of;

use super::pure::{join_path_list, trace_env};

pub const ENV_DOTNET_ROOT: &str = "DOTNET_ROOT";
pub const ENV_STARTUP_HOOKS: &str = "DOTNET_STARTUP_HOOKS";

pub const PROP_TRUSTED_ASSEMBLIES: &str = "TRUSTED_PLATFORM_ASSEMBLIES";
pub const PROP_NATIVE_SEARCH: &str = "NATIVE_DLL_SEARCH_DIRECTORIES";
pub const PROP_APP_PATHS: &str = "APP_PATHS";
pub const PROP_APP_BASE: &str = "APP_CONTEXT_BASE_DIRECTORY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LaunchMode {
    /// The native host resolves dependencies itself
    AppHost,
    /// Dependencies are precomputed and handed over as TPA/NSP lists
    DirectHost,
}

/// Everything the native host needs for one launch. Built fresh per launch,
/// consumed once, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchPlan {
    pub mode: LaunchMode,
    pub assembly_path: PathBuf,
    pub runtime_root: PathBuf,
    pub explicit_version: Option<String>,
    pub app_directory: PathBuf,
    /// Empty in AppHost mode
    pub trusted_assemblies: Vec<PathBuf>,
    /// Empty in AppHost mode
    pub native_search_paths: Vec<PathBuf>,
    pub startup_hook_paths: Vec<PathBuf>,
    pub verbose_trace: bool,
    /// Renderer variables; `None` means the variable must be unset
    pub renderer_env: Vec<(String, Option<String>)>,
}

impl LaunchPlan {
    pub fn with_startup_hooks(mut self, hooks: Vec<PathBuf>) -> Self {
        self.startup_hook_paths = hooks;
        self
    }

    /// Point the plan at the directory the patches were applied to
    pub fn with_app_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.app_directory = dir.into();
        self
    }

    pub fn with_renderer_env(mut self, env: Vec<(String, Option<String>)>) -> Self {
        self.renderer_env = env;
        self
    }

    /// Environment for the native host process.
    ///
    /// `Some` assigns, `None` removes. The startup-hook variable is left out
    /// entirely when there are no hooks.
    pub fn host_env(&self) -> Result<Vec<(String, Option<String>)>, LaunchError> {
        let dotnet_root = dotnet_root_of(&self.runtime_root).ok_or_else(|| {
            LaunchError::ParameterSet(format!(
                "runtime root {} is not inside a dotnet installation",
                self.runtime_root.display()
            ))
        })?;

        let mut env = vec![(
            ENV_DOTNET_ROOT.to_string(),
            Some(dotnet_root.to_string_lossy().to_string()),
        )];

        if !self.startup_hook_paths.is_empty() {
            env.push((
                ENV_STARTUP_HOOKS.to_string(),
                Some(join_path_list(&self.startup_hook_paths)?),
            ));
        }

        env.extend(
            trace_env(self.verbose_trace)
                .into_iter()
                .map(|(k, v)| (k.to_string(), Some(v.to_string()))),
        );
        env.extend(self.renderer_env.iter().cloned());
        Ok(env)
    }

    /// Runtime initialisation properties for DirectHost plans; empty for AppHost
    pub fn runtime_properties(&self) -> Result<Vec<(String, String)>, LaunchError> {
        if self.mode == LaunchMode::AppHost {
            return Ok(Vec::new());
        }
        let app_dir = self.app_directory.to_string_lossy().to_string();
        Ok(vec![
            (
                PROP_TRUSTED_ASSEMBLIES.to_string(),
                join_path_list(&self.trusted_assemblies)?,
            ),
            (
                PROP_NATIVE_SEARCH.to_string(),
                join_path_list(&self.native_search_paths)?,
            ),
            (PROP_APP_PATHS.to_string(), app_dir.clone()),
            (PROP_APP_BASE.to_string(), app_dir),
        ])
    }
}
