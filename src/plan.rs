//! Launch plan module
//!
//! Turns a target assembly and a resolved runtime into the parameters a
//! native host consumes: mode, runtime root, trusted assemblies, native
//! search paths, startup hooks and environment.
//!
//! ## Module Structure
//! - `types.rs`: LaunchMode, LaunchPlan and its environment contract
//! - `pure/`: TPA merging, path-list joining, renderer variables
//! - `operations/`: existence checks and directory listings

mod operations;
mod pure;
mod types;

use std::path::Path;

use crate::error::LaunchError;
use crate::runtime::RuntimeInstallation;

pub(crate) use operations::is_assembly;
pub use pure::{KNOWN_RENDERERS, join_path_list, renderer_env};
pub use types::{LaunchMode, LaunchPlan};

use operations::{list_assemblies, require_dir, require_file};
use pure::merge_trusted_assemblies;

/// Builds [`LaunchPlan`]s. Only reads the filesystem.
#[derive(Debug, Clone)]
pub struct LaunchPlanBuilder {
    verbose_trace: bool,
    pin_version: bool,
}

impl Default for LaunchPlanBuilder {
    fn default() -> Self {
        Self {
            verbose_trace: false,
            pin_version: true,
        }
    }
}

impl LaunchPlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Passed through to the plan for the host to interpret
    pub fn verbose_trace(mut self, enabled: bool) -> Self {
        self.verbose_trace = enabled;
        self
    }

    /// Hand the resolved version to an AppHost plan explicitly instead of
    /// letting the host roll forward on its own
    pub fn pin_version(mut self, enabled: bool) -> Self {
        self.pin_version = enabled;
        self
    }

    pub fn build_app_host(
        &self,
        assembly_path: &Path,
        runtime: &RuntimeInstallation,
    ) -> Result<LaunchPlan, LaunchError> {
        require_file(assembly_path)?;
        require_dir(&runtime.root_path)?;

        let app_directory = assembly_path
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| LaunchError::missing(assembly_path))?;

        tracing::debug!(
            "AppHost plan for {} on runtime {}",
            assembly_path.display(),
            runtime.full_version
        );

        Ok(LaunchPlan {
            mode: LaunchMode::AppHost,
            assembly_path: assembly_path.to_path_buf(),
            runtime_root: runtime.root_path.clone(),
            explicit_version: self.pin_version.then(|| runtime.full_version.clone()),
            app_directory,
            trusted_assemblies: Vec::new(),
            native_search_paths: Vec::new(),
            startup_hook_paths: Vec::new(),
            verbose_trace: self.verbose_trace,
            renderer_env: Vec::new(),
        })
    }

    pub fn build_direct_host(
        &self,
        assembly_path: &Path,
        runtime: &RuntimeInstallation,
        app_dir: &Path,
    ) -> Result<LaunchPlan, LaunchError> {
        require_file(assembly_path)?;
        require_dir(&runtime.root_path)?;
        require_dir(app_dir)?;

        let framework = list_assemblies(&runtime.root_path)?;
        let app = list_assemblies(app_dir)?;
        let trusted_assemblies = merge_trusted_assemblies(&framework, &app);
        let native_search_paths = vec![runtime.root_path.clone(), app_dir.to_path_buf()];

        // Fail now rather than in the host if a list cannot be delimited
        join_path_list(&trusted_assemblies)?;
        join_path_list(&native_search_paths)?;

        tracing::debug!(
            "DirectHost plan for {}: {} framework + {} app assemblies -> {} trusted",
            assembly_path.display(),
            framework.len(),
            app.len(),
            trusted_assemblies.len()
        );

        Ok(LaunchPlan {
            mode: LaunchMode::DirectHost,
            assembly_path: assembly_path.to_path_buf(),
            runtime_root: runtime.root_path.clone(),
            explicit_version: None,
            app_directory: app_dir.to_path_buf(),
            trusted_assemblies,
            native_search_paths,
            startup_hook_paths: Vec::new(),
            verbose_trace: self.verbose_trace,
            renderer_env: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::shared_runtime_root;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        dotnet: PathBuf,
        runtime: RuntimeInstallation,
        game: PathBuf,
        assembly: PathBuf,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().unwrap();
        let dotnet = tmp.path().join("dotnet");
        let root = shared_runtime_root(&dotnet).join("8.0.11");
        let game = tmp.path().join("game");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&game).unwrap();

        for name in ["System.Runtime.dll", "FNA.dll", "System.Private.CoreLib.dll"] {
            fs::write(root.join(name), b"framework").unwrap();
        }
        fs::write(root.join("libcoreclr.so"), b"native").unwrap();
        for name in ["FNA.dll", "Terraria.dll"] {
            fs::write(game.join(name), b"app").unwrap();
        }

        Fixture {
            runtime: RuntimeInstallation {
                major_version: 8,
                full_version: "8.0.11".to_string(),
                root_path: root,
            },
            assembly: game.join("Terraria.dll"),
            dotnet,
            game,
            _tmp: tmp,
        }
    }

    #[test]
    fn test_app_host_plan() {
        let f = fixture();
        let plan = LaunchPlanBuilder::new()
            .verbose_trace(true)
            .build_app_host(&f.assembly, &f.runtime)
            .unwrap();

        assert_eq!(plan.mode, LaunchMode::AppHost);
        assert_eq!(plan.explicit_version.as_deref(), Some("8.0.11"));
        assert_eq!(plan.app_directory, f.game);
        assert!(plan.trusted_assemblies.is_empty());
        assert!(plan.native_search_paths.is_empty());
        assert!(plan.verbose_trace);
        assert!(plan.runtime_properties().unwrap().is_empty());
    }

    #[test]
    fn test_app_host_without_pin() {
        let f = fixture();
        let plan = LaunchPlanBuilder::new()
            .pin_version(false)
            .build_app_host(&f.assembly, &f.runtime)
            .unwrap();
        assert!(plan.explicit_version.is_none());
    }

    #[test]
    fn test_missing_assembly_is_named() {
        let f = fixture();
        let missing = f.game.join("Missing.dll");
        let err = LaunchPlanBuilder::new()
            .build_app_host(&missing, &f.runtime)
            .unwrap_err();
        assert!(matches!(&err, LaunchError::MissingFile { path } if *path == missing));
        assert_eq!(err.code(), -1);
    }

    #[test]
    fn test_missing_runtime_root_is_named() {
        let mut f = fixture();
        f.runtime.root_path = f.dotnet.join("gone");
        let err = LaunchPlanBuilder::new()
            .build_direct_host(&f.assembly, &f.runtime, &f.game)
            .unwrap_err();
        assert!(matches!(err, LaunchError::MissingFile { path } if path.ends_with("gone")));
    }

    #[test]
    fn test_direct_host_app_copy_shadows_framework() {
        let f = fixture();
        let plan = LaunchPlanBuilder::new()
            .build_direct_host(&f.assembly, &f.runtime, &f.game)
            .unwrap();

        let fna: Vec<&PathBuf> = plan
            .trusted_assemblies
            .iter()
            .filter(|p| p.ends_with("FNA.dll"))
            .collect();
        assert_eq!(fna, vec![&f.game.join("FNA.dll")]);
        assert_eq!(plan.trusted_assemblies.len(), 4);
        assert!(!plan.trusted_assemblies.iter().any(|p| p.ends_with("libcoreclr.so")));
        assert_eq!(plan.native_search_paths, vec![f.runtime.root_path.clone(), f.game.clone()]);
        assert!(plan.explicit_version.is_none());
    }

    #[test]
    fn test_host_env_contract() {
        let f = fixture();
        let plan = LaunchPlanBuilder::new()
            .verbose_trace(true)
            .build_direct_host(&f.assembly, &f.runtime, &f.game)
            .unwrap()
            .with_startup_hooks(vec![f.game.join("A.dll"), f.game.join("B.dll")])
            .with_renderer_env(vec![("LIBGL_EGL".to_string(), None)]);

        let env = plan.host_env().unwrap();
        let get = |key: &str| env.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone());

        assert_eq!(get("DOTNET_ROOT"), Some(Some(f.dotnet.to_string_lossy().to_string())));
        let hooks = get("DOTNET_STARTUP_HOOKS").unwrap().unwrap();
        assert!(hooks.find("A.dll").unwrap() < hooks.find("B.dll").unwrap());
        assert_eq!(get("COREHOST_TRACE"), Some(Some("1".to_string())));
        assert_eq!(get("LIBGL_EGL"), Some(None));

        let props = plan.runtime_properties().unwrap();
        assert_eq!(props.len(), 4);
        assert_eq!(props[0].0, "TRUSTED_PLATFORM_ASSEMBLIES");
    }

    #[test]
    fn test_no_hooks_omits_hook_variable() {
        let f = fixture();
        let plan = LaunchPlanBuilder::new()
            .build_app_host(&f.assembly, &f.runtime)
            .unwrap();
        let env = plan.host_env().unwrap();
        assert!(!env.iter().any(|(k, _)| k == "DOTNET_STARTUP_HOOKS"));
        assert!(!env.iter().any(|(k, _)| k == "COREHOST_TRACE"));
    }
}
