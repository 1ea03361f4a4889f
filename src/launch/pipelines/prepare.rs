//! End-to-end launch preparation
//!
//! resolve runtime -> load catalog -> apply patches -> compose hooks -> build plan
//!
//! Anything that makes this launch impossible stops the sequence. Anything
//! confined to one patch is logged, recorded, and skipped.

use std::fs;
use std::io;
use std::path::Path;

use crate::config::LauncherConfig;
use crate::error::{LaunchError, Outcome, PatchIssue};
use crate::patch::{
    AssemblyPatchApplier, PatchBlobs, PatchCatalog, PatchDescriptor, PatchEnablement,
    StartupHookComposer, applies_to,
};
use crate::paths::normalize_path;
use crate::plan::{LaunchPlan, LaunchPlanBuilder};
use crate::runtime::{RuntimeInstallation, RuntimeInventory};

use super::super::pure::{validate_assembly, validate_game_dir, validate_renderer};
use super::super::types::{EntryPointInvoker, LaunchRequest, PreparedLaunch};

/// Prepare everything the native host needs to start `request`.
///
/// `Degraded` carries the ids of patches (or files) that were skipped; the
/// launch may still go ahead. Only `Fatal` means it must not.
pub fn prepare_launch(cfg: &LauncherConfig, request: &LaunchRequest) -> Outcome<PreparedLaunch> {
    match prepare(cfg, request) {
        Ok((prepared, issues)) => {
            for issue in &issues {
                tracing::warn!("Degraded launch: {}", issue);
            }
            Outcome::from_parts(prepared, issues.iter().map(PatchIssue::subject).collect())
        }
        Err(e) => {
            tracing::error!("Launch of {} aborted: {}", request.assembly_path.display(), e);
            Outcome::Fatal(e)
        }
    }
}

fn prepare(
    cfg: &LauncherConfig,
    request: &LaunchRequest,
) -> Result<(PreparedLaunch, Vec<PatchIssue>), LaunchError> {
    validate_assembly(&request.assembly_path)?;
    let renderer_env = validate_renderer(cfg.renderer.as_deref())?;
    let assembly = normalize_path(&request.assembly_path);
    let game_dir = request
        .game_dir()
        .ok_or_else(|| LaunchError::missing(&assembly))?;
    validate_game_dir(&assembly, &game_dir)?;

    let runtime = RuntimeInventory::new(cfg.shared_runtime_root()).resolve_preferred(&cfg.runtime)?;

    let catalog = PatchCatalog::new(cfg.patch_sources());
    let descriptors = descriptors_for_game(&catalog, &assembly);
    let mut issues = Vec::new();

    let base = load_base(cfg, &mut issues);
    let (custom, custom_issues) = catalog.load_custom_patches(&descriptors);
    issues.extend(custom_issues);
    let merged = PatchCatalog::merge(base, custom);

    let apply = AssemblyPatchApplier::new().apply(&game_dir, &merged)?;
    issues.extend(apply.issues.iter().cloned());

    let hooks = StartupHookComposer::new(&game_dir, catalog.sources().clone())
        .with_shared_dependency_source(cfg.shared_dependency_source())
        .compose(&descriptors);
    issues.extend(hooks.issues.iter().cloned());

    let plan = build_plan(cfg, &assembly, &game_dir, &runtime)?
        .with_startup_hooks(hooks.hook_paths.clone())
        .with_renderer_env(renderer_env);

    // Both contracts must be expressible before the host sees them
    plan.host_env()?;
    plan.runtime_properties()?;

    tracing::info!(
        "Prepared {:?} launch of {} on runtime {} with {} startup hooks",
        plan.mode,
        assembly.display(),
        runtime.full_version,
        plan.startup_hook_paths.len()
    );

    Ok((
        PreparedLaunch {
            runtime,
            plan,
            apply,
            hooks,
        },
        issues,
    ))
}

/// Manifest patches targeting this game, with the user's per-game choice
/// applied over each manifest default
fn descriptors_for_game(catalog: &PatchCatalog, assembly: &Path) -> Vec<PatchDescriptor> {
    let game_key = assembly.to_string_lossy().to_string();
    let enablement = PatchEnablement::load(&catalog.sources().external_dir);

    catalog
        .load_descriptors()
        .into_iter()
        .filter(|d| applies_to(d, &game_key))
        .map(|d| {
            let enabled = enablement.is_enabled(&game_key, &d);
            d.with_enabled(enabled)
        })
        .collect()
}

fn load_base(cfg: &LauncherConfig, issues: &mut Vec<PatchIssue>) -> PatchBlobs {
    let archive = cfg.base_patch_archive();
    match fs::read(&archive) {
        Ok(bytes) => PatchCatalog::load_base_patches(&bytes).unwrap_or_else(|issue| {
            issues.push(issue);
            PatchBlobs::new()
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("No base patch archive at {}", archive.display());
            PatchBlobs::new()
        }
        Err(e) => {
            tracing::warn!("Cannot read base patch archive {}: {}", archive.display(), e);
            issues.push(PatchIssue::SourceUnavailable {
                patch_id: crate::patch::BASE_ARCHIVE_ID.to_string(),
                file: archive.display().to_string(),
            });
            PatchBlobs::new()
        }
    }
}

/// The plan's app directory is always the directory that was patched
fn build_plan(
    cfg: &LauncherConfig,
    assembly: &Path,
    game_dir: &Path,
    runtime: &RuntimeInstallation,
) -> Result<LaunchPlan, LaunchError> {
    let builder = LaunchPlanBuilder::new().verbose_trace(cfg.verbose_trace);
    if cfg.direct_host {
        builder.build_direct_host(assembly, runtime, game_dir)
    } else {
        Ok(builder.build_app_host(assembly, runtime)?.with_app_directory(game_dir))
    }
}

/// Hand every composed entry point to `invoker`, in hook order. A failing
/// call is reported and the rest still run.
pub fn dispatch_entry_points(
    prepared: &PreparedLaunch,
    invoker: &mut dyn EntryPointInvoker,
) -> Vec<PatchIssue> {
    let mut issues = Vec::new();
    for call in &prepared.hooks.entry_points {
        tracing::debug!(
            "Invoking {}::{} from {}",
            call.type_name,
            call.method_name,
            call.assembly_path.display()
        );
        if let Err(message) = invoker.invoke(call) {
            tracing::warn!("Entry point of {} failed: {}", call.patch_id, message);
            issues.push(PatchIssue::HookUnresolved {
                patch_id: call.patch_id.clone(),
                message,
            });
        }
    }
    issues
}
