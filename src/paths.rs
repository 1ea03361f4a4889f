use std::env;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(env::temp_dir)
});

pub static PATH_DATA: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Ok(xdg_data_home) = env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home).join("dotlaunch");
    }
    PATH_HOME.join(".local/share/dotlaunch")
});

/// Read-only resources shipped next to the launcher (bundled patches, base archive)
pub static PATH_RES: LazyLock<PathBuf> = LazyLock::new(|| {
    let localinstall = PathBuf::from("/usr/share/dotlaunch");
    if localinstall.exists() {
        return localinstall;
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("res")))
        .unwrap_or_else(|| PATH_DATA.join("res"))
});

pub static PATH_DOTNET: LazyLock<PathBuf> = LazyLock::new(|| PATH_DATA.join("dotnet"));

/// User-installed patches; writable
pub static PATH_EXTERNAL_PATCHES: LazyLock<PathBuf> = LazyLock::new(|| PATH_DATA.join("patches"));

pub static PATH_BUNDLED_PATCHES: LazyLock<PathBuf> = LazyLock::new(|| PATH_RES.join("patches"));

pub static PATH_BASE_ARCHIVE: LazyLock<PathBuf> = LazyLock::new(|| PATH_RES.join("MonoMod.zip"));

pub const SETTINGS_FILE: &str = "settings.json";

/// Name of the framework directory every shared runtime version lives under
pub const SHARED_FRAMEWORK: &str = "Microsoft.NETCore.App";

/// `<dotnet>/shared/Microsoft.NETCore.App`, one subdirectory per installed version
pub fn shared_runtime_root(dotnet_root: &Path) -> PathBuf {
    dotnet_root.join("shared").join(SHARED_FRAMEWORK)
}

/// Inverse of [`shared_runtime_root`] for a concrete version directory
pub fn dotnet_root_of(runtime_root: &Path) -> Option<&Path> {
    runtime_root.ancestors().nth(3)
}

/// Absolute form of `path` with `.` and `..` folded away lexically.
/// Symlinks are not resolved and the path need not exist.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}
