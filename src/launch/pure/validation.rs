//! Launch validation functions

use std::path::Path;

use crate::error::LaunchError;
use crate::plan::renderer_env;

/// The primary assembly must be an existing file
pub fn validate_assembly(path: &Path) -> Result<(), LaunchError> {
    if path.as_os_str().is_empty() || !path.is_file() {
        return Err(LaunchError::missing(path));
    }
    Ok(())
}

/// The patched directory must hold the assembly, or the plan would load
/// assemblies the patches never reached
pub fn validate_game_dir(assembly: &Path, game_dir: &Path) -> Result<(), LaunchError> {
    if assembly.starts_with(game_dir) {
        return Ok(());
    }
    Err(LaunchError::ParameterSet(format!(
        "{} is not inside game directory {}",
        assembly.display(),
        game_dir.display()
    )))
}

/// Renderer variables for the configured id, nothing when unset
pub fn validate_renderer(
    renderer: Option<&str>,
) -> Result<Vec<(String, Option<String>)>, LaunchError> {
    match renderer {
        None => Ok(Vec::new()),
        Some(id) if id.trim().is_empty() => Ok(Vec::new()),
        Some(id) => renderer_env(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_assembly_must_exist() {
        let tmp = TempDir::new().unwrap();
        let asm = tmp.path().join("Game.dll");
        assert!(matches!(
            validate_assembly(&asm),
            Err(LaunchError::MissingFile { .. })
        ));
        fs::write(&asm, b"mz").unwrap();
        assert!(validate_assembly(&asm).is_ok());
        assert!(validate_assembly(tmp.path()).is_err());
    }

    #[test]
    fn test_game_dir_must_contain_assembly() {
        let asm = Path::new("/games/Terraria/bin/Terraria.dll");
        assert!(validate_game_dir(asm, Path::new("/games/Terraria")).is_ok());
        assert!(validate_game_dir(asm, Path::new("/games/Terraria/bin")).is_ok());
        let err = validate_game_dir(asm, Path::new("/games/Celeste")).unwrap_err();
        assert_eq!(err.code(), -3);
    }

    #[test]
    fn test_renderer_optional() {
        assert!(validate_renderer(None).unwrap().is_empty());
        assert!(validate_renderer(Some("")).unwrap().is_empty());
        assert!(!validate_renderer(Some("zink")).unwrap().is_empty());
        assert!(validate_renderer(Some("bogus")).is_err());
    }
}
