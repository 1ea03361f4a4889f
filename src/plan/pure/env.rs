//! Host environment string building (no I/O)

use std::env;
use std::path::PathBuf;

use crate::error::LaunchError;

/// Join paths with the platform path-list delimiter (':' on Unix).
///
/// Fails when a path contains the delimiter itself, since the host could
/// never split it back apart.
pub fn join_path_list(paths: &[PathBuf]) -> Result<String, LaunchError> {
    let joined = env::join_paths(paths)
        .map_err(|e| LaunchError::ParameterSet(format!("cannot join path list: {}", e)))?;
    Ok(joined.to_string_lossy().to_string())
}

/// Hosting-trace variables; nothing when tracing is off
pub fn trace_env(verbose: bool) -> Vec<(&'static str, &'static str)> {
    if !verbose {
        return Vec::new();
    }
    vec![("COREHOST_TRACE", "1"), ("COREHOST_TRACE_VERBOSITY", "4")]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_join_keeps_order() {
        let paths = vec![PathBuf::from("/b/Hook.dll"), PathBuf::from("/a/Other.dll")];
        assert_eq!(join_path_list(&paths).unwrap(), "/b/Hook.dll:/a/Other.dll");
    }

    #[test]
    #[cfg(unix)]
    fn test_join_rejects_embedded_delimiter() {
        let paths = vec![PathBuf::from("/games/a:b/Game.dll")];
        assert!(matches!(
            join_path_list(&paths),
            Err(LaunchError::ParameterSet(_))
        ));
    }

    #[test]
    fn test_trace_off_is_empty() {
        assert!(trace_env(false).is_empty());
        assert_eq!(trace_env(true).len(), 2);
    }
}
