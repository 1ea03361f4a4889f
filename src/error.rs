//! Error taxonomy for launch preparation
//!
//! [`LaunchError`] makes a specific launch impossible and stops the sequence.
//! [`PatchIssue`] is confined to a single patch or file; the pass that hits one
//! logs it and keeps going.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result code handed to the caller when a launch may proceed
pub const RESULT_OK: i32 = 0;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Required file not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("No installed runtime satisfies {0}")]
    RuntimeNotFound(String),

    #[error("Failed to set launch parameters: {0}")]
    ParameterSet(String),

    #[error("Game directory is not accessible: {}", .path.display())]
    GameDirInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl LaunchError {
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        LaunchError::MissingFile { path: path.into() }
    }

    pub fn inaccessible(path: &Path, source: io::Error) -> Self {
        LaunchError::GameDirInaccessible {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable negative code per failure class. Any negative value means
    /// "do not proceed to process launch".
    pub fn code(&self) -> i32 {
        match self {
            LaunchError::MissingFile { .. } => -1,
            LaunchError::RuntimeNotFound(_) => -2,
            LaunchError::ParameterSet(_) => -3,
            LaunchError::GameDirInaccessible { .. } => -4,
            LaunchError::Config(_) => -5,
            LaunchError::Io(_) => -6,
        }
    }
}

/// A problem confined to one patch; never stops a launch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchIssue {
    #[error("Patch '{patch_id}' has no readable assembly '{file}'")]
    SourceUnavailable { patch_id: String, file: String },

    #[error("Failed to patch {}: {message}", .file.display())]
    ApplyIo { file: PathBuf, message: String },

    #[error("Startup hook for patch '{patch_id}' could not be resolved: {message}")]
    HookUnresolved { patch_id: String, message: String },
}

impl PatchIssue {
    /// The patch id, or the file name for per-file failures
    pub fn subject(&self) -> String {
        match self {
            PatchIssue::SourceUnavailable { patch_id, .. }
            | PatchIssue::HookUnresolved { patch_id, .. } => patch_id.clone(),
            PatchIssue::ApplyIo { file, .. } => file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| file.display().to_string()),
        }
    }
}

/// Result of a launch-level pass.
///
/// `Degraded` still carries a usable value: the launch goes ahead with fewer
/// patches than requested. Only `Fatal` stops it.
#[derive(Debug)]
pub enum Outcome<T> {
    Complete(T),
    Degraded { value: T, skipped: Vec<String> },
    Fatal(LaunchError),
}

impl<T> Outcome<T> {
    pub fn from_parts(value: T, mut skipped: Vec<String>) -> Self {
        if skipped.is_empty() {
            return Outcome::Complete(value);
        }
        skipped.sort();
        skipped.dedup();
        Outcome::Degraded { value, skipped }
    }

    pub fn code(&self) -> i32 {
        match self {
            Outcome::Fatal(e) => e.code(),
            _ => RESULT_OK,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Outcome::Fatal(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Complete(value) | Outcome::Degraded { value, .. } => Some(value),
            Outcome::Fatal(_) => None,
        }
    }

    pub fn skipped(&self) -> &[String] {
        match self {
            Outcome::Degraded { skipped, .. } => skipped,
            _ => &[],
        }
    }

    pub fn into_result(self) -> Result<T, LaunchError> {
        match self {
            Outcome::Complete(value) | Outcome::Degraded { value, .. } => Ok(value),
            Outcome::Fatal(e) => Err(e),
        }
    }
}

impl<T> From<LaunchError> for Outcome<T> {
    fn from(e: LaunchError) -> Self {
        Outcome::Fatal(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct_and_negative() {
        let errors = [
            LaunchError::missing("/game/Game.dll"),
            LaunchError::RuntimeNotFound("latest".to_string()),
            LaunchError::ParameterSet("bad".to_string()),
            LaunchError::inaccessible(Path::new("/game"), io::Error::other("denied")),
            LaunchError::Config("bad".to_string()),
            LaunchError::Io(io::Error::other("disk")),
        ];
        let mut codes: Vec<i32> = errors.iter().map(|e| e.code()).collect();
        assert!(codes.iter().all(|c| *c < 0));
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_degraded_is_not_a_failure() {
        let outcome = Outcome::from_parts(7, vec!["b".to_string(), "a".to_string(), "b".to_string()]);
        assert_eq!(outcome.code(), RESULT_OK);
        assert_eq!(outcome.skipped(), ["a".to_string(), "b".to_string()]);
        assert_eq!(outcome.into_result().unwrap(), 7);
    }

    #[test]
    fn test_empty_skip_list_is_complete() {
        let outcome = Outcome::from_parts("plan", Vec::new());
        assert!(matches!(outcome, Outcome::Complete("plan")));
    }

    #[test]
    fn test_missing_file_message_names_path() {
        let e = LaunchError::missing("/game/Terraria.dll");
        assert!(e.to_string().contains("/game/Terraria.dll"));
    }

    #[test]
    fn test_apply_issue_subject_is_file_name() {
        let issue = PatchIssue::ApplyIo {
            file: PathBuf::from("/game/lib/FNA.dll"),
            message: "read-only".to_string(),
        };
        assert_eq!(issue.subject(), "FNA.dll");
    }
}
