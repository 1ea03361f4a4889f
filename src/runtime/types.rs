//! Runtime type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One installed shared runtime version, as found on disk at scan time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeInstallation {
    pub major_version: u32,
    /// Directory name, e.g. "8.0.11"
    pub full_version: String,
    pub root_path: PathBuf,
}

/// Which runtime a launch should use.
///
/// Persisted by the settings layer; resolution only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimePolicy {
    /// Exact version directory to use when it exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_version: Option<String>,
    /// Newest version of this major line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_major: Option<u32>,
}

impl RuntimePolicy {
    pub fn latest() -> Self {
        Self::default()
    }

    pub fn pinned(version: &str) -> Self {
        Self {
            pinned_version: Some(version.to_string()),
            preferred_major: None,
        }
    }

    pub fn major(major: u32) -> Self {
        Self {
            pinned_version: None,
            preferred_major: Some(major),
        }
    }

    /// Human-readable summary for logs and errors
    pub fn describe(&self) -> String {
        match (&self.pinned_version, self.preferred_major) {
            (Some(pin), Some(major)) => format!("pinned {} (major {})", pin, major),
            (Some(pin), None) => format!("pinned {}", pin),
            (None, Some(major)) => format!("major {}", major),
            (None, None) => "latest".to_string(),
        }
    }
}
