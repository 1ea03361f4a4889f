//! Runtime version ordering
//!
//! Version directories are compared numerically per segment
//! (major.minor.patch), never as plain strings, so "10.0.0" sorts above
//! "9.0.8". Ties on the numeric triple fall back to semver precedence, which
//! puts pre-releases below the final release.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

use super::super::types::RuntimeInstallation;

static VERSION_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+.*$").expect("version pattern is valid"));

/// True for directory names shaped like `major.minor.patch[suffix]`
pub fn is_version_dir_name(name: &str) -> bool {
    VERSION_DIR.is_match(name)
}

/// Major component of a version string ("8.0.11" -> 8)
pub fn parse_major(version: &str) -> Option<u32> {
    let first = version.split('.').next()?;
    let digits: String = first.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Leading digits of the first three segments, missing segments as 0
fn numeric_triple(version: &str) -> [u64; 3] {
    let mut triple = [0u64; 3];
    for (slot, segment) in triple.iter_mut().zip(version.split('.')) {
        let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
        *slot = digits.parse().unwrap_or(0);
    }
    triple
}

pub fn compare_versions(a: &str, b: &str) -> Ordering {
    numeric_triple(a)
        .cmp(&numeric_triple(b))
        .then_with(|| match (semver::Version::parse(a), semver::Version::parse(b)) {
            (Ok(va), Ok(vb)) => va.cmp(&vb),
            _ => a.cmp(b),
        })
}

/// Highest installation, restricted to one major line when `major` is set
pub fn pick_preferred(
    installed: &[RuntimeInstallation],
    major: Option<u32>,
) -> Option<&RuntimeInstallation> {
    installed
        .iter()
        .filter(|inst| major.is_none_or(|m| inst.major_version == m))
        .max_by(|a, b| compare_versions(&a.full_version, &b.full_version))
}
