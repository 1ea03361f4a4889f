//! Operations module (filesystem scans)

mod scan;

pub use scan::{installation_at, scan_installations};
