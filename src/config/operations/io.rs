use crate::config::types::LauncherConfig;

use std::error::Error;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub fn load_cfg(path: &Path) -> LauncherConfig {
    if let Ok(file) = File::open(path) {
        match serde_json::from_reader::<_, LauncherConfig>(BufReader::new(file)) {
            Ok(mut config) => {
                config.migrate();
                return config;
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
            }
        }
    }

    // Return default settings if file doesn't exist or has error
    LauncherConfig::default()
}

pub fn save_cfg(path: &Path, config: &LauncherConfig) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    Ok(())
}
