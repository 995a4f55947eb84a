use crate::error::ShellResult;
use crate::models::ShellSettings;
use std::fs;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "shell.json";

pub fn read(path: &Path) -> ShellResult<Option<ShellSettings>> {
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(path)?;
    let settings: ShellSettings = serde_json::from_slice(&bytes)?;
    Ok(Some(settings.normalized()))
}

/// Settings from `path`, or defaults when the file is absent or unusable.
pub fn load_or_default(path: &Path) -> ShellSettings {
    match read(path) {
        Ok(Some(settings)) => settings,
        Ok(None) => ShellSettings::default(),
        Err(e) => {
            log::warn!("using default shell settings, {} unusable: {}", path.display(), e);
            ShellSettings::default()
        }
    }
}
