pub mod preference;

pub use preference::DefaultAction;

use crate::errors::{Result, StashError};
use std::fs;
use std::path::PathBuf;

/// Get the per-user configuration directory (~/.config/sta on Linux)
pub fn get_config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| StashError::config("Could not find user config directory"))?;
    Ok(base.join("sta"))
}

/// Ensure the configuration directory exists
pub fn ensure_config_dir(dir: &std::path::Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|e| StashError::config(format!("Failed to create config directory: {e}")))?;
    }
    Ok(())
}

/// Path of the settings file holding the default-action preference
pub fn settings_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("settings"))
}
