use crate::errors::{Result, StashError};
use dialoguer::{theme::ColorfulTheme, Select};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// The action bound to Enter in the browser, persisted as a single
/// `default_action=<value>` line in the settings file.
///
/// `rename` was accepted as a value by older releases; it is deprecated
/// and migrated away on load (file removed, operator re-prompted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultAction {
    Apply,
    View,
    Pop,
}

impl DefaultAction {
    pub const ALL: [DefaultAction; 3] = [
        DefaultAction::Apply,
        DefaultAction::View,
        DefaultAction::Pop,
    ];
}

impl fmt::Display for DefaultAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefaultAction::Apply => "apply",
            DefaultAction::View => "view",
            DefaultAction::Pop => "pop",
        };
        write!(f, "{name}")
    }
}

impl FromStr for DefaultAction {
    type Err = StashError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "apply" => Ok(DefaultAction::Apply),
            "view" => Ok(DefaultAction::View),
            "pop" => Ok(DefaultAction::Pop),
            "rename" => Err(StashError::validation(
                "'rename' is no longer a valid default action",
            )),
            other => Err(StashError::validation(format!(
                "unknown default action '{other}' (valid: apply, view, pop)"
            ))),
        }
    }
}

/// Load the persisted preference. A missing file yields `None`; a file
/// holding the deprecated `rename` value or anything unparsable is
/// deleted and also yields `None`, which triggers a re-prompt.
pub fn load(path: &Path) -> Option<DefaultAction> {
    let content = fs::read_to_string(path).ok()?;
    let value = content
        .lines()
        .find_map(|line| line.trim().strip_prefix("default_action="))?;

    match value.trim().parse::<DefaultAction>() {
        Ok(action) => Some(action),
        Err(_) => {
            warn!("removing settings file with stale default action '{value}'");
            if let Err(e) = fs::remove_file(path) {
                warn!("could not remove stale settings file: {e}");
            }
            None
        }
    }
}

/// Persist the preference, creating the config directory if needed.
pub fn save(path: &Path, action: DefaultAction) -> Result<()> {
    if let Some(parent) = path.parent() {
        crate::config::ensure_config_dir(parent)?;
    }
    fs::write(path, format!("default_action={action}\n"))
        .map_err(|e| StashError::config(format!("Failed to write settings file: {e}")))?;
    debug!("saved default action '{action}'");
    Ok(())
}

/// Remove the persisted preference if present.
pub fn unset(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| StashError::config(format!("Failed to remove settings file: {e}")))?;
    }
    Ok(())
}

/// First-run prompt: ask which action Enter should run, persist the
/// answer, return it. Blocking; callers inside the TUI suspend the
/// terminal around this.
pub fn prompt_and_save(path: &Path) -> Result<DefaultAction> {
    let labels: Vec<String> = DefaultAction::ALL.iter().map(|a| a.to_string()).collect();
    let picked = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which action should Enter run on the highlighted stash?")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| StashError::config(format!("Input error: {e}")))?;

    let action = DefaultAction::ALL[picked];
    save(path, action)?;
    Ok(action)
}
