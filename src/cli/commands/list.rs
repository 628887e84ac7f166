use crate::cli::output::Output;
use crate::errors::{Result, StashError};
use crate::git::GitRepository;
use crate::stash::StashStore;
use std::env;

/// Non-interactive listing of the stash, numbered like the fallback menu.
pub async fn run(verbose: bool, json: bool) -> Result<()> {
    let current_dir = env::current_dir()
        .map_err(|e| StashError::config(format!("Could not get current directory: {e}")))?;
    let repo = GitRepository::open(&current_dir)?;
    let store = StashStore::new(repo.workdir());

    let entries = store.list();
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        Output::info("No stash entries.");
        return Ok(());
    }

    let created = if verbose {
        store.list_created_at()
    } else {
        Vec::new()
    };

    for entry in &entries {
        Output::numbered_item(entry.index + 1, &entry.raw);
        if verbose {
            if let Some(Some(epoch)) = created.get(entry.index) {
                if let Some(utc) = chrono::DateTime::from_timestamp(*epoch, 0) {
                    let local = utc.with_timezone(&chrono::Local);
                    Output::sub_item(format!("created {}", local.format("%Y-%m-%d %H:%M")));
                }
            }
        }
    }

    Ok(())
}
