use crate::errors::{Result, StashError};
use crate::git::GitRepository;
use crate::stash::{ActionExecutor, FallbackController, StashStore};
use crate::tui::InteractiveController;
use std::env;
use tracing::debug;

/// Entry point of the browser: open the repository (fatal if absent),
/// then hand control to the full-screen controller or, when no usable
/// interactive terminal is available, to the numbered-menu fallback.
pub async fn run(plain: bool) -> Result<()> {
    let current_dir = env::current_dir()
        .map_err(|e| StashError::config(format!("Could not get current directory: {e}")))?;

    let repo = GitRepository::open(&current_dir)?;
    let store = StashStore::new(repo.workdir());
    let settings_path = crate::config::settings_path()?;

    if interactive_supported(plain) {
        InteractiveController::new(&store, &repo, settings_path).run()
    } else {
        debug!("interactive terminal unavailable, using numbered menu");
        let executor = ActionExecutor::new(&store, &repo);
        FallbackController::new(&store, executor).run()
    }
}

/// Whether the full-screen browser can run: an attended terminal that is
/// not `dumb`, and the operator did not force the plain menu.
fn interactive_supported(plain: bool) -> bool {
    if plain {
        return false;
    }
    if env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    console::user_attended()
}
