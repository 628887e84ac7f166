use crate::errors::{Result, StashError};
use crate::git::GitRepository;
use crate::stash::{StashEntry, StashStore};
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// The three operations that require an affirmative confirmation before
/// they run: apply touches the working tree, pop and drop remove entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestructiveOp {
    Apply,
    Pop,
    Drop,
}

impl DestructiveOp {
    pub fn verb(&self) -> &'static str {
        match self {
            DestructiveOp::Apply => "Apply",
            DestructiveOp::Pop => "Pop",
            DestructiveOp::Drop => "Drop",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Success,
    Failure,
    Cancelled,
}

/// Uniform result of one executed action: what happened, the text to
/// surface to the operator, and whether the stash list must be
/// re-fetched before the next render.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    pub kind: OutcomeKind,
    pub message: String,
    pub mutated: bool,
}

impl ActionOutcome {
    fn success(message: String, mutated: bool) -> Self {
        Self {
            kind: OutcomeKind::Success,
            message,
            mutated,
        }
    }

    fn failure(message: String) -> Self {
        Self {
            kind: OutcomeKind::Failure,
            message,
            mutated: false,
        }
    }

    fn cancelled() -> Self {
        Self {
            kind: OutcomeKind::Cancelled,
            message: String::new(),
            mutated: false,
        }
    }
}

/// Executes stash actions against the store with uniform outcome
/// reporting. Backend failures are folded into the outcome, never
/// propagated: browsing continues after any failed operation.
pub struct ActionExecutor<'a> {
    store: &'a StashStore,
    repo: &'a GitRepository,
}

impl<'a> ActionExecutor<'a> {
    pub fn new(store: &'a StashStore, repo: &'a GitRepository) -> Self {
        Self { store, repo }
    }

    /// Run an already-confirmed destructive operation.
    pub fn execute(&self, op: DestructiveOp, entry: &StashEntry) -> ActionOutcome {
        match op {
            DestructiveOp::Apply => self.apply(entry),
            DestructiveOp::Pop => self.pop(entry),
            DestructiveOp::Drop => self.drop(entry),
        }
    }

    pub fn apply(&self, entry: &StashEntry) -> ActionOutcome {
        match self.store.apply(&entry.reference) {
            Ok(()) => ActionOutcome::success(format!("Applied {}", entry.reference), true),
            Err(e) => ActionOutcome::failure(format!("Failed to apply {}: {e}", entry.reference)),
        }
    }

    pub fn pop(&self, entry: &StashEntry) -> ActionOutcome {
        match self.store.pop(&entry.reference) {
            Ok(()) => ActionOutcome::success(format!("Popped {}", entry.reference), true),
            Err(e) => ActionOutcome::failure(format!("Failed to pop {}: {e}", entry.reference)),
        }
    }

    pub fn drop(&self, entry: &StashEntry) -> ActionOutcome {
        match self.store.drop(&entry.reference) {
            Ok(()) => ActionOutcome::success(format!("Dropped {}", entry.reference), true),
            Err(e) => ActionOutcome::failure(format!("Failed to drop {}: {e}", entry.reference)),
        }
    }

    /// Rename an entry. Git has no native rename, so this is store + drop.
    ///
    /// Ordering is store-first: the new entry is created before the old
    /// one is removed, so a failing drop leaves the operator with both
    /// entries instead of losing the stash.
    pub fn rename(&self, entry: &StashEntry, new_message: &str) -> ActionOutcome {
        let message = new_message.trim();
        if message.is_empty() {
            return ActionOutcome::cancelled();
        }

        let commit_id = match self.repo.resolve_stash_commit(&entry.reference) {
            Ok(id) => id,
            Err(e) => {
                return ActionOutcome::failure(format!(
                    "Failed to resolve {}: {e}",
                    entry.reference
                ))
            }
        };

        if let Err(e) = self.store.store(message, &commit_id) {
            return ActionOutcome::failure(format!(
                "Failed to store renamed entry for {}: {e}",
                entry.reference
            ));
        }

        match self.store.drop(&entry.reference) {
            Ok(()) => ActionOutcome::success(
                format!("Renamed {} to '{message}'", entry.reference),
                true,
            ),
            // The new entry exists and the old one is still there; report
            // it rather than retrying so the operator loses nothing.
            Err(e) => ActionOutcome {
                kind: OutcomeKind::Failure,
                message: format!(
                    "Stored '{message}' but could not drop {}: {e} (both entries kept)",
                    entry.reference
                ),
                mutated: true,
            },
        }
    }

    /// Show the entry's diff in a pager. No confirmation, no stash-list
    /// side effect. Callers owning a TUI suspend the terminal first.
    pub fn view(&self, entry: &StashEntry) -> ActionOutcome {
        let diff = match self.store.show_diff(&entry.reference) {
            Ok(diff) => diff,
            Err(e) => {
                return ActionOutcome::failure(format!(
                    "Failed to show {}: {e}",
                    entry.reference
                ))
            }
        };

        match page_diff(&diff) {
            Ok(()) => ActionOutcome::success(String::new(), false),
            Err(e) => ActionOutcome::failure(format!("Pager failed: {e}")),
        }
    }

    /// Blocking yes/no gate for destructive operations. Empty input
    /// answers "no".
    pub fn confirm(&self, op: DestructiveOp, entry: &StashEntry) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} {}?", op.verb(), entry.reference))
            .default(false)
            .interact()
            .map_err(|e| StashError::config(format!("Input error: {e}")))
    }
}

/// Page a unified diff: prefer `delta`, then `$PAGER`, then `less -R`,
/// finally print it raw when no pager can be spawned.
fn page_diff(diff: &str) -> std::io::Result<()> {
    let mut delta = Command::new("delta");
    delta.arg("--paging=always");
    if pipe_through(&mut delta, diff)? {
        return Ok(());
    }

    if let Ok(pager) = std::env::var("PAGER") {
        let mut parts = pager.split_whitespace();
        if let Some(program) = parts.next() {
            let mut cmd = Command::new(program);
            cmd.args(parts);
            if pipe_through(&mut cmd, diff)? {
                return Ok(());
            }
        }
    }

    let mut less = Command::new("less");
    less.arg("-R");
    if pipe_through(&mut less, diff)? {
        return Ok(());
    }

    print!("{diff}");
    std::io::stdout().flush()
}

/// Pipe `diff` through a pager command. Returns Ok(false) when the
/// program does not exist so the caller can try the next candidate.
fn pipe_through(cmd: &mut Command, diff: &str) -> std::io::Result<bool> {
    let mut child = match cmd.stdin(Stdio::piped()).spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };

    if let Some(mut stdin) = child.stdin.take() {
        match stdin.write_all(diff.as_bytes()) {
            Ok(()) => {}
            // The operator quit the pager before the diff finished.
            Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                debug!("pager exited early: {e}");
            }
            Err(e) => return Err(e),
        }
    }

    child.wait()?;
    Ok(true)
}
