use crate::errors::{Result, StashError};
use crate::stash::StashEntry;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// All stash semantics live in the external `git` binary; this wrapper
/// runs one subprocess per operation and classifies failures from the
/// captured stderr. Exit code 0 = success, non-zero = failure.
pub struct StashStore {
    workdir: PathBuf,
}

impl StashStore {
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<std::process::Output> {
        debug!("running git {}", args.join(" "));
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.workdir)
            .args(args)
            .output()
            .map_err(|e| StashError::backend(format!("could not run git: {e}")))?;
        Ok(output)
    }

    /// Run a mutating git command, classifying a non-zero exit into the
    /// error taxonomy. `reference` names the entry for NotFound reporting.
    fn git_checked(&self, args: &[&str], reference: &str) -> Result<()> {
        let output = self.git(args)?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(classify_failure(&stderr, reference))
    }

    /// List stash entries, newest first.
    ///
    /// Never errors: a repository without a stash store lists as empty,
    /// and an unexpected git failure is logged and reported as empty.
    pub fn list(&self) -> Vec<StashEntry> {
        let output = match self.git(&["stash", "list"]) {
            Ok(output) => output,
            Err(e) => {
                warn!("git stash list failed: {e}");
                return Vec::new();
            }
        };
        if !output.status.success() {
            warn!(
                "git stash list exited non-zero: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Vec::new();
        }

        parse_listing(&String::from_utf8_lossy(&output.stdout))
    }

    /// Creation times of the listed entries (reflog committer epoch),
    /// parallel to `list()`. Used only for verbose listings.
    pub fn list_created_at(&self) -> Vec<Option<i64>> {
        let output = match self.git(&["stash", "list", "--format=%ct"]) {
            Ok(output) if output.status.success() => output,
            _ => return Vec::new(),
        };
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim().parse::<i64>().ok())
            .collect()
    }

    /// Restore the entry's changes into the working tree, keeping the entry.
    pub fn apply(&self, reference: &str) -> Result<()> {
        self.git_checked(&["stash", "apply", reference], reference)
    }

    /// Apply then drop, as one atomic backend operation.
    pub fn pop(&self, reference: &str) -> Result<()> {
        self.git_checked(&["stash", "pop", reference], reference)
    }

    /// Remove the entry without applying it.
    pub fn drop(&self, reference: &str) -> Result<()> {
        self.git_checked(&["stash", "drop", reference], reference)
    }

    /// Create a new entry at the top of the list from an existing stash
    /// commit, labeled `message`. No new snapshot is computed.
    pub fn store(&self, message: &str, commit_id: &str) -> Result<()> {
        self.git_checked(&["stash", "store", "-m", message, commit_id], commit_id)
    }

    /// Unified diff of the entry against its parent.
    pub fn show_diff(&self, reference: &str) -> Result<String> {
        let output = self.git(&["stash", "show", "-p", reference])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(classify_failure(&stderr, reference));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Parse raw `git stash list` output into entries. An entry's index is
/// its position among the parsed entries, so it always matches the
/// 1-based numbering of the listing even if a line had to be skipped.
fn parse_listing(stdout: &str) -> Vec<StashEntry> {
    let mut entries = Vec::new();
    for line in stdout.lines() {
        match StashEntry::parse(entries.len(), line) {
            Some(entry) => entries.push(entry),
            None => {
                if !line.trim().is_empty() {
                    warn!("skipping unparsable stash line: {line}");
                }
            }
        }
    }
    entries
}

/// Map a git stderr message onto the error taxonomy. Unrecognized text
/// stays a generic backend failure with the stderr as the reason.
fn classify_failure(stderr: &str, reference: &str) -> StashError {
    let lower = stderr.to_lowercase();
    if lower.contains("is not a valid reference")
        || lower.contains("unknown revision")
        || lower.contains("is not a stash")
        || lower.contains("no stash entries")
        || lower.contains("log for 'refs/stash' only has")
    {
        StashError::NotFound(reference.to_string())
    } else if lower.contains("conflict") || lower.contains("could not restore untracked files") {
        StashError::Conflict(stderr.to_string())
    } else {
        StashError::backend(stderr.to_string())
    }
}
