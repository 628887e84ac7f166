use crate::errors::{Result, StashError};
use git2::Repository;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository for discovery and reference resolution.
///
/// Stash mutations themselves go through the external `git` binary (see
/// `crate::stash::StashStore`); this wrapper only answers "am I in a
/// repository" and "which commit does this stash reference denote".
pub struct GitRepository {
    repo: Repository,
    path: PathBuf,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl GitRepository {
    /// Discover the repository containing `path`.
    ///
    /// Failure here is the one fatal condition of the tool: the process
    /// exits with code 1 before any controller starts.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|_| StashError::NotARepository)?;

        let workdir = repo
            .workdir()
            .ok_or_else(|| StashError::config("Repository has no working directory"))?
            .to_path_buf();

        Ok(Self {
            repo,
            path: workdir,
        })
    }

    /// Working directory of the repository.
    pub fn workdir(&self) -> &Path {
        &self.path
    }

    /// Resolve a stash reference (e.g. `stash@{1}`) to its commit id.
    ///
    /// Fails with `NotFound` when the reference no longer denotes a live
    /// stash entry, e.g. after a concurrent drop from another session.
    pub fn resolve_stash_commit(&self, reference: &str) -> Result<String> {
        let obj = self
            .repo
            .revparse_single(reference)
            .map_err(|_| StashError::NotFound(reference.to_string()))?;
        Ok(obj.id().to_string())
    }
}
