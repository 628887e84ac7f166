use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run a git command in the repo, panicking with stderr on failure.
pub fn run_git(repo_path: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()
        .expect("Git command should run");

    if !output.status.success() {
        panic!(
            "Git command failed: git {}\nStderr: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
}

/// Create a test git repository with CI-compatible config and one commit.
pub async fn create_test_git_repo() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let repo_path = temp_dir.path().to_path_buf();

    let git_commands = [
        vec!["init"],
        vec!["config", "user.name", "Test User"],
        vec!["config", "user.email", "test@example.com"],
        vec!["config", "init.defaultBranch", "main"],
        vec!["config", "core.autocrlf", "false"],
    ];
    for cmd_args in &git_commands {
        run_git(&repo_path, cmd_args);
    }

    std::fs::write(repo_path.join("README.md"), "# Test Repository\n").unwrap();
    run_git(&repo_path, &["add", "."]);
    run_git(&repo_path, &["commit", "-m", "Initial commit"]);

    (temp_dir, repo_path)
}

/// Dirty the working tree, then stash it under `message`. The newest
/// stash always lists as `stash@{0}`.
pub fn create_stash(repo_path: &Path, message: &str) {
    let readme = repo_path.join("README.md");
    let mut content = std::fs::read_to_string(&readme).unwrap();
    content.push_str(&format!("change for {message}\n"));
    std::fs::write(&readme, content).unwrap();

    run_git(repo_path, &["stash", "push", "-m", message]);
}
