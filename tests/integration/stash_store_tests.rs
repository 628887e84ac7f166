use super::test_helpers::{create_stash, create_test_git_repo};
use stash_cli::git::GitRepository;
use stash_cli::stash::StashStore;
use stash_cli::StashError;

#[tokio::test]
async fn test_list_without_stashes_is_empty() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    let store = StashStore::new(&repo_path);
    assert!(store.list().is_empty());
}

#[tokio::test]
async fn test_list_orders_newest_first() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "older");
    create_stash(&repo_path, "newer");

    let store = StashStore::new(&repo_path);
    let entries = store.list();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].index, 0);
    assert_eq!(entries[0].reference, "stash@{0}");
    assert!(entries[0].message.contains("newer"));
    assert_eq!(entries[1].reference, "stash@{1}");
    assert!(entries[1].message.contains("older"));
}

#[tokio::test]
async fn test_drop_reindexes_remaining_entries() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "bottom");
    create_stash(&repo_path, "top");

    let store = StashStore::new(&repo_path);
    store.drop("stash@{0}").unwrap();

    let entries = store.list();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].reference, "stash@{0}");
    assert!(entries[0].message.contains("bottom"));
}

#[tokio::test]
async fn test_drop_missing_entry_is_not_found() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "only");

    let store = StashStore::new(&repo_path);
    let err = store.drop("stash@{5}").unwrap_err();
    assert!(matches!(err, StashError::NotFound(_)), "got {err:?}");

    // The failure is a no-op: the list is unchanged.
    assert_eq!(store.list().len(), 1);
}

#[tokio::test]
async fn test_apply_restores_changes_and_keeps_entry() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "wip");
    let readme = std::fs::read_to_string(repo_path.join("README.md")).unwrap();
    assert!(!readme.contains("change for wip"));

    let store = StashStore::new(&repo_path);
    store.apply("stash@{0}").unwrap();

    let readme = std::fs::read_to_string(repo_path.join("README.md")).unwrap();
    assert!(readme.contains("change for wip"));
    assert_eq!(store.list().len(), 1, "apply keeps the entry");
}

#[tokio::test]
async fn test_pop_applies_and_removes_entry() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "wip");

    let store = StashStore::new(&repo_path);
    store.pop("stash@{0}").unwrap();

    let readme = std::fs::read_to_string(repo_path.join("README.md")).unwrap();
    assert!(readme.contains("change for wip"));
    assert!(store.list().is_empty());
}

#[tokio::test]
async fn test_show_diff_contains_the_stashed_change() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "wip");

    let store = StashStore::new(&repo_path);
    let diff = store.show_diff("stash@{0}").unwrap();
    assert!(diff.contains("+change for wip"));
}

#[tokio::test]
async fn test_show_diff_missing_entry_is_not_found() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    let store = StashStore::new(&repo_path);
    let err = store.show_diff("stash@{0}").unwrap_err();
    assert!(matches!(err, StashError::NotFound(_)), "got {err:?}");
}

#[tokio::test]
async fn test_store_creates_entry_at_top_from_existing_commit() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "original");

    let repo = GitRepository::open(&repo_path).unwrap();
    let store = StashStore::new(repo.workdir());
    let commit_id = repo.resolve_stash_commit("stash@{0}").unwrap();

    store.store("stored copy", &commit_id).unwrap();

    let entries = store.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "stored copy");
}

#[tokio::test]
async fn test_store_then_failing_drop_loses_nothing() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "original");

    let repo = GitRepository::open(&repo_path).unwrap();
    let store = StashStore::new(repo.workdir());
    let commit_id = repo.resolve_stash_commit("stash@{0}").unwrap();

    // Store succeeds, then the drop step fails (stale reference): both
    // entries must still exist.
    store.store("fix", &commit_id).unwrap();
    assert!(store.drop("stash@{9}").is_err());

    let entries = store.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "fix");
    assert!(entries[1].message.contains("original"));
}
