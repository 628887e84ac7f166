use super::test_helpers::{create_stash, create_test_git_repo};
use stash_cli::git::GitRepository;
use stash_cli::stash::{ActionExecutor, OutcomeKind, StashStore};

#[tokio::test]
async fn test_rename_replaces_the_single_entry() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "WIP");

    let repo = GitRepository::open(&repo_path).unwrap();
    let store = StashStore::new(repo.workdir());
    let executor = ActionExecutor::new(&store, &repo);
    let entry = store.list().remove(0);

    let outcome = executor.rename(&entry, "fix");

    assert_eq!(outcome.kind, OutcomeKind::Success);
    assert!(outcome.mutated);
    assert!(outcome.message.contains("stash@{0}"));

    let entries = store.list();
    assert_eq!(entries.len(), 1, "rename must not change the entry count");
    assert_eq!(entries[0].message, "fix");
}

#[tokio::test]
async fn test_rename_keeps_other_entries_intact() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "keep-bottom");
    create_stash(&repo_path, "rename-me");

    let repo = GitRepository::open(&repo_path).unwrap();
    let store = StashStore::new(repo.workdir());
    let executor = ActionExecutor::new(&store, &repo);
    let entry = store.list().remove(0);

    let outcome = executor.rename(&entry, "renamed");
    assert_eq!(outcome.kind, OutcomeKind::Success);

    let entries = store.list();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].message, "renamed");
    assert!(entries[1].message.contains("keep-bottom"));
}

#[tokio::test]
async fn test_rename_with_empty_message_is_a_silent_cancel() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "WIP");

    let repo = GitRepository::open(&repo_path).unwrap();
    let store = StashStore::new(repo.workdir());
    let executor = ActionExecutor::new(&store, &repo);
    let entry = store.list().remove(0);

    for message in ["", "   "] {
        let outcome = executor.rename(&entry, message);
        assert_eq!(outcome.kind, OutcomeKind::Cancelled);
        assert!(!outcome.mutated);
    }

    let entries = store.list();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].message.contains("WIP"), "no backend calls ran");
}

#[tokio::test]
async fn test_rename_of_stale_reference_reports_resolve_failure() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "WIP");

    let repo = GitRepository::open(&repo_path).unwrap();
    let store = StashStore::new(repo.workdir());
    let executor = ActionExecutor::new(&store, &repo);
    let mut entry = store.list().remove(0);
    entry.reference = "stash@{7}".to_string();

    let outcome = executor.rename(&entry, "fix");

    assert_eq!(outcome.kind, OutcomeKind::Failure);
    assert!(outcome.message.contains("resolve"), "{}", outcome.message);
    assert_eq!(store.list().len(), 1, "nothing was stored or dropped");
}
