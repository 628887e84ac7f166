use super::test_helpers::{create_stash, create_test_git_repo};
use crossterm::event::KeyCode;
use stash_cli::git::GitRepository;
use stash_cli::stash::{ActionExecutor, DestructiveOp, OutcomeKind, StashStore};
use stash_cli::tui::state::{BrowserState, UiCommand};

/// Drive the browser state machine against a real repository the way the
/// interactive controller does: keys in, commands out, commands executed.

#[tokio::test]
async fn test_drop_top_entry_via_confirm_reindexes_list() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "B");
    create_stash(&repo_path, "A");

    let repo = GitRepository::open(&repo_path).unwrap();
    let store = StashStore::new(repo.workdir());
    let executor = ActionExecutor::new(&store, &repo);

    let mut state = BrowserState::new(store.list());
    assert!(state.on_key(KeyCode::Char('d')).is_none());

    let outcome = match state.on_key(KeyCode::Char('y')) {
        Some(UiCommand::Execute(DestructiveOp::Drop, target)) => {
            assert_eq!(target.reference, "stash@{0}");
            executor.execute(DestructiveOp::Drop, &target)
        }
        other => panic!("expected Execute after y, got {other:?}"),
    };

    assert_eq!(outcome.kind, OutcomeKind::Success);
    // The report names the dropped entry by its original address.
    assert!(outcome.message.contains("stash@{0}"));

    let after = store.list();
    state.set_entries(after.clone());
    state.select_top();

    assert_eq!(after.len(), 1);
    assert_eq!(after[0].reference, "stash@{0}", "list is re-indexed");
    assert!(after[0].message.contains('B'));
    assert_eq!(state.cursor(), 0);
}

#[tokio::test]
async fn test_cancelled_confirm_leaves_list_unchanged() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    create_stash(&repo_path, "B");
    create_stash(&repo_path, "A");

    let store = StashStore::new(&repo_path);
    let mut state = BrowserState::new(store.list());

    state.on_key(KeyCode::Char('d'));
    assert!(state.on_key(KeyCode::Esc).is_none());

    assert_eq!(store.list().len(), 2);
}

#[tokio::test]
async fn test_rename_command_advances_cursor_past_original() {
    let (_tmp, repo_path) = create_test_git_repo().await;
    for message in ["E", "D", "C", "B", "A"] {
        create_stash(&repo_path, message);
    }

    let repo = GitRepository::open(&repo_path).unwrap();
    let store = StashStore::new(repo.workdir());
    let executor = ActionExecutor::new(&store, &repo);

    let mut state = BrowserState::new(store.list());
    state.on_key(KeyCode::Down);
    state.on_key(KeyCode::Down);
    let original = state.cursor();
    assert_eq!(original, 2);

    state.on_key(KeyCode::Char('r'));
    let (target, message) = match state.on_key(KeyCode::Enter) {
        // The preloaded message is non-empty, so Enter submits it as-is.
        Some(UiCommand::Rename(target, message)) => (target, message),
        other => panic!("expected Rename command, got {other:?}"),
    };
    assert_eq!(target.reference, "stash@{2}");

    let outcome = executor.rename(&target, &message);
    assert_eq!(outcome.kind, OutcomeKind::Success);

    state.set_entries(store.list());
    state.select_after(original);
    assert_eq!(state.cursor(), 3);
    assert_eq!(state.visible_len(), 5);
}
