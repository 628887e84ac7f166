use crate::stash::{DestructiveOp, StashEntry};
use crossterm::event::KeyCode;

/// Payload of Confirm mode: what will run, and against which entry.
/// The target is captured when the mode is entered so a list reordering
/// underneath the prompt cannot redirect the operation.
#[derive(Debug, Clone)]
pub struct PendingConfirmation {
    pub operation: DestructiveOp,
    pub target: StashEntry,
}

/// The browser's modal state. Exactly one mode is active at a time and
/// every path out of Search/Rename/Confirm lands back in Action, which
/// restores the Action key handling and header by construction.
#[derive(Debug, Clone)]
pub enum Mode {
    Action,
    Search,
    Rename { target: StashEntry, buffer: String },
    Confirm(PendingConfirmation),
}

impl Mode {
    pub fn banner(&self) -> String {
        match self {
            Mode::Action => {
                "a apply · p pop · d drop · r rename · v view · / search · enter default · q quit"
                    .to_string()
            }
            Mode::Search => "search · esc clears, enter keeps the filter".to_string(),
            Mode::Rename { target, .. } => {
                format!("rename {} · enter saves, esc cancels", target.reference)
            }
            Mode::Confirm(pending) => format!(
                "{} {}? y confirms, n/esc cancels",
                pending.operation.verb().to_lowercase(),
                pending.target.reference
            ),
        }
    }
}

/// An effect the key handler asks the controller to perform. Keeping the
/// state machine free of I/O keeps every transition unit-testable.
#[derive(Debug, Clone)]
pub enum UiCommand {
    Execute(DestructiveOp, StashEntry),
    View(StashEntry),
    Rename(StashEntry, String),
    RunDefaultAction,
    Quit,
}

#[derive(Debug)]
pub struct BrowserState {
    entries: Vec<StashEntry>,
    /// Indices into `entries` that match the current search query
    visible: Vec<usize>,
    /// Cursor position within `visible`
    cursor: usize,
    pub mode: Mode,
    pub query: String,
    pub status: Option<String>,
}

impl BrowserState {
    pub fn new(entries: Vec<StashEntry>) -> Self {
        let mut state = Self {
            entries,
            visible: Vec::new(),
            cursor: 0,
            mode: Mode::Action,
            query: String::new(),
            status: None,
        };
        state.refilter();
        state
    }

    /// Replace the entry list after a refresh, keeping the search filter
    /// and clamping the cursor to the new bounds.
    pub fn set_entries(&mut self, entries: Vec<StashEntry>) {
        self.entries = entries;
        self.refilter();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &StashEntry> {
        self.visible.iter().map(|&i| &self.entries[i])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&StashEntry> {
        self.visible.get(self.cursor).map(|&i| &self.entries[i])
    }

    /// Cursor position after an operation with "less predictable"
    /// position semantics (apply/pop/drop): back to the top.
    pub fn select_top(&mut self) {
        self.cursor = 0;
    }

    /// Cursor position after view/rename: advance past the original
    /// entry so repeated operations walk down the list.
    pub fn select_after(&mut self, original: usize) {
        self.cursor = advance_cursor(original, self.visible.len());
    }

    fn refilter(&mut self) {
        let query = self.query.to_lowercase();
        self.visible = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| query.is_empty() || entry.raw.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();
        if self.cursor >= self.visible.len() {
            self.cursor = self.visible.len().saturating_sub(1);
        }
    }

    /// Feed one key press through the state machine. Mutates the mode and
    /// cursor; returns the effect the controller must carry out, if any.
    pub fn on_key(&mut self, key: KeyCode) -> Option<UiCommand> {
        match std::mem::replace(&mut self.mode, Mode::Action) {
            Mode::Action => self.on_action_key(key),
            Mode::Search => self.on_search_key(key),
            Mode::Rename { target, buffer } => self.on_rename_key(key, target, buffer),
            Mode::Confirm(pending) => self.on_confirm_key(key, pending),
        }
    }

    fn on_action_key(&mut self, key: KeyCode) -> Option<UiCommand> {
        // Mode is already Action; a new key press clears the previous
        // operation's status line.
        match key {
            KeyCode::Char('q') => return Some(UiCommand::Quit),
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < self.visible.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Char('/') => {
                self.status = None;
                self.mode = Mode::Search;
            }
            KeyCode::Char('a') => self.begin_confirm(DestructiveOp::Apply),
            KeyCode::Char('p') => self.begin_confirm(DestructiveOp::Pop),
            KeyCode::Char('d') => self.begin_confirm(DestructiveOp::Drop),
            KeyCode::Char('r') => {
                if let Some(entry) = self.selected().cloned() {
                    self.status = None;
                    self.mode = Mode::Rename {
                        buffer: entry.message.clone(),
                        target: entry,
                    };
                }
            }
            KeyCode::Char('v') => {
                if let Some(entry) = self.selected().cloned() {
                    self.status = None;
                    return Some(UiCommand::View(entry));
                }
            }
            KeyCode::Enter => {
                if self.selected().is_some() {
                    return Some(UiCommand::RunDefaultAction);
                }
            }
            _ => {}
        }
        None
    }

    /// Begin the confirmation sub-mode for a destructive operation,
    /// capturing the highlighted entry as the fixed target.
    pub fn begin_confirm(&mut self, op: DestructiveOp) {
        if let Some(entry) = self.selected().cloned() {
            self.status = None;
            self.mode = Mode::Confirm(PendingConfirmation {
                operation: op,
                target: entry,
            });
        }
    }

    fn on_search_key(&mut self, key: KeyCode) -> Option<UiCommand> {
        match key {
            KeyCode::Esc => {
                // Leaving with esc clears the filter entirely.
                self.query.clear();
                self.refilter();
            }
            KeyCode::Enter => {}
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
                self.mode = Mode::Search;
            }
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                self.mode = Mode::Search;
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.visible.len() {
                    self.cursor += 1;
                }
                self.mode = Mode::Search;
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refilter();
                self.mode = Mode::Search;
            }
            _ => {
                self.mode = Mode::Search;
            }
        }
        None
    }

    fn on_rename_key(
        &mut self,
        key: KeyCode,
        target: StashEntry,
        mut buffer: String,
    ) -> Option<UiCommand> {
        match key {
            KeyCode::Esc => None,
            KeyCode::Enter => {
                if buffer.trim().is_empty() {
                    // User abort, not an error: no backend calls.
                    None
                } else {
                    Some(UiCommand::Rename(target, buffer))
                }
            }
            KeyCode::Backspace => {
                buffer.pop();
                self.mode = Mode::Rename { target, buffer };
                None
            }
            KeyCode::Char(c) => {
                buffer.push(c);
                self.mode = Mode::Rename { target, buffer };
                None
            }
            _ => {
                self.mode = Mode::Rename { target, buffer };
                None
            }
        }
    }

    fn on_confirm_key(&mut self, key: KeyCode, pending: PendingConfirmation) -> Option<UiCommand> {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                Some(UiCommand::Execute(pending.operation, pending.target))
            }
            // Enter takes the advertised [y/N] default and cancels.
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Enter => None,
            _ => {
                // Anything else keeps the confirmation pending.
                self.mode = Mode::Confirm(pending);
                None
            }
        }
    }
}

/// Next cursor ordinal after an operation that kept the entry list (view)
/// or replaced the current entry (rename): one past the original, clamped
/// to the new list bounds.
pub fn advance_cursor(original: usize, new_len: usize) -> usize {
    if new_len == 0 {
        0
    } else {
        (original + 1).min(new_len - 1)
    }
}
