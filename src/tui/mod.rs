pub mod preview;
pub mod state;

use crate::cli::output::Output;
use crate::config::{preference, DefaultAction};
use crate::errors::{Result, StashError};
use crate::git::GitRepository;
use crate::stash::{ActionExecutor, ActionOutcome, DestructiveOp, OutcomeKind, StashStore};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use preview::PreviewCache;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};
use state::{BrowserState, Mode, UiCommand};
use std::io;
use std::path::PathBuf;
use std::time::Duration;

type Term = Terminal<CrosstermBackend<io::Stdout>>;

/// Where to put the cursor after a mutating operation finished.
enum CursorPolicy {
    Top,
    After(usize),
}

/// The interactive browser: a stash list with a live diff preview pane,
/// driven by the modal state machine in [`state`]. Owns the terminal
/// while running; loops until the operator quits or the list empties.
pub struct InteractiveController<'a> {
    store: &'a StashStore,
    repo: &'a GitRepository,
    settings_path: PathBuf,
    state: BrowserState,
    preview: PreviewCache,
    default_action: Option<DefaultAction>,
    should_quit: bool,
}

impl<'a> InteractiveController<'a> {
    pub fn new(store: &'a StashStore, repo: &'a GitRepository, settings_path: PathBuf) -> Self {
        Self {
            store,
            repo,
            settings_path,
            state: BrowserState::new(store.list()),
            preview: PreviewCache::new(),
            default_action: None,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        if self.state.is_empty() {
            Output::info("No stash entries.");
            return Ok(());
        }

        enable_raw_mode()
            .map_err(|e| StashError::terminal(format!("Failed to enable raw mode: {e}")))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)
            .map_err(|e| StashError::terminal(format!("Failed to setup terminal: {e}")))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)
            .map_err(|e| StashError::terminal(format!("Failed to create terminal: {e}")))?;

        let result = self.run_app(&mut terminal);

        disable_raw_mode()
            .map_err(|e| StashError::terminal(format!("Failed to disable raw mode: {e}")))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| StashError::terminal(format!("Failed to restore terminal: {e}")))?;
        terminal
            .show_cursor()
            .map_err(|e| StashError::terminal(format!("Failed to show cursor: {e}")))?;

        result
    }

    fn run_app(&mut self, terminal: &mut Term) -> Result<()> {
        loop {
            terminal
                .draw(|f| self.draw(f))
                .map_err(|e| StashError::terminal(format!("Failed to draw: {e}")))?;

            if event::poll(Duration::from_millis(200))
                .map_err(|e| StashError::terminal(format!("Event poll failed: {e}")))?
            {
                if let Event::Key(key) = event::read()
                    .map_err(|e| StashError::terminal(format!("Failed to read event: {e}")))?
                {
                    if key.kind == KeyEventKind::Press {
                        if key.modifiers.contains(KeyModifiers::CONTROL)
                            && key.code == KeyCode::Char('c')
                        {
                            break;
                        }
                        if let Some(cmd) = self.state.on_key(key.code) {
                            self.dispatch(cmd, terminal)?;
                        }
                    }
                }
            }

            // Nothing left to act on once the list empties.
            if self.should_quit || self.state.is_empty() {
                break;
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, cmd: UiCommand, terminal: &mut Term) -> Result<()> {
        match cmd {
            UiCommand::Quit => {
                self.should_quit = true;
            }
            UiCommand::Execute(op, target) => {
                let outcome = ActionExecutor::new(self.store, self.repo).execute(op, &target);
                self.finish(outcome, CursorPolicy::Top);
            }
            UiCommand::Rename(target, message) => {
                let original = self.state.cursor();
                let outcome = ActionExecutor::new(self.store, self.repo).rename(&target, &message);
                self.finish(outcome, CursorPolicy::After(original));
            }
            UiCommand::View(target) => {
                let original = self.state.cursor();
                let store = self.store;
                let repo = self.repo;
                let outcome =
                    suspended(terminal, || ActionExecutor::new(store, repo).view(&target))?;
                if outcome.kind == OutcomeKind::Failure {
                    self.state.status = Some(outcome.message);
                }
                self.state.select_after(original);
            }
            UiCommand::RunDefaultAction => {
                let action = self.resolve_default_action(terminal)?;
                match action {
                    DefaultAction::View => {
                        if let Some(target) = self.state.selected().cloned() {
                            self.dispatch(UiCommand::View(target), terminal)?;
                        }
                    }
                    DefaultAction::Apply => self.state.begin_confirm(DestructiveOp::Apply),
                    DefaultAction::Pop => self.state.begin_confirm(DestructiveOp::Pop),
                }
            }
        }
        Ok(())
    }

    /// Lazily resolve the persisted Enter action, prompting (outside the
    /// alternate screen) and persisting on first use.
    fn resolve_default_action(&mut self, terminal: &mut Term) -> Result<DefaultAction> {
        if let Some(action) = self.default_action {
            return Ok(action);
        }
        let action = match preference::load(&self.settings_path) {
            Some(action) => action,
            None => {
                let path = self.settings_path.clone();
                suspended(terminal, || preference::prompt_and_save(&path))??
            }
        };
        self.default_action = Some(action);
        Ok(action)
    }

    fn finish(&mut self, outcome: ActionOutcome, policy: CursorPolicy) {
        if !outcome.message.is_empty() {
            self.state.status = Some(outcome.message);
        }
        if outcome.mutated {
            self.state.set_entries(self.store.list());
            self.preview.invalidate();
            match policy {
                CursorPolicy::Top => self.state.select_top(),
                CursorPolicy::After(original) => self.state.select_after(original),
            }
        }
    }

    fn draw(&mut self, f: &mut ratatui::Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(3)])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[0]);

        // Stash list with the mode banner as its header.
        let items: Vec<ListItem> = self
            .state
            .visible_entries()
            .map(|entry| ListItem::new(entry.raw.clone()))
            .collect();
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.state.mode.banner()),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("» ");
        let mut list_state = ListState::default();
        if self.state.visible_len() > 0 {
            list_state.select(Some(self.state.cursor()));
        }
        f.render_stateful_widget(list, body[0], &mut list_state);

        // Preview pane for the highlighted entry.
        let reference = self.state.selected().map(|e| e.reference.clone());
        let lines = self
            .preview
            .lines_for(self.store, reference.as_deref())
            .to_vec();
        let preview = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("diff"))
            .wrap(Wrap { trim: false });
        f.render_widget(preview, body[1]);

        self.draw_footer(f, chunks[1]);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame, area: ratatui::layout::Rect) {
        let line = match &self.state.mode {
            Mode::Search => Line::from(vec![
                Span::styled("search: ", Style::default().fg(Color::Cyan)),
                Span::raw(self.state.query.clone()),
                Span::styled("▏", Style::default().fg(Color::Cyan)),
            ]),
            Mode::Rename { buffer, .. } => Line::from(vec![
                Span::styled("message: ", Style::default().fg(Color::Cyan)),
                Span::raw(buffer.clone()),
                Span::styled("▏", Style::default().fg(Color::Cyan)),
            ]),
            Mode::Confirm(pending) => Line::from(vec![Span::styled(
                format!(
                    "{} {}? [y/N]",
                    pending.operation.verb(),
                    pending.target.reference
                ),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )]),
            Mode::Action => match &self.state.status {
                Some(status) => Line::from(Span::styled(
                    status.clone(),
                    Style::default().fg(Color::Yellow),
                )),
                None => Line::from(Span::styled(
                    format!(
                        "{} entries · ↑↓ move · / filter",
                        self.state.visible_len()
                    ),
                    Style::default().fg(Color::Gray),
                )),
            },
        };

        let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, area);
    }
}

/// Hand the terminal back to the shell for a blocking interaction (pager,
/// first-run prompt), then re-enter the alternate screen.
fn suspended<T>(terminal: &mut Term, f: impl FnOnce() -> T) -> Result<T> {
    disable_raw_mode()
        .map_err(|e| StashError::terminal(format!("Failed to disable raw mode: {e}")))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| StashError::terminal(format!("Failed to leave alternate screen: {e}")))?;

    let value = f();

    enable_raw_mode()
        .map_err(|e| StashError::terminal(format!("Failed to re-enable raw mode: {e}")))?;
    execute!(terminal.backend_mut(), EnterAlternateScreen)
        .map_err(|e| StashError::terminal(format!("Failed to re-enter alternate screen: {e}")))?;
    terminal
        .clear()
        .map_err(|e| StashError::terminal(format!("Failed to clear terminal: {e}")))?;

    Ok(value)
}
