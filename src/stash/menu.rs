use crate::cli::output::Output;
use crate::errors::{Result, StashError};
use crate::stash::{ActionExecutor, ActionOutcome, DestructiveOp, OutcomeKind, StashStore};
use dialoguer::{theme::ColorfulTheme, Input};

/// Numbered-menu controller used when no interactive terminal is
/// available. Renders the stash list with 1-based numbers, reads one
/// `<number><letter>` command per cycle and dispatches it, with blocking
/// confirmation prompts for the destructive actions.
pub struct FallbackController<'a> {
    store: &'a StashStore,
    executor: ActionExecutor<'a>,
}

impl<'a> FallbackController<'a> {
    pub fn new(store: &'a StashStore, executor: ActionExecutor<'a>) -> Self {
        Self { store, executor }
    }

    pub fn run(&self) -> Result<()> {
        loop {
            let entries = self.store.list();
            if entries.is_empty() {
                Output::info("No stash entries.");
                return Ok(());
            }

            Output::spacing();
            for entry in &entries {
                Output::numbered_item(entry.index + 1, &entry.raw);
            }
            Output::spacing();

            let line: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Command (<number><letter>, e.g. 2d; a/p/d/r/v, q quits)")
                .allow_empty(true)
                .interact_text()
                .map_err(|e| StashError::config(format!("Input error: {e}")))?;

            let line = line.trim();
            if line.eq_ignore_ascii_case("q") {
                return Ok(());
            }

            let (number, letter) = match parse_command(line) {
                Ok(parsed) => parsed,
                Err(reason) => {
                    Output::error(reason);
                    continue;
                }
            };

            let entry = match select_entry(&entries, number) {
                Ok(entry) => entry,
                Err(reason) => {
                    Output::error(reason);
                    continue;
                }
            };

            match letter {
                'a' => self.run_destructive(DestructiveOp::Apply, entry)?,
                'p' => self.run_destructive(DestructiveOp::Pop, entry)?,
                'd' => self.run_destructive(DestructiveOp::Drop, entry)?,
                'r' => {
                    let new_message: String = Input::with_theme(&ColorfulTheme::default())
                        .with_prompt(format!("New message for {}", entry.reference))
                        .with_initial_text(entry.message.clone())
                        .allow_empty(true)
                        .interact_text()
                        .map_err(|e| StashError::config(format!("Input error: {e}")))?;
                    report(self.executor.rename(entry, &new_message));
                }
                'v' => report(self.executor.view(entry)),
                other => {
                    Output::error(format!("Unknown action '{other}' (a, p, d, r, v)"));
                }
            }
        }
    }

    fn run_destructive(
        &self,
        op: DestructiveOp,
        entry: &crate::stash::StashEntry,
    ) -> Result<()> {
        if self.executor.confirm(op, entry)? {
            report(self.executor.execute(op, entry));
        }
        Ok(())
    }
}

fn report(outcome: ActionOutcome) {
    match outcome.kind {
        OutcomeKind::Success if !outcome.message.is_empty() => Output::success(outcome.message),
        OutcomeKind::Failure => Output::error(outcome.message),
        // Cancellation is silent; success without a message (view) too.
        _ => {}
    }
}

/// Resolve a 1-based menu number against the listed entries, rejecting
/// anything outside `1..=entries.len()`.
pub fn select_entry(
    entries: &[crate::stash::StashEntry],
    number: usize,
) -> std::result::Result<&crate::stash::StashEntry, String> {
    if number == 0 || number > entries.len() {
        return Err(format!(
            "No entry numbered {number} (valid: 1..{})",
            entries.len()
        ));
    }
    Ok(&entries[number - 1])
}

/// Split a menu command into its entry number and action letter: a
/// leading digit run followed by exactly one alphabetic character, no
/// separator (`2d`, `12v`).
pub fn parse_command(input: &str) -> std::result::Result<(usize, char), String> {
    let digit_end = input
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(input.len());
    let (digits, rest) = input.split_at(digit_end);

    if digits.is_empty() {
        return Err(format!(
            "Expected an entry number first, e.g. '2d' (got '{input}')"
        ));
    }

    let mut rest_chars = rest.chars();
    match (rest_chars.next(), rest_chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => {
            let number = digits
                .parse::<usize>()
                .map_err(|_| format!("Entry number '{digits}' is out of range"))?;
            Ok((number, letter.to_ascii_lowercase()))
        }
        _ => Err(format!(
            "Expected a single action letter after the number, e.g. '2d' (got '{input}')"
        )),
    }
}
