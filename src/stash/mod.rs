pub mod executor;
pub mod menu;
pub mod store;

pub use executor::{ActionExecutor, ActionOutcome, DestructiveOp, OutcomeKind};
pub use menu::FallbackController;
pub use store::StashStore;

use serde::Serialize;

/// One entry of the stash list, produced fresh on every list query.
///
/// References are valid only until the next mutation: dropping, popping or
/// renaming any entry shifts the `stash@{N}` addresses of everything below
/// it, so the list is always re-fetched after a mutating call.
#[derive(Debug, Clone, Serialize)]
pub struct StashEntry {
    /// Ordinal position in the list, 0 = most recent
    pub index: usize,
    /// Stable token addressing this entry in backend commands, e.g. `stash@{0}`
    pub reference: String,
    /// Human-entered or auto-generated label
    pub message: String,
    /// The original listing line as git printed it
    pub raw: String,
}

impl StashEntry {
    /// Parse one `git stash list` line, formatted `stash@{N}: <label>`.
    ///
    /// Returns `None` for lines that do not carry a stash reference; the
    /// caller skips those rather than failing the whole listing.
    pub fn parse(index: usize, line: &str) -> Option<Self> {
        let (reference, message) = line.split_once(": ")?;
        if !reference.starts_with("stash@{") || !reference.ends_with('}') {
            return None;
        }
        // The part between the braces must be the entry's ordinal.
        let ordinal = &reference["stash@{".len()..reference.len() - 1];
        if ordinal.is_empty() || !ordinal.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            index,
            reference: reference.to_string(),
            message: message.to_string(),
            raw: line.to_string(),
        })
    }
}
