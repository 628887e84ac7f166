use crate::stash::StashStore;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// The preview pane stops rendering past this many diff lines; the full
/// diff is always available through the view action.
const PREVIEW_LINE_CAP: usize = 400;

/// One cached diff, keyed by the highlighted reference. The preview is
/// refetched only when the highlight moves or the cache is invalidated
/// after a mutation. A fetch failure (stale reference, backend hiccup)
/// renders a placeholder pane and never surfaces as an error.
pub struct PreviewCache {
    reference: Option<String>,
    lines: Vec<Line<'static>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self {
            reference: None,
            lines: placeholder("nothing to preview"),
        }
    }

    pub fn lines_for(&mut self, store: &StashStore, reference: Option<&str>) -> &[Line<'static>] {
        if self.reference.as_deref() != reference {
            self.reference = reference.map(str::to_string);
            self.lines = match reference {
                None => placeholder("nothing to preview"),
                Some(r) => match store.show_diff(r) {
                    Ok(diff) => colorize(&diff),
                    Err(_) => placeholder("(stash entry no longer exists)"),
                },
            };
        }
        &self.lines
    }

    /// Force a refetch on the next render, used after any mutation. The
    /// placeholder stays in place in case nothing is highlighted then.
    pub fn invalidate(&mut self) {
        self.reference = None;
        self.lines = placeholder("nothing to preview");
    }
}

fn placeholder(text: &str) -> Vec<Line<'static>> {
    vec![Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::DarkGray),
    ))]
}

fn colorize(diff: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut total = 0usize;

    for line in diff.lines() {
        total += 1;
        if total > PREVIEW_LINE_CAP {
            continue;
        }
        let style = if line.starts_with("diff --git") {
            Style::default().add_modifier(Modifier::BOLD)
        } else if line.starts_with("+++") || line.starts_with("---") || line.starts_with("index ") {
            Style::default().fg(Color::DarkGray)
        } else if line.starts_with("@@") {
            Style::default().fg(Color::Cyan)
        } else if line.starts_with('+') {
            Style::default().fg(Color::Green)
        } else if line.starts_with('-') {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(line.to_string(), style)));
    }

    if total > PREVIEW_LINE_CAP {
        lines.push(Line::from(Span::styled(
            format!("… {} more lines (press v for the full diff)", total - PREVIEW_LINE_CAP),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(empty diff)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colorize_marks_diff_lines() {
        let diff = "diff --git a/f b/f\n@@ -1 +1 @@\n-old\n+new\n context\n";
        let lines = colorize(diff);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_colorize_empty_diff() {
        let lines = colorize("");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_colorize_truncates_long_diffs() {
        let diff = "+x\n".repeat(PREVIEW_LINE_CAP + 25);
        let lines = colorize(&diff);
        assert_eq!(lines.len(), PREVIEW_LINE_CAP + 1);
    }

    #[test]
    fn test_empty_selection_shows_placeholder_from_the_start() {
        let store = StashStore::new(std::path::Path::new("."));
        let mut cache = PreviewCache::new();
        // No highlight at startup still renders a placeholder line.
        assert_eq!(cache.lines_for(&store, None).len(), 1);

        cache.invalidate();
        assert_eq!(cache.lines_for(&store, None).len(), 1);
    }
}
