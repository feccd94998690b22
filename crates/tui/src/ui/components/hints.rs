use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Converts a list of key hints into styled spans for rendering.
pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {}", hint.action)));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

/// Common hint groups for reuse across screens.
pub mod common {
    use super::KeyHint;

    pub fn global_shortcuts() -> Vec<KeyHint> {
        vec![KeyHint::new("Ctrl+P", "cmd"), KeyHint::new("Ctrl+Q", "quit")]
    }

    pub fn form_editing() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "next"),
            KeyHint::new("←→", "choose"),
            KeyHint::new("Enter", "save"),
        ]
    }

    pub fn history_filters() -> Vec<KeyHint> {
        vec![
            KeyHint::new("↑↓", "select"),
            KeyHint::new("t", "type"),
            KeyHint::new("c", "category"),
            KeyHint::new("Enter", "apply"),
            KeyHint::new("x", "reset"),
            KeyHint::new("r", "refresh"),
        ]
    }

    pub fn dashboard() -> Vec<KeyHint> {
        vec![KeyHint::new("r", "refresh")]
    }

    pub fn prompt() -> Vec<KeyHint> {
        vec![KeyHint::new("Enter", "confirm"), KeyHint::new("Esc", "cancel")]
    }
}
