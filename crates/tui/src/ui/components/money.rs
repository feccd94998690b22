use engine::{Amount, RecordKind};
use ratatui::{
    style::{Modifier, Style},
    text::Span,
};

use crate::ui::theme::Theme;

/// An amount colored by direction: income green with `+`, expense red with `-`.
#[must_use]
pub fn styled_amount(amount: Amount, kind: RecordKind, theme: &Theme) -> Span<'static> {
    let (color, prefix) = match kind {
        RecordKind::Income => (theme.positive, "+"),
        RecordKind::Expense => (theme.negative, "-"),
    };
    Span::styled(format!("{prefix}{amount}"), Style::default().fg(color))
}

/// Same coloring without a sign, bold, for totals.
#[must_use]
pub fn styled_total(amount: Amount, kind: RecordKind, theme: &Theme) -> Span<'static> {
    let color = match kind {
        RecordKind::Income => theme.positive,
        RecordKind::Expense => theme.negative,
    };
    Span::styled(
        amount.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )
}
