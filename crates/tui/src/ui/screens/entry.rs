use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    app::{AppState, EntryField},
    ui::{
        components::{card::Card, centered_rect},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let entry = &state.entry;
    let card_area = centered_rect(70, 80, area);
    let card = Card::new("Add Record", &theme).focused(true);
    let inner = card.inner(card_area);
    card.render_frame(frame, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    for (row, field) in EntryField::ALL.iter().enumerate() {
        let focused = entry.focus == *field;
        let value = match field {
            EntryField::Kind => selector(entry.draft.kind().label()),
            EntryField::Category => match entry.draft.category() {
                Some(category) => selector(category),
                None => "< select a category >".to_string(),
            },
            EntryField::Amount => entry.draft.amount.clone(),
            EntryField::Description => entry.draft.description.clone(),
        };
        frame.render_widget(
            Paragraph::new(field_line(field.label(), value, focused, field.is_text(), &theme)),
            rows[row],
        );
    }

    let mut footer = Vec::new();
    if let Some(error) = &entry.error {
        footer.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(theme.error),
        )));
    }
    footer.push(Line::from(Span::styled(
        format!("Saving to {}", state.session.data_path().display()),
        Style::default().fg(theme.text_muted),
    )));
    frame.render_widget(Paragraph::new(footer).wrap(Wrap { trim: true }), rows[4]);
}

fn selector(value: &str) -> String {
    format!("< {value} >")
}

fn field_line(
    label: &str,
    value: String,
    focused: bool,
    editable: bool,
    theme: &Theme,
) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.text_muted)
    };
    let mut spans = vec![
        Span::styled(if focused { "» " } else { "  " }, label_style),
        Span::styled(format!("{label:<12}"), label_style),
        Span::styled(value, Style::default().fg(theme.text)),
    ];
    if focused && editable {
        spans.push(Span::styled("|", Style::default().fg(theme.accent)));
    }
    Line::from(spans)
}
