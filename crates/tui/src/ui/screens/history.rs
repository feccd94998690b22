use engine::COLUMNS;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, money},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_filters(frame, layout[0], state, &theme);
    render_table(frame, layout[1], state, &theme);
}

fn render_filters(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let history = &state.history;
    let mut spans = vec![
        Span::styled("Type ", Style::default().fg(theme.text_muted)),
        Span::styled(
            format!("[{}]", history.pending.kind),
            Style::default().fg(theme.text),
        ),
        Span::raw("   "),
        Span::styled("Category ", Style::default().fg(theme.text_muted)),
        Span::styled(
            format!("[{}]", history.pending.category),
            Style::default().fg(theme.text),
        ),
    ];
    if history.is_dirty() {
        spans.push(Span::styled(
            "   Enter to apply",
            Style::default().fg(theme.accent),
        ));
    }
    Card::new("Filter", theme).render_with(frame, area, Paragraph::new(Line::from(spans)));
}

fn render_table(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let records = state.session.records();
    let history = &state.history;
    let title = format!("History ({} of {})", history.rows.len(), records.len());
    let card = Card::new(&title, theme);

    if history.rows.is_empty() {
        let message = if records.is_empty() {
            "No records yet. Add one with F1."
        } else {
            "No records match the filter."
        };
        card.render_with(
            frame,
            area,
            Paragraph::new(Span::styled(message, Style::default().fg(theme.text_muted))),
        );
        return;
    }

    let header = Row::new(COLUMNS.iter().map(|column| Cell::from(*column))).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );
    let rows = history
        .rows
        .iter()
        .filter_map(|index| records.get(*index))
        .map(|record| {
            Row::new(vec![
                Cell::from(record.date.clone()),
                Cell::from(record.kind.label()),
                Cell::from(record.category.clone()),
                Cell::from(Line::from(money::styled_amount(
                    record.amount,
                    record.kind,
                    theme,
                ))),
                Cell::from(record.description.clone().unwrap_or_default()),
            ])
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Length(15),
            Constraint::Length(12),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(card.block())
    .style(Style::default().fg(theme.text))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("» ");

    let mut table_state = TableState::default();
    table_state.select(Some(history.selected));
    frame.render_stateful_widget(table, area, &mut table_state);
}
