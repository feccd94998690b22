pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{AppState, Section};

use components::hints::{self, KeyHint};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let theme = Theme::default();
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar (label + underline)
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    match state.section {
        Section::Entry => screens::entry::render(frame, layout[2], state),
        Section::History => screens::history::render(frame, layout[2], state),
        Section::Dashboard => screens::dashboard::render(frame, layout[2], state),
    }

    render_bottom_bar(frame, layout[3], state, &theme);
    components::command_palette::render(frame, area, state);
    components::export_prompt::render(frame, area, state.export.as_ref());
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let records = state.session.records();
    let line = Line::from(vec![
        Span::styled("File", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.session.data_path().display())),
        Span::styled("Records", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", records.len())),
        Span::styled("Filter", Style::default().fg(theme.text_muted)),
        Span::raw(format!(
            ": {} / {}",
            state.history.applied.kind, state.history.applied.category
        )),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    let context = context_hints(state);
    if !context.is_empty() {
        parts.push(hints::hint_separator(theme));
        parts.extend(hints::hints_to_spans(&context, theme));
    }

    parts.push(hints::hint_separator(theme));
    parts.extend(hints::hints_to_spans(
        &hints::common::global_shortcuts(),
        theme,
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState) -> Vec<KeyHint> {
    if state.export.is_some() {
        return hints::common::prompt();
    }
    if state.palette.active {
        return Vec::new();
    }
    match state.section {
        Section::Entry => hints::common::form_editing(),
        Section::History => hints::common::history_filters(),
        Section::Dashboard => hints::common::dashboard(),
    }
}
