use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::{
    app::ExportPrompt,
    ui::{
        components::{card::Card, centered_rect, hints},
        theme::Theme,
    },
};

/// Destination dialog for an export.
pub fn render(frame: &mut Frame<'_>, area: Rect, prompt: Option<&ExportPrompt>) {
    let Some(prompt) = prompt else {
        return;
    };
    let theme = Theme::default();
    let popup = centered_rect(70, 30, area);
    frame.render_widget(Clear, popup);

    let title = format!("Export to {}", prompt.format.label());
    let lines = vec![
        Line::from(Span::styled(
            "Save as:",
            Style::default().fg(theme.text_muted),
        )),
        Line::from(vec![
            Span::styled(prompt.path.clone(), Style::default().fg(theme.text)),
            Span::styled("|", Style::default().fg(theme.accent)),
        ]),
        Line::default(),
        Line::from(hints::hints_to_spans(&hints::common::prompt(), &theme)),
    ];
    Card::new(&title, &theme)
        .focused(true)
        .render_with(frame, popup, Paragraph::new(lines));
}
