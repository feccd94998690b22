use engine::{CategoryBreakdown, DashboardReport, MonthlyFlow};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Paragraph, Wrap},
};

use crate::{
    app::AppState,
    ui::{
        components::{card::Card, charts},
        theme::Theme,
    },
};

const PIE_TITLE: &str = "Expense by Category";
const BARS_TITLE: &str = "Monthly Income vs Expense";

enum Panel<'a> {
    Pie(&'a CategoryBreakdown),
    Bars(&'a MonthlyFlow),
    Failed { title: &'static str, reason: String },
}

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let Some(DashboardReport::Charts {
        by_category,
        by_month,
    }) = &state.dashboard.report
    else {
        let message = Paragraph::new(Span::styled(
            "No data to display yet. Add some income or expense records first.",
            Style::default().fg(theme.text_muted),
        ))
        .wrap(Wrap { trim: true });
        Card::new("Dashboard", &theme).render_with(frame, area, message);
        return;
    };

    // A chart with nothing to plot is left out, a failed one shows its error.
    let mut panels = Vec::new();
    match by_category {
        Ok(Some(breakdown)) => panels.push(Panel::Pie(breakdown)),
        Ok(None) => {}
        Err(err) => panels.push(Panel::Failed {
            title: PIE_TITLE,
            reason: err.to_string(),
        }),
    }
    match by_month {
        Ok(Some(flow)) => panels.push(Panel::Bars(flow)),
        Ok(None) => {}
        Err(err) => panels.push(Panel::Failed {
            title: BARS_TITLE,
            reason: err.to_string(),
        }),
    }
    if panels.is_empty() {
        return;
    }

    let count = u32::try_from(panels.len()).unwrap_or(1);
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, count); panels.len()])
        .split(area);

    for (panel, slot) in panels.iter().zip(layout.iter()) {
        match panel {
            Panel::Pie(breakdown) => charts::render_pie(frame, *slot, breakdown, &theme),
            Panel::Bars(flow) => charts::render_monthly_bars(frame, *slot, flow, &theme),
            Panel::Failed { title, reason } => render_error(frame, *slot, title, reason, &theme),
        }
    }
}

fn render_error(frame: &mut Frame<'_>, area: Rect, title: &str, reason: &str, theme: &Theme) {
    let text = Paragraph::new(Span::styled(
        format!("Could not build this chart: {reason}"),
        Style::default().fg(theme.error),
    ))
    .wrap(Wrap { trim: true });
    Card::new(title, theme).render_with(frame, area, text);
}
