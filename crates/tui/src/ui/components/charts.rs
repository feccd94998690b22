use std::f64::consts::{FRAC_PI_2, TAU};

use engine::{CategoryBreakdown, MonthlyFlow, RecordKind};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Paragraph,
        canvas::{Canvas, Points},
    },
};

use crate::ui::{
    components::{card::Card, money},
    theme::{Theme, slice_color},
};

/// Renders the expense breakdown as a filled circle plus a legend.
pub fn render_pie(frame: &mut Frame<'_>, area: Rect, breakdown: &CategoryBreakdown, theme: &Theme) {
    let card = Card::new("Expense by Category", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let pie_area = square_area(columns[0]);
    let fractions: Vec<f64> = breakdown.slices.iter().map(|s| s.percent / 100.0).collect();
    let side = usize::from(pie_area.width.saturating_mul(2)).max(1);
    let points = pie_points(&fractions, side);

    let canvas = Canvas::default()
        .marker(symbols::Marker::Braille)
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .background_color(theme.surface)
        .paint(move |ctx| {
            for (index, coords) in points.iter().enumerate() {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: slice_color(index),
                });
            }
        });
    frame.render_widget(canvas, pie_area);

    let bar_width = usize::from(columns[1].width).saturating_sub(28).clamp(4, 20);
    let mut lines: Vec<Line<'static>> = breakdown
        .slices
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(slice_color(index))),
                Span::styled(
                    format!("{:<14}", slice.category),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    percentage_bar(slice.percent, bar_width),
                    Style::default().fg(theme.text_muted),
                ),
                Span::raw(" "),
                money::styled_total(slice.total, RecordKind::Expense, theme),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(format!("{:<16}", "Total"), Style::default().fg(theme.text_muted)),
        money::styled_total(breakdown.total, RecordKind::Expense, theme),
    ]));

    frame.render_widget(Paragraph::new(lines), columns[1]);
}

/// Renders one cluster per month with an expense and an income bar.
pub fn render_monthly_bars(frame: &mut Frame<'_>, area: Rect, flow: &MonthlyFlow, theme: &Theme) {
    let card = Card::new("Monthly Income vs Expense", theme);
    let inner = card.inner(area);
    card.render_frame(frame, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let legend = Line::from(
        RecordKind::ALL
            .iter()
            .flat_map(|kind| {
                [
                    Span::styled("■ ", Style::default().fg(kind_color(*kind, theme))),
                    Span::styled(
                        format!("{}  ", kind.label()),
                        Style::default().fg(theme.text_muted),
                    ),
                ]
            })
            .collect::<Vec<_>>(),
    );
    frame.render_widget(Paragraph::new(legend), layout[0]);

    let groups: Vec<BarGroup<'static>> = flow
        .months
        .iter()
        .map(|month| {
            let bars: Vec<Bar<'static>> = RecordKind::ALL
                .iter()
                .map(|kind| {
                    let amount = month.get(*kind);
                    Bar::default()
                        .value(amount.whole_units())
                        .text_value(amount.whole_units().to_string())
                        .style(Style::default().fg(kind_color(*kind, theme)))
                        .value_style(
                            Style::default()
                                .fg(theme.background)
                                .bg(kind_color(*kind, theme))
                                .add_modifier(Modifier::BOLD),
                        )
                })
                .collect();
            BarGroup::default()
                .label(Line::from(month.month.to_string()))
                .bars(&bars)
        })
        .collect();

    let bar_width = bar_width(layout[1].width, flow.months.len());
    let mut chart = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(2)
        .max(flow.max_bar().whole_units().max(1))
        .label_style(Style::default().fg(theme.text_muted));
    for group in groups {
        chart = chart.data(group);
    }
    frame.render_widget(chart, layout[1]);
}

pub fn kind_color(kind: RecordKind, theme: &Theme) -> Color {
    match kind {
        RecordKind::Expense => theme.negative,
        RecordKind::Income => theme.positive,
    }
}

/// Samples the unit disc on a `side` by `side` grid and buckets each point
/// into the slice that covers its angle.
///
/// Slices start at twelve o'clock and run clockwise. The last slice absorbs
/// rounding so the disc is always fully covered.
pub fn pie_points(fractions: &[f64], side: usize) -> Vec<Vec<(f64, f64)>> {
    let mut buckets = vec![Vec::new(); fractions.len()];
    if fractions.is_empty() || side == 0 {
        return buckets;
    }

    let mut bounds = Vec::with_capacity(fractions.len());
    let mut acc = 0.0;
    for fraction in fractions {
        acc += fraction;
        bounds.push(acc);
    }

    let step = 2.0 / side as f64;
    for i in 0..side {
        let x = -1.0 + step * (i as f64 + 0.5);
        for j in 0..side {
            let y = -1.0 + step * (j as f64 + 0.5);
            if x * x + y * y > 1.0 {
                continue;
            }
            let angle = (FRAC_PI_2 - y.atan2(x)).rem_euclid(TAU) / TAU;
            let slot = bounds
                .iter()
                .position(|bound| angle < *bound)
                .unwrap_or(fractions.len() - 1);
            buckets[slot].push((x, y));
        }
    }
    buckets
}

/// Returns something like `████████░░  80%`.
#[must_use]
pub fn percentage_bar(percent: f64, width: usize) -> String {
    let ratio = (percent / 100.0).clamp(0.0, 1.0);
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let empty = width - filled;
    format!(
        "{}{} {:>5.1}%",
        "█".repeat(filled),
        "░".repeat(empty),
        percent
    )
}

/// Largest square (in braille dots) centered in `area`.
fn square_area(area: Rect) -> Rect {
    // A cell holds 2x4 dots and is about twice as tall as it is wide.
    let width = area.width.min(area.height.saturating_mul(2));
    let height = width / 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn bar_width(available: u16, months: usize) -> u16 {
    let months = u16::try_from(months.max(1)).unwrap_or(u16::MAX);
    let per_group = available / months;
    (per_group.saturating_sub(2) / 2).clamp(1, 9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pie_points_split_by_fraction() {
        let buckets = pie_points(&[0.25, 0.75], 40);
        let total: usize = buckets.iter().map(Vec::len).sum();
        let share = buckets[0].len() as f64 / total as f64;
        assert!((share - 0.25).abs() < 0.03, "share was {share}");
        // First slice sits in the top-right quadrant.
        assert!(buckets[0].iter().all(|(x, y)| *x >= 0.0 && *y >= 0.0));
    }

    #[test]
    fn single_slice_covers_the_disc() {
        let buckets = pie_points(&[1.0], 10);
        assert_eq!(buckets.len(), 1);
        assert!(!buckets[0].is_empty());
    }

    #[test]
    fn percentage_bar_fills_proportionally() {
        assert_eq!(percentage_bar(50.0, 4), "██░░  50.0%");
        assert_eq!(percentage_bar(0.0, 2), "░░   0.0%");
    }
}
