//! Charts panel (3): allocation shares and per-position returns.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph};

use folio_core::view::{AllocationChart, ReturnsChart};

use crate::app::AppState;
use crate::theme;

/// Bar values are integers; returns are scaled to keep two decimals.
const RETURN_SCALE: f64 = 100.0;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let charts = &app.render().charts;
    match charts.allocation.get() {
        Some(chart) => render_allocation(f, chunks[0], chart),
        None => render_waiting(f, chunks[0], "Portfolio Allocation"),
    }
    match charts.returns.get() {
        Some(chart) => render_returns(f, chunks[1], chart),
        None => render_waiting(f, chunks[1], "Returns by Position"),
    }
}

fn titled(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(Span::styled(format!(" {title} "), theme::accent_bold()))
}

fn render_waiting(f: &mut Frame, area: Rect, title: &str) {
    let para = Paragraph::new(Span::styled("Loading…", theme::muted())).block(titled(title));
    f.render_widget(para, area);
}

/// One proportional strip per slice, followed by the legend text.
fn render_allocation(f: &mut Frame, area: Rect, chart: &AllocationChart) {
    let block = titled("Portfolio Allocation");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width.saturating_sub(2) as f64;
    let legend = chart.legend();
    let mut lines: Vec<Line> = Vec::new();

    for (i, slice) in chart.slices.iter().enumerate() {
        let share = if chart.is_placeholder() {
            100.0
        } else {
            chart.share_pct(i)
        };
        let cells = strip_cells(share, width);
        let style = Style::default().fg(theme::rgb(slice.color));
        lines.push(Line::from(Span::styled("█".repeat(cells.max(1)), style)));

        let text = legend.get(i).cloned().unwrap_or_else(|| slice.label.clone());
        lines.push(Line::from(Span::styled(text, theme::muted())));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Horizontal bars; length is the magnitude, colour the sign.
fn render_returns(f: &mut Frame, area: Rect, chart: &ReturnsChart) {
    let (lo, hi) = chart.value_range();
    let max = (lo.abs().max(hi.abs()) * RETURN_SCALE).ceil() as u64;

    let bars: Vec<Bar> = chart
        .bars
        .iter()
        .map(|b| {
            let color = theme::rgb(b.color);
            Bar::default()
                .value((b.value.abs() * RETURN_SCALE).round() as u64)
                .label(Line::from(b.label.clone()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(color))
                .text_value(ReturnsChart::tick_label(b.value))
        })
        .collect();

    let widget = BarChart::default()
        .block(titled(ReturnsChart::SERIES_LABEL))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1)
        .max(max.max(1));
    f.render_widget(widget, area);
}

/// Strip length for a percentage share; out-of-range shares are pinned to 0..=100.
fn strip_cells(share: f64, width: f64) -> usize {
    let share = if share.is_finite() {
        share.clamp(0.0, 100.0)
    } else {
        0.0
    };
    ((share / 100.0) * width).round() as usize
}
