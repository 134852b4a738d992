//! History panel (4): ticker selector and price line chart.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Paragraph};

use folio_core::view::{HistoricalChart, TickerSelector};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(18), Constraint::Min(20)])
        .split(area);

    render_selector(f, chunks[0], &app.render().selector);

    match app.render().charts.historical.get() {
        Some(chart) if !chart.is_empty() => render_chart(f, chunks[1], chart),
        Some(chart) => render_empty(f, chunks[1], &format!("No price history for {}.", chart.ticker)),
        None => render_empty(
            f,
            chunks[1],
            &format!(
                "Pick a ticker and press Enter to load its last {} days of prices.",
                app.dashboard.history_days()
            ),
        ),
    }
}

fn render_selector(f: &mut Frame, area: Rect, selector: &TickerSelector) {
    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Ticker", theme::accent_bold()))];
    for (i, entry) in selector.entries().enumerate() {
        let style = if i == selector.cursor() {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else if i == 0 {
            theme::muted()
        } else {
            theme::accent()
        };
        lines.push(Line::from(Span::styled(format!(" {entry}"), style)));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn render_empty(f: &mut Frame, area: Rect, message: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme::muted())),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_chart(f: &mut Frame, area: Rect, chart: &HistoricalChart) {
    let Some((y_min, y_max)) = chart.y_bounds() else {
        return;
    };
    let x_max = chart.prices.len().saturating_sub(1) as f64;
    let data = chart.points();

    let dataset = Dataset::default()
        .name(chart.label.as_str())
        .marker(symbols::Marker::Braille)
        .style(Style::default().fg(theme::rgb(chart.color)))
        .graph_type(GraphType::Line)
        .data(&data);

    let first = chart.dates.first().map(String::as_str).unwrap_or("");
    let last = chart.dates.last().map(String::as_str).unwrap_or("");

    let widget = Chart::new(vec![dataset])
        .x_axis(
            Axis::default()
                .title(Span::styled("Date", theme::muted()))
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first.to_string(), theme::muted()),
                    Span::styled(last.to_string(), theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Price", theme::muted()))
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(HistoricalChart::tick_label(y_min), theme::muted()),
                    Span::styled(HistoricalChart::tick_label(y_max), theme::muted()),
                ]),
        );

    f.render_widget(widget, area);
}
