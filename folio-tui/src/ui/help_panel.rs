//! Help panel (5): keyboard shortcuts.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::theme;

pub fn render(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    section(&mut lines, "Global");
    key(&mut lines, "1-5", "Switch to panel by number");
    key(&mut lines, "Tab / Shift+Tab", "Cycle panels forward / back");
    key(&mut lines, "a", "Add a position");
    key(&mut lines, "s", "Replace everything with sample data");
    key(&mut lines, "C", "Clear all positions (asks first)");
    key(&mut lines, "r", "Reload portfolio and risk metrics");
    key(&mut lines, "e", "Open error history");
    key(&mut lines, "q", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Add Form");
    key(&mut lines, "Tab / Shift+Tab", "Next / previous field");
    key(&mut lines, "Enter", "Submit (values go to the server as typed)");
    key(&mut lines, "Esc", "Cancel");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 2 - Positions");
    key(&mut lines, "j / k", "Move cursor down / up");
    key(&mut lines, "d", "Delete the selected position (asks first)");
    lines.push(Line::from(""));

    section(&mut lines, "Panel 4 - History");
    key(&mut lines, "j / k", "Move through tickers");
    key(&mut lines, "Enter", "Load price history for the ticker");
    lines.push(Line::from(""));

    section(&mut lines, "Overlays");
    key(&mut lines, "y / n", "Answer a confirmation");
    key(&mut lines, "Enter", "Dismiss an alert");

    f.render_widget(Paragraph::new(lines), area);
}

fn section<'a>(lines: &mut Vec<Line<'a>>, title: &str) {
    lines.push(Line::from(Span::styled(title.to_string(), theme::accent_bold())));
}

fn key<'a>(lines: &mut Vec<Line<'a>>, keys: &str, desc: &str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {:>20}  ", keys), theme::accent()),
        Span::styled(desc.to_string(), theme::muted()),
    ]));
}
