//! Bottom status bar: backend, pending requests, last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " 1:Overview 2:Positions 3:Charts 4:History 5:Help",
        theme::muted(),
    ));
    spans.push(Span::raw(" | "));
    spans.push(Span::styled(format!("[{}]", app.backend), theme::neutral()));

    if app.in_flight > 0 {
        spans.push(Span::styled(
            format!(" loading ({})", app.in_flight),
            theme::warning(),
        ));
    }

    spans.push(Span::raw(" | "));

    if let Some((msg, level)) = &app.status_message {
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
