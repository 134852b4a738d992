//! Overview panel (1): summary cards and risk metrics.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use folio_core::view::{SignedText, SummaryCards};

use crate::app::AppState;
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    render_cards(f, chunks[0], app.render().summary.as_ref());
    render_risk(f, chunks[1], app);
}

fn render_cards(f: &mut Frame, area: Rect, summary: Option<&SummaryCards>) {
    let Some(s) = summary else {
        let msg = Paragraph::new(Span::styled("Loading portfolio…", theme::muted()));
        f.render_widget(msg, area);
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    card(f, cols[0], "Total Value", Span::styled(s.total_value.as_str(), theme::accent_bold()));
    card(f, cols[1], "Total Cost", Span::styled(s.total_cost.as_str(), theme::accent_bold()));
    card(f, cols[2], "Gain/Loss", signed(&s.gain_loss));
    card(f, cols[3], "Return", signed(&s.overall_return));
    card(
        f,
        cols[4],
        "Positions",
        Span::styled(s.num_positions.to_string(), theme::neutral()),
    );
}

fn signed(text: &SignedText) -> Span<'_> {
    Span::styled(text.text.as_str(), theme::sign_style(text.sign))
}

fn card(f: &mut Frame, area: Rect, title: &str, value: Span) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::muted())
        .title(Span::styled(format!(" {title} "), theme::muted()));
    let para = Paragraph::new(vec![Line::from(""), Line::from(value)]).block(block);
    f.render_widget(para, area);
}

fn render_risk(f: &mut Frame, area: Rect, app: &AppState) {
    let mut lines: Vec<Line> = vec![
        Line::from(""),
        Line::from(Span::styled("Risk Metrics", theme::accent_bold())),
    ];

    match &app.render().risk {
        Some(risk) => {
            for (label, value) in risk.fields() {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:>20}: ", label), theme::muted()),
                    Span::styled(value.to_string(), theme::accent()),
                ]));
            }
        }
        None => lines.push(Line::from(Span::styled("  Loading risk metrics…", theme::muted()))),
    }

    f.render_widget(Paragraph::new(lines), area);
}
