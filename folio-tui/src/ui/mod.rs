//! Top-level UI layout: one bordered panel with a status bar underneath.

pub mod charts_panel;
pub mod help_panel;
pub mod history_panel;
pub mod overlays;
pub mod overview_panel;
pub mod positions_panel;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::app::{AppState, Overlay, Panel};
use crate::theme;

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    // Split: main area + 1-line status bar.
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());

    let main_area = chunks[0];
    let status_area = chunks[1];

    draw_panel(f, main_area, app);
    status_bar::render(f, status_area, app);

    // Overlays on top.
    match &app.overlay {
        Overlay::AddForm => overlays::render_form(f, main_area, &app.form),
        Overlay::Confirm(pending) => overlays::render_confirm(f, main_area, &pending.prompt),
        Overlay::Alert(notice) => overlays::render_alert(f, main_area, notice),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Draw a single panel with its border.
fn draw_panel(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = app.active_panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(format!(" {} [{}] ", panel.label(), panel.index() + 1))
        .title_style(theme::panel_title(true));

    let inner = block.inner(area);
    f.render_widget(block, area);

    match panel {
        Panel::Overview => overview_panel::render(f, inner, app),
        Panel::Positions => positions_panel::render(f, inner, app),
        Panel::Charts => charts_panel::render(f, inner, app),
        Panel::History => history_panel::render(f, inner, app),
        Panel::Help => help_panel::render(f, inner),
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::tests::Harness;
    use folio_core::controller::Command;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    /// Draw the app into a 120x40 buffer and return it as text.
    pub(crate) fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn loaded() -> Harness {
        let mut h = Harness::new();
        h.app.send(Command::LoadSampleData);
        h.drain();
        h.app.close_overlay();
        h
    }

    #[test]
    fn every_panel_draws_empty_state() {
        let mut h = Harness::new();
        for panel in Panel::ALL {
            h.app.active_panel = panel;
            let text = screen(&h.app);
            assert!(text.contains(panel.label()));
        }
    }

    #[test]
    fn every_panel_draws_with_data() {
        let mut h = loaded();
        for panel in Panel::ALL {
            h.app.active_panel = panel;
            screen(&h.app);
        }
        h.app.active_panel = Panel::Overview;
        assert!(screen(&h.app).contains("$210,525"));
    }

    #[test]
    fn history_prompt_names_the_window() {
        let mut h = Harness::new();
        h.app.active_panel = Panel::History;
        assert!(screen(&h.app).contains("load its last 30 days of prices"));
    }

    #[test]
    fn overlays_draw() {
        let mut h = loaded();
        h.app.overlay = Overlay::AddForm;
        assert!(screen(&h.app).contains("Purchase Price"));

        h.app.request_clear();
        assert!(screen(&h.app).contains("clear ALL positions"));

        h.app.overlay = Overlay::ErrorHistory;
        assert!(screen(&h.app).contains("No errors recorded."));
    }

    #[test]
    fn centered_rect_is_inside() {
        let area = Rect::new(0, 0, 100, 50);
        let r = centered_rect(60, 40, area);
        assert!(r.x >= area.x && r.right() <= area.right());
        assert!(r.y >= area.y && r.bottom() <= area.bottom());
    }
}
