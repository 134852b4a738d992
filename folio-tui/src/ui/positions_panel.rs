//! Positions panel (2): the holdings table with a row cursor.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use folio_core::view::table::COLUMNS;
use folio_core::view::TableRow;

use crate::app::AppState;
use crate::theme;

const WIDTHS: [Constraint; 9] = [
    Constraint::Length(8),
    Constraint::Length(8),
    Constraint::Length(15),
    Constraint::Length(14),
    Constraint::Length(13),
    Constraint::Length(13),
    Constraint::Length(12),
    Constraint::Length(9),
    Constraint::Length(8),
];

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let table = &app.render().table;

    if let [TableRow::Placeholder(message)] = table.rows.as_slice() {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(*message, theme::muted())),
            Line::from(""),
            Line::from(Span::styled("[a]dd a position or [s]ample data", theme::muted())),
        ];
        f.render_widget(Paragraph::new(lines), area);
        return;
    }

    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c))).style(theme::accent_bold());

    let rows = table.positions().enumerate().map(|(i, row)| {
        let is_cursor = i == app.table_cursor;
        let base = if is_cursor {
            theme::accent().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let sign = |style: Style| if is_cursor { base } else { style };

        let [ticker, shares, purchase, current, value, cost, gain, ret, action] = row.cells();
        Row::new(vec![
            Cell::from(ticker).style(base.add_modifier(Modifier::BOLD)),
            Cell::from(shares).style(base),
            Cell::from(purchase).style(base),
            Cell::from(current).style(base),
            Cell::from(value).style(base),
            Cell::from(cost).style(base),
            Cell::from(gain).style(sign(theme::sign_style(row.gain_loss.sign))),
            Cell::from(ret).style(sign(theme::sign_style(row.return_pct.sign))),
            Cell::from(format!("[d] {action}")).style(if is_cursor { base } else { theme::negative() }),
        ])
    });

    let widget = Table::new(rows, WIDTHS).header(header).column_spacing(1);
    f.render_widget(widget, area);
}
