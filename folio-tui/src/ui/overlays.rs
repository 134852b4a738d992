//! Overlay widgets: add form, confirmation, alert, error history.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use folio_core::controller::{Notice, NoticeLevel};

use crate::app::{AddForm, AppState};
use crate::theme;
use crate::ui::centered_rect;

/// Add-position form.
pub fn render_form(f: &mut Frame, area: Rect, form: &AddForm) {
    let popup = centered_rect(50, 40, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Add Position [Tab]next [Enter]add [Esc]cancel ")
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for (i, (label, value)) in AddForm::LABELS.iter().zip(form.fields.iter()).enumerate() {
        let focused = i == form.focus;
        let marker = if focused { "> " } else { "  " };
        let value_style = if focused {
            theme::accent_bold()
        } else {
            theme::accent()
        };
        let mut spans = vec![
            Span::styled(marker, theme::accent()),
            Span::styled(format!("{:>15}: ", label), theme::muted()),
            Span::styled(value.as_str(), value_style),
        ];
        if focused {
            spans.push(Span::styled("_", theme::accent()));
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), inner);
}

/// Yes/no question guarding a destructive command.
pub fn render_confirm(f: &mut Frame, area: Rect, prompt: &str) {
    let popup = centered_rect(60, 25, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::warning())
        .title(" Confirm [y]es [n]o ")
        .title_style(theme::warning());

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(prompt.to_string(), theme::accent_bold())),
        Line::from(""),
        Line::from(Span::styled("Press y to confirm, n or Esc to cancel.", theme::muted())),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Blocking notice; dismissed with Enter.
pub fn render_alert(f: &mut Frame, area: Rect, notice: &Notice) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let style = match notice.level {
        NoticeLevel::Info => theme::positive(),
        NoticeLevel::Warning => theme::warning(),
        NoticeLevel::Error => theme::negative(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(" [Enter]ok ")
        .title_style(style);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(notice.message.as_str(), style.add_modifier(Modifier::BOLD))),
    ];

    let para = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, popup);
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().take(end).skip(start) {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
