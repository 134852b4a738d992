//! Keyboard input dispatch: overlays, then global keys, then the active panel.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use folio_core::controller::Command;

use crate::app::{AppState, Overlay, Panel};

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::AddForm => {
            handle_form_overlay(app, key);
            return;
        }
        Overlay::Confirm(_) => {
            handle_confirm_overlay(app, key);
            return;
        }
        Overlay::Alert(_) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                app.close_overlay();
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys (always available).
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(panel) = Panel::from_index(c as usize - '1' as usize) {
                app.active_panel = panel;
            }
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.active_panel = app.active_panel.prev();
            } else {
                app.active_panel = app.active_panel.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.active_panel = app.active_panel.prev();
            return;
        }
        KeyCode::Char('a') => {
            app.overlay = Overlay::AddForm;
            return;
        }
        KeyCode::Char('C') => {
            app.request_clear();
            return;
        }
        KeyCode::Char('s') => {
            app.send(Command::LoadSampleData);
            app.set_status("Loading sample data…");
            return;
        }
        KeyCode::Char('r') => {
            app.reload();
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        _ => {}
    }

    // 3. Panel-specific keys.
    match app.active_panel {
        Panel::Positions => handle_positions_key(app, key),
        Panel::History => handle_history_key(app, key),
        Panel::Overview | Panel::Charts | Panel::Help => {} // display only
    }
}

fn handle_form_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_overlay(),
        KeyCode::Enter => app.submit_form(),
        KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.form.focus_prev(),
        KeyCode::Backspace => app.form.pop(),
        KeyCode::Char(c) => app.form.push(c),
        _ => {}
    }
}

fn handle_confirm_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_confirm(true),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.answer_confirm(false),
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.close_overlay();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_positions_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.render().table.rows.len();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.table_cursor + 1 < row_count {
                app.table_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.table_cursor = app.table_cursor.saturating_sub(1);
        }
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete(),
        _ => {}
    }
}

fn handle_history_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.move_selector(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selector(-1),
        KeyCode::Enter => app.select_history_ticker(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::Harness;

    fn press(h: &mut Harness, code: KeyCode) {
        handle_key(&mut h.app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_str(h: &mut Harness, s: &str) {
        for c in s.chars() {
            press(h, KeyCode::Char(c));
        }
    }

    #[test]
    fn number_keys_switch_panels() {
        let mut h = Harness::new();
        press(&mut h, KeyCode::Char('4'));
        assert_eq!(h.app.active_panel, Panel::History);
        press(&mut h, KeyCode::Tab);
        assert_eq!(h.app.active_panel, Panel::Help);
    }

    #[test]
    fn form_keys_go_to_form_not_globals() {
        let mut h = Harness::new();
        press(&mut h, KeyCode::Char('a'));
        assert_eq!(h.app.overlay, Overlay::AddForm);

        // 'q' and 's' are text while the form is open.
        type_str(&mut h, "qs");
        assert!(h.app.running);
        assert_eq!(h.app.form.fields[0], "qs");

        press(&mut h, KeyCode::Backspace);
        press(&mut h, KeyCode::Tab);
        type_str(&mut h, "10");
        assert_eq!(h.app.form.fields, ["q".to_string(), "10".into(), "".into(), "".into()]);

        press(&mut h, KeyCode::Esc);
        assert_eq!(h.app.overlay, Overlay::None);
    }

    #[test]
    fn add_through_keyboard() {
        let mut h = Harness::new();
        press(&mut h, KeyCode::Char('a'));
        type_str(&mut h, "NVDA");
        press(&mut h, KeyCode::Tab);
        type_str(&mut h, "2");
        press(&mut h, KeyCode::Tab);
        type_str(&mut h, "400");
        press(&mut h, KeyCode::Tab);
        type_str(&mut h, "900");
        press(&mut h, KeyCode::Enter);
        h.drain();

        assert_eq!(h.api.position_count(), 1);
        assert!(matches!(h.app.overlay, Overlay::Alert(_)));
        press(&mut h, KeyCode::Enter);
        assert_eq!(h.app.overlay, Overlay::None);
    }

    #[test]
    fn delete_needs_yes() {
        let mut h = Harness::new();
        press(&mut h, KeyCode::Char('s'));
        h.drain();
        press(&mut h, KeyCode::Enter);

        press(&mut h, KeyCode::Char('2'));
        press(&mut h, KeyCode::Char('j'));
        press(&mut h, KeyCode::Char('d'));
        assert!(matches!(h.app.overlay, Overlay::Confirm(_)));
        press(&mut h, KeyCode::Char('x')); // ignored
        press(&mut h, KeyCode::Char('n'));
        h.drain();
        assert_eq!(h.api.position_count(), 5);

        press(&mut h, KeyCode::Char('d'));
        press(&mut h, KeyCode::Char('y'));
        h.drain();
        assert_eq!(h.api.position_count(), 4);
        assert!(h.app.render().table.positions().all(|row| row.ticker != "GOOGL"));
    }

    #[test]
    fn quit_key() {
        let mut h = Harness::new();
        press(&mut h, KeyCode::Char('q'));
        assert!(!h.app.running);
    }
}
