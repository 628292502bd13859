use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};
use crate::data::Metric;

/// Default file for `e` exports.
pub const ROWS_EXPORT_FILE: &str = "health_data.csv";
/// Default file for `x` exports.
pub const REPORT_EXPORT_FILE: &str = "health_report.json";

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow stepping through metrics while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_selected(true),
            KeyCode::Char('-') | KeyCode::Char('_') => app.adjust_selected(false),
            _ => {}
        }
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Dashboard),
        KeyCode::Char('2') => app.set_view(View::Nutrition),
        KeyCode::Char('3') => app.set_view(View::Report),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Reading edits apply to the Dashboard selection
        KeyCode::Char('+') | KeyCode::Char('=') if app.current_view == View::Dashboard => {
            app.adjust_selected(true)
        }
        KeyCode::Char('-') | KeyCode::Char('_') if app.current_view == View::Dashboard => {
            app.adjust_selected(false)
        }
        KeyCode::Char('d') => app.reset_readings(),
        KeyCode::Char('a') => app.record_readings(),

        // Series
        KeyCode::Char('g') => app.next_sample(),
        KeyCode::Char('m') => app.toggle_sample_kind(),

        KeyCode::Char('r') => match app.reload_data() {
            Ok(true) => app.set_status_message("Readings reloaded".to_string()),
            Ok(false) => app.set_status_message("No new readings".to_string()),
            Err(e) => app.set_status_message(format!("Reload failed: {}", e)),
        },

        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => {
            let export_path = PathBuf::from(ROWS_EXPORT_FILE);
            match app.export_rows(&export_path) {
                Ok(rows) => app.set_status_message(format!(
                    "Exported {} rows to {}",
                    rows,
                    export_path.display()
                )),
                Err(e) => app.set_status_message(format!("Export failed: {}", e)),
            }
        }
        KeyCode::Char('x') => {
            let export_path = PathBuf::from(REPORT_EXPORT_FILE);
            match app.export_report(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            // Content rows start after the block border and table header
            if clicked_row > content_start_row + 1 {
                let item_row = (clicked_row - content_start_row - 2) as usize;

                match app.current_view {
                    View::Dashboard => {
                        if item_row < Metric::ALL.len() {
                            app.selected_metric_index = item_row;
                        }
                    }
                    View::Nutrition => {
                        // Advice list sits below a one-line banner and has no header
                        let count = app.data.as_ref().map_or(0, |d| d.result.advice.len());
                        if item_row < count {
                            app.selected_advice_index = item_row;
                        }
                    }
                    View::Report => {}
                }
            }

            // Tab clicks (row 1, after header)
            if clicked_row == 1 {
                let col = mouse.column;
                // Approximate tab positions: Dashboard (0-13), Nutrition (14-27), Report (28-37)
                if col < 14 {
                    app.set_view(View::Dashboard);
                } else if col < 28 {
                    app.set_view(View::Nutrition);
                } else if col < 38 {
                    app.set_view(View::Report);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::source::ManualSource;
    use crate::ui::Theme;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn app() -> App {
        let settings = Settings::default();
        let source = ManualSource::new(settings.ranges.defaults().into());
        App::with_theme(Box::new(source), settings, Theme::dark())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(
            app,
            KeyEvent {
                code,
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Press,
                state: KeyEventState::NONE,
            },
        );
    }

    #[test]
    fn plus_and_minus_step_selected_metric() {
        let mut app = app();
        press(&mut app, KeyCode::Down); // systolic
        press(&mut app, KeyCode::Char('+'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.readings.get(Metric::SystolicBp), Some(122.0));
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.readings.get(Metric::SystolicBp), Some(121.0));
    }

    #[test]
    fn edits_ignored_outside_dashboard() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.readings.get(Metric::HeartRate), Some(75.0));
    }

    #[test]
    fn help_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn overlay_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert!(app.show_detail_overlay);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.readings.get(Metric::HeartRate), Some(76.0));
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_detail_overlay);
        assert!(app.running);
    }

    #[test]
    fn tab_click_switches_view() {
        let mut app = app();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 20,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, click, 2);
        assert_eq!(app.current_view, View::Nutrition);
    }

    #[test]
    fn row_click_selects_metric() {
        let mut app = app();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 6,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_event(&mut app, click, 2);
        assert_eq!(app.selected_metric_index, 2);
    }
}
