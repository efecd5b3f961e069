use std::time::Instant;

use aics_core::Modal;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, FocusPane, InputMode};
use crate::form::{FormState, TextInput};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(Instant::now()),
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // An open form captures all input
    if app.form.is_some() {
        handle_form_key(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,

        KeyCode::Tab => app.focus = app.focus.next(),

        // Start typing
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.focus = FocusPane::Input;
            app.input_mode = InputMode::Editing;
        }

        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            FocusPane::Panel => app.panel_nav_down(),
            _ => app.scroll_down(1),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            FocusPane::Panel => app.panel_nav_up(),
            _ => app.scroll_up(1),
        },
        KeyCode::Char('h') | KeyCode::Left if app.focus == FocusPane::Chips => app.chip_prev(),
        KeyCode::Char('l') | KeyCode::Right if app.focus == FocusPane::Chips => app.chip_next(),
        KeyCode::Char('g') => app.scroll_to_top(),
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),

        // Half-page scroll
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page(true);
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_half_page(false);
        }

        KeyCode::Enter | KeyCode::Char(' ') => match app.focus {
            FocusPane::Chips => app.click_chip(app.selected_chip, Instant::now()),
            FocusPane::Panel => app.activate_panel_item(),
            FocusPane::Input => app.input_mode = InputMode::Editing,
            FocusPane::Chat => {}
        },

        // Chips by number
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.selected_chip = index;
            app.click_chip(index, Instant::now());
        }

        KeyCode::Char('a') => app.apply_changes(),
        KeyCode::Char('p') => app.toggle_panel(),
        KeyCode::Char('t') => app.toggle_timestamps(),

        // Setup forms
        KeyCode::Char('L') => app.open_form(Modal::Location),
        KeyCode::Char('P') => app.open_form(Modal::Pstn),
        KeyCode::Char('N') => app.open_form(Modal::PhoneNumbers),

        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Tab => {
            app.input_mode = InputMode::Normal;
            app.focus = app.focus.next();
        }
        KeyCode::Enter => {
            if !app.query.is_empty() {
                app.submit_query(Instant::now());
            }
        }
        _ => edit_text(&mut app.query, key),
    }
}

/// Shared cursor editing for every single line text box
fn edit_text(input: &mut TextInput, key: KeyEvent) {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char(c) => input.insert(c),
        _ => {}
    }
}

fn handle_form_key(app: &mut App, key: KeyEvent) {
    let Some(form) = app.form.as_mut() else {
        return;
    };

    match form {
        FormState::Location(location) => match key.code {
            KeyCode::Esc => app.close_form(),
            KeyCode::Enter => app.save_form(),
            KeyCode::Tab | KeyCode::Down => location.next_field(),
            KeyCode::BackTab | KeyCode::Up => location.prev_field(),
            KeyCode::Left if location.focused_field().choices().is_some() => {
                location.cycle_choice(false)
            }
            KeyCode::Right if location.focused_field().choices().is_some() => {
                location.cycle_choice(true)
            }
            // Choice fields are picked, not typed
            KeyCode::Char(_) if location.focused_field().choices().is_some() => {}
            _ => edit_text(location.focused_input_mut(), key),
        },
        FormState::Pstn(pstn) => match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                if !pstn.back() {
                    app.close_form();
                }
            }
            KeyCode::Char('j') | KeyCode::Down => pstn.nav_down(),
            KeyCode::Char('k') | KeyCode::Up => pstn.nav_up(),
            KeyCode::Enter => app.save_form(),
            _ => {}
        },
        FormState::PhoneNumbers(numbers) => match key.code {
            KeyCode::Esc => app.close_form(),
            KeyCode::Enter => app.save_form(),
            KeyCode::Tab | KeyCode::BackTab => numbers.checkbox_focused = !numbers.checkbox_focused,
            KeyCode::Char(' ') if numbers.checkbox_focused => {
                numbers.activate_later = !numbers.activate_later
            }
            _ if numbers.checkbox_focused => {}
            _ => edit_text(&mut numbers.input, key),
        },
    }
}

fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.form.is_some() {
        return;
    }

    let x = mouse.column;
    let y = mouse.row;

    // Determine which area the mouse is in (position-based scrolling)
    let in_chat = app.chat_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_panel = app.panel_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_input = app.input_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_chat {
                app.scroll_down(3);
            } else if in_panel {
                app.panel_nav_down();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_chat {
                app.scroll_up(3);
            } else if in_panel {
                app.panel_nav_up();
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.chip_areas.iter().position(|r| point_in_rect(x, y, *r)) {
                app.focus = FocusPane::Chips;
                app.selected_chip = index;
                app.click_chip(index, Instant::now());
            } else if in_chat {
                app.focus = FocusPane::Chat;
            } else if in_panel {
                app.focus = FocusPane::Panel;
            } else if in_input {
                app.focus = FocusPane::Input;
                app.input_mode = InputMode::Editing;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aics_core::Config;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    fn app() -> App {
        let mut app = App::new(Config {
            reply_delay_ms: 0,
            ..Config::new()
        })
        .unwrap();
        app.config_path = None;
        app
    }

    #[test]
    fn test_typing_and_sending() {
        let mut app = app();
        type_text(&mut app, "help");
        assert_eq!(app.query.value, "help");

        handle_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.query.is_empty());
        handle_event(&mut app, AppEvent::Tick).unwrap();
        assert_eq!(app.conversation.messages().len(), 3);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        let event = AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        handle_event(&mut app, event).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_only_quits_in_normal_mode() {
        let mut app = app();
        type_text(&mut app, "q");
        assert!(!app.should_quit);

        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        handle_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(app.should_quit);
    }

    #[test]
    fn test_number_key_clicks_chip() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        handle_event(&mut app, key(KeyCode::Char('2'))).unwrap();
        assert!(matches!(app.form, Some(FormState::Location(_))));

        // form swallows normal mode keys
        handle_event(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!app.should_quit);
        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.form.is_none());
    }

    #[test]
    fn test_location_form_keys() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        handle_event(&mut app, key(KeyCode::Char('L'))).unwrap();

        type_text(&mut app, "Branch");
        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "zz");
        handle_event(&mut app, key(KeyCode::Right)).unwrap();
        handle_event(&mut app, key(KeyCode::Right)).unwrap();
        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "200 King St");
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();

        assert!(app.form.is_none());
        let last = app.conversation.messages().last().unwrap();
        assert!(last.content.contains("Location \"Branch\""));
        assert!(last.content.contains("Country: CA"));
    }

    #[test]
    fn test_phone_numbers_form_keys() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        handle_event(&mut app, key(KeyCode::Char('N'))).unwrap();

        handle_event(&mut app, key(KeyCode::Enter)).unwrap();
        assert!(app.form.as_ref().and_then(|f| f.error()).is_some());

        type_text(&mut app, "4507832223, 4507832224");
        handle_event(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, " ");
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();

        assert!(app.form.is_none());
        let last = app.conversation.messages().last().unwrap();
        assert!(last.content.contains("Successfully added 2 phone numbers!"));
        assert!(last.content.contains("activated later"));
    }

    #[test]
    fn test_pstn_escape_goes_back_first() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        handle_event(&mut app, key(KeyCode::Char('P'))).unwrap();
        handle_event(&mut app, key(KeyCode::Down)).unwrap();
        handle_event(&mut app, key(KeyCode::Enter)).unwrap();

        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.form.is_some());
        handle_event(&mut app, key(KeyCode::Esc)).unwrap();
        assert!(app.form.is_none());
    }

    #[test]
    fn test_point_in_rect() {
        let rect = Rect::new(2, 2, 4, 2);
        assert!(point_in_rect(2, 2, rect));
        assert!(point_in_rect(5, 3, rect));
        assert!(!point_in_rect(6, 3, rect));
        assert!(!point_in_rect(1, 2, rect));
    }

    #[test]
    fn test_t_toggles_timestamps() {
        let mut app = app();
        app.input_mode = InputMode::Normal;
        handle_event(&mut app, key(KeyCode::Char('t'))).unwrap();
        assert!(!app.config.show_timestamps);
    }
}
