//! Input handling for TUI

use crate::app::{App, AppMode, Direction};
use crossterm::event::{KeyCode, KeyModifiers};
use keysmith::{DialogResult, PresetId};
use std::time::Instant;

/// Handle special keybindings, returns true if handled
pub fn handle_keybinding(app: &mut App, modifiers: KeyModifiers, code: KeyCode) -> bool {
    let now = Instant::now();
    match (modifiers, code) {
        // Ctrl+Q: Quit
        (KeyModifiers::CONTROL, KeyCode::Char('q' | 'Q')) => {
            app.quit();
            true
        }
        // Ctrl+T: Open theme picker
        (KeyModifiers::CONTROL, KeyCode::Char('t' | 'T')) => {
            app.open_theme_picker();
            true
        }
        // Ctrl+G: Generate a theme from a description
        (KeyModifiers::CONTROL, KeyCode::Char('g' | 'G')) => {
            app.open_theme_prompt();
            true
        }
        // Ctrl+A: Assist
        (KeyModifiers::CONTROL, KeyCode::Char('a' | 'A')) => {
            app.request_assist();
            true
        }
        // Ctrl+R: Step corner radius
        (KeyModifiers::CONTROL, KeyCode::Char('r' | 'R')) => {
            app.cycle_radius();
            true
        }
        // Ctrl+B: Background color
        (KeyModifiers::CONTROL, KeyCode::Char('b' | 'B')) => {
            app.open_color_prompt();
            true
        }
        // F1-F3: Accept suggestion
        (_, KeyCode::F(n @ 1..=3)) => {
            app.accept_suggestion(usize::from(n - 1), now);
            true
        }
        // Alt+1-3: Also accept suggestion (more compatible)
        (KeyModifiers::ALT, KeyCode::Char(c @ '1'..='3')) => {
            let index = (c as usize) - ('1' as usize);
            app.accept_suggestion(index, now);
            true
        }
        _ => false,
    }
}

/// Handle typing mode keys: grid navigation and physical typing
pub fn handle_typing_input(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    let now = Instant::now();
    match code {
        KeyCode::Up => app.move_cursor(Direction::Up),
        KeyCode::Down => app.move_cursor(Direction::Down),
        KeyCode::Left => app.move_cursor(Direction::Left),
        KeyCode::Right => app.move_cursor(Direction::Right),
        KeyCode::Tab => app.press_selected_key(now),
        KeyCode::Backspace => {
            app.session.delete_last(now);
        }
        KeyCode::Enter => {
            app.session.insert_text("\n", now);
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            let mut buf = [0u8; 4];
            app.session.insert_text(c.encode_utf8(&mut buf), now);
        }
        _ => {}
    }
}

/// Handle theme picker keyboard input
pub fn handle_theme_picker_input(app: &mut App, code: KeyCode) {
    let themes = PresetId::all();
    let theme_count = themes.len();

    match code {
        KeyCode::Up | KeyCode::Char('k') => {
            if app.theme_picker_index > 0 {
                app.theme_picker_index -= 1;
            } else {
                app.theme_picker_index = theme_count.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.theme_picker_index < theme_count.saturating_sub(1) {
                app.theme_picker_index += 1;
            } else {
                app.theme_picker_index = 0;
            }
        }
        KeyCode::Enter => {
            if let Some(id) = themes.get(app.theme_picker_index) {
                app.apply_preset(*id);
            }
            app.mode = AppMode::Typing;
        }
        KeyCode::Esc | KeyCode::Char('q') => {
            app.mode = AppMode::Typing;
        }
        _ => {}
    }
}

/// Route a key to whichever prompt dialog is open
pub fn handle_prompt_input(app: &mut App, code: KeyCode) {
    match app.mode {
        AppMode::ThemePrompt => match app.theme_dialog.handle_key(code) {
            Some(DialogResult::Submit(prompt)) => app.submit_theme_prompt(&prompt),
            Some(DialogResult::Cancel) => app.mode = AppMode::Typing,
            None => {}
        },
        AppMode::ColorPrompt => match app.color_dialog.handle_key(code) {
            Some(DialogResult::Submit(value)) => app.submit_color(&value),
            Some(DialogResult::Cancel) => app.mode = AppMode::Typing,
            None => {}
        },
        AppMode::Typing | AppMode::ThemePicker => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keysmith::{Assistant, Session, ThemePatch};
    use std::sync::Arc;

    struct IdleAssistant;

    impl Assistant for IdleAssistant {
        fn predict_next_words(&self, _context: &str) -> Vec<String> {
            Vec::new()
        }

        fn generate_theme(&self, _prompt: &str) -> Option<ThemePatch> {
            None
        }

        fn assist_text(&self, text: &str) -> String {
            text.to_string()
        }
    }

    fn app() -> App {
        App::with_session(Session::with_assistant(Arc::new(IdleAssistant)))
    }

    #[test]
    fn test_ctrl_q_quits() {
        let mut app = app();
        assert!(handle_keybinding(&mut app, KeyModifiers::CONTROL, KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_unbound_key_is_not_handled() {
        let mut app = app();
        assert!(!handle_keybinding(&mut app, KeyModifiers::NONE, KeyCode::Char('x')));
    }

    #[test]
    fn test_physical_typing_and_backspace() {
        let mut app = app();
        handle_typing_input(&mut app, KeyModifiers::NONE, KeyCode::Char('h'));
        handle_typing_input(&mut app, KeyModifiers::SHIFT, KeyCode::Char('I'));
        assert_eq!(app.session.text(), "hI");

        handle_typing_input(&mut app, KeyModifiers::NONE, KeyCode::Backspace);
        assert_eq!(app.session.text(), "h");
    }

    #[test]
    fn test_f_key_accepts_suggestion() {
        let mut app = app();
        assert!(handle_keybinding(&mut app, KeyModifiers::NONE, KeyCode::F(2)));
        assert_eq!(app.session.text(), "The ");
    }

    #[test]
    fn test_tab_presses_highlighted_key() {
        let mut app = app();
        handle_typing_input(&mut app, KeyModifiers::NONE, KeyCode::Right);
        handle_typing_input(&mut app, KeyModifiers::NONE, KeyCode::Tab);
        assert_eq!(app.session.text(), "w");
    }

    #[test]
    fn test_theme_picker_wraps_and_applies() {
        let mut app = app();
        app.open_theme_picker();
        assert_eq!(app.theme_picker_index, 0);

        handle_theme_picker_input(&mut app, KeyCode::Up);
        assert_eq!(app.theme_picker_index, PresetId::all().len() - 1);

        handle_theme_picker_input(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Typing);
        assert_eq!(app.session.theme().id, PresetId::Cyberpunk);
    }

    #[test]
    fn test_color_prompt_flow() {
        let mut app = app();
        handle_keybinding(&mut app, KeyModifiers::CONTROL, KeyCode::Char('b'));
        assert_eq!(app.mode, AppMode::ColorPrompt);

        for _ in 0..7 {
            handle_prompt_input(&mut app, KeyCode::Backspace);
        }
        for c in "#000".chars() {
            handle_prompt_input(&mut app, KeyCode::Char(c));
        }
        handle_prompt_input(&mut app, KeyCode::Enter);

        assert_eq!(app.mode, AppMode::Typing);
        assert_eq!(app.session.theme().background.to_string(), "#000000");
    }

    #[test]
    fn test_theme_prompt_cancel() {
        let mut app = app();
        handle_keybinding(&mut app, KeyModifiers::CONTROL, KeyCode::Char('g'));
        assert_eq!(app.mode, AppMode::ThemePrompt);
        handle_prompt_input(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Typing);
        assert!(!app.session.is_theme_pending());
    }
}
