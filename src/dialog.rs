//! Input dialog module for keysmith
//!
//! Single-line text entry popup used for theme descriptions and
//! color values.

use crate::theme::KeyboardTheme;
use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Result of dialog interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// User submitted the input
    Submit(String),
    /// User cancelled the dialog
    Cancel,
}

/// A single-line input popup
///
/// # Example
/// ```ignore
/// let mut dialog = InputDialog::new("Generate Theme", "Describe a style:");
/// dialog.show();
///
/// // In event loop:
/// if let Some(result) = dialog.handle_key(key_code) {
///     match result {
///         DialogResult::Submit(value) => { /* use value */ }
///         DialogResult::Cancel => { /* cancelled */ }
///     }
/// }
/// ```
pub struct InputDialog {
    title: String,
    prompt: String,
    input: String,
    /// Cursor position in characters, not bytes
    cursor: usize,
    /// Validation message shown under the field
    error: Option<String>,
    visible: bool,
}

impl InputDialog {
    /// Create a new input dialog
    pub fn new(title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            prompt: prompt.into(),
            input: String::new(),
            cursor: 0,
            error: None,
            visible: false,
        }
    }

    /// Show the dialog
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Show the dialog with `value` already entered
    pub fn show_with(&mut self, value: &str) {
        self.input = value.to_string();
        self.cursor = self.input.chars().count();
        self.error = None;
        self.visible = true;
    }

    /// Hide the dialog
    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the current input value
    pub fn value(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Reopen with a validation message, keeping the rejected input
    pub fn reject(&mut self, value: &str, message: impl Into<String>) {
        self.show_with(value);
        self.error = Some(message.into());
    }

    /// Clear the input
    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
        self.error = None;
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    fn char_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Handle key input
    ///
    /// Returns `Some(DialogResult)` when the dialog should close,
    /// `None` when the dialog should stay open.
    pub fn handle_key(&mut self, key: KeyCode) -> Option<DialogResult> {
        if !self.visible {
            return None;
        }

        match key {
            KeyCode::Enter => {
                let value = std::mem::take(&mut self.input);
                self.hide();
                self.clear();
                Some(DialogResult::Submit(value))
            }
            KeyCode::Esc => {
                self.hide();
                self.clear();
                Some(DialogResult::Cancel)
            }
            KeyCode::Char(c) => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor += 1;
                self.error = None;
                None
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.input.remove(at);
                }
                None
            }
            KeyCode::Delete => {
                if self.cursor < self.char_len() {
                    let at = self.byte_index();
                    self.input.remove(at);
                }
                None
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                None
            }
            _ => None,
        }
    }

    /// Render the dialog as a centered popup over `area`
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &KeyboardTheme) {
        if !self.visible {
            return;
        }

        let dialog_width = 50.min(area.width.saturating_sub(4));
        let dialog_height = 10;
        let dialog_area = centered_rect(dialog_width, dialog_height, area);

        f.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .borders(Borders::ALL)
            .border_type(theme.corner_radius.border_type())
            .border_style(theme.style_border())
            .style(theme.style_dialog_bg());

        f.render_widget(block.clone(), dialog_area);
        let inner = block.inner(dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(1), // Prompt
                Constraint::Length(3), // Input field
                Constraint::Length(1), // Error
                Constraint::Length(1), // Help text
            ])
            .split(inner);

        let prompt = Paragraph::new(self.prompt.as_str()).style(theme.style_text());
        f.render_widget(prompt, chunks[0]);

        let at = self.byte_index();
        let (before, after) = self.input.split_at(at);
        let mut rest = after.chars();
        let cursor_char = rest.next().unwrap_or(' ');
        let input_display = Line::from(vec![
            Span::raw(before),
            Span::styled(cursor_char.to_string(), theme.style_accent_key()),
            Span::raw(rest.as_str()),
        ]);

        let input_field = Paragraph::new(input_display)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(theme.corner_radius.border_type())
                    .border_style(theme.style_border()),
            )
            .style(theme.style_key());
        f.render_widget(input_field, chunks[1]);

        if let Some(ref error) = self.error {
            let error_line = Paragraph::new(error.as_str()).style(theme.style_suggestion());
            f.render_widget(error_line, chunks[2]);
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled("[Enter]", theme.style_accent_key()),
            Span::raw(" Submit  "),
            Span::styled("[Esc]", theme.style_accent_key()),
            Span::raw(" Cancel"),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(help, chunks[3]);
    }
}

/// Create a centered rectangle with given width and height
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
