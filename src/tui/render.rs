//! Rendering functions for TUI

use crate::app::{App, AppMode, NotifyLevel};
use keysmith::{KeyDescriptor, KeyboardTheme, PresetId, centered_rect};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Rows of a bordered key
const KEY_HEIGHT: u16 = 3;

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &mut App) {
    let theme = app.session.theme().clone();
    let rows = app.session.keyboard().layout().rows().len() as u16;
    let area = f.area();

    f.render_widget(Block::default().style(theme.style_background()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),               // Header
            Constraint::Min(3),                  // Text area
            Constraint::Length(3),               // Suggestion bar
            Constraint::Length(rows * KEY_HEIGHT), // Key grid
            Constraint::Length(1),               // Footer
        ])
        .split(area);

    render_header(f, app, &theme, chunks[0]);
    render_text_area(f, app, &theme, chunks[1]);
    render_suggestions(f, app, &theme, chunks[2]);
    render_keyboard(f, app, &theme, chunks[3]);
    render_footer(f, &theme, chunks[4]);

    match app.mode {
        AppMode::ThemePicker => render_theme_picker(f, app, &theme, area),
        AppMode::ThemePrompt => app.theme_dialog.render(f, area, &theme),
        AppMode::ColorPrompt => app.color_dialog.render(f, area, &theme),
        AppMode::Typing => {}
    }

    render_notifications(f, app, &theme, area);
}

/// Render header with theme, layout and request status
pub fn render_header(f: &mut Frame, app: &App, theme: &KeyboardTheme, area: Rect) {
    let keyboard = app.session.keyboard();
    let mut spans = vec![
        Span::styled(" keysmith ", theme.style_accent_key()),
        Span::styled(format!(" {} ", theme.name), theme.style_text()),
        Span::styled(format!("[{}]", keyboard.layout()), theme.style_text()),
    ];

    if theme.is_customized() {
        spans.push(Span::styled(" (custom)", theme.style_text()));
    }
    if keyboard.is_shifted() {
        spans.push(Span::styled(" ⇧", theme.style_suggestion()));
    }
    if app.session.is_assist_pending() {
        spans.push(Span::styled(" AI: assisting…", theme.style_suggestion()));
    }
    if app.session.is_theme_pending() {
        spans.push(Span::styled(" AI: styling…", theme.style_suggestion()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.style_background()), area);
}

/// Render the typed text with a trailing cursor
pub fn render_text_area(f: &mut Frame, app: &App, theme: &KeyboardTheme, area: Rect) {
    let text = app.session.text();
    let lines: Vec<Line> = if text.is_empty() {
        vec![Line::from(Span::styled(
            "Start typing...",
            theme.style_text().add_modifier(Modifier::ITALIC | Modifier::DIM),
        ))]
    } else {
        let mut lines: Vec<Line> = text.split('\n').map(|l| Line::from(l.to_string())).collect();
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("▏", theme.style_suggestion()));
        }
        lines
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.corner_radius.border_type())
        .border_style(theme.style_border())
        .title(" Text ")
        .style(theme.style_dialog_bg());

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Render the three suggestions with their accept keys
pub fn render_suggestions(f: &mut Frame, app: &App, theme: &KeyboardTheme, area: Rect) {
    let keyboard = app.session.keyboard();
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for (i, cell) in cells.iter().enumerate() {
        let word = keyboard.suggestions().get(i).map(String::as_str).unwrap_or("");
        let label = if keyboard.is_loading() { "…" } else { word };
        let line = Line::from(vec![
            Span::styled(format!("F{} ", i + 1), theme.style_text().add_modifier(Modifier::DIM)),
            Span::styled(label.to_string(), theme.style_suggestion()),
        ]);
        let paragraph = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM).border_style(theme.style_border()))
            .style(theme.style_background());
        f.render_widget(paragraph, *cell);
    }
}

/// Render the key grid for the active layout
pub fn render_keyboard(f: &mut Frame, app: &App, theme: &KeyboardTheme, area: Rect) {
    let keyboard = app.session.keyboard();
    let rows = keyboard.layout().rows();
    if rows.is_empty() {
        return;
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows.len() as u32); rows.len()])
        .split(area);

    let widest = rows.iter().map(|row| row_units(row)).max().unwrap_or(1);

    for (r, (row, row_area)) in rows.iter().zip(row_areas.iter()).enumerate() {
        let padding = (widest - row_units(row)) / 2;
        let mut constraints = vec![Constraint::Fill(padding)];
        constraints.extend(row.iter().map(|key| Constraint::Fill(key_units(key))));
        constraints.push(Constraint::Fill(padding));

        let key_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(*row_area);

        for (c, key) in row.iter().enumerate() {
            let selected = app.cursor.row == r && app.cursor.col == c;
            render_key(f, key, keyboard.is_shifted(), selected, theme, key_areas[c + 1]);
        }
    }
}

/// Width of a key in half-key units
fn key_units(key: &KeyDescriptor) -> u16 {
    (key.width * 2.0).round().max(1.0) as u16
}

fn row_units(row: &[KeyDescriptor]) -> u16 {
    row.iter().map(key_units).sum()
}

fn render_key(
    f: &mut Frame,
    key: &KeyDescriptor,
    shifted: bool,
    selected: bool,
    theme: &KeyboardTheme,
    area: Rect,
) {
    let style = if selected {
        theme.style_key_selected()
    } else if key.action.is_accent() {
        theme.style_accent_key()
    } else {
        theme.style_key()
    };

    let mut paragraph = Paragraph::new(key.display_label(shifted))
        .alignment(Alignment::Center)
        .style(style);

    if area.height >= KEY_HEIGHT {
        paragraph = paragraph.block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.corner_radius.border_type())
                .border_style(Style::default().fg(theme.background.to_color())),
        );
    }

    f.render_widget(paragraph, area);
}

/// Render footer with keybinding hints
pub fn render_footer(f: &mut Frame, theme: &KeyboardTheme, area: Rect) {
    let hints = [
        ("←↑↓→", "move"),
        ("Tab", "press"),
        ("F1-3", "accept"),
        ("^A", "assist"),
        ("^T", "themes"),
        ("^G", "generate"),
        ("^R", "round"),
        ("^B", "bg"),
        ("^Q", "quit"),
    ];

    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" {key}"), theme.style_suggestion()));
        spans.push(Span::styled(format!(":{desc}"), theme.style_text()));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).style(theme.style_background()), area);
}

/// Render theme picker popup
pub fn render_theme_picker(f: &mut Frame, app: &App, theme: &KeyboardTheme, area: Rect) {
    let themes = PresetId::all();
    let popup_width = 44u16;
    let popup_height = (themes.len() as u16) + 6; // items + description + footer + borders
    let popup_area = centered_rect(popup_width, popup_height, area);

    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = vec![Line::from("")];

    for (i, id) in themes.iter().enumerate() {
        let is_selected = i == app.theme_picker_index;
        let is_current = *id == theme.id;

        let prefix = if is_selected { " > " } else { "   " };
        let suffix = if is_current { " ✓" } else { "" };

        let style = if is_selected {
            theme.style_accent_key()
        } else {
            theme.style_text()
        };

        let preview = KeyboardTheme::preset(*id);
        lines.push(Line::from(vec![
            Span::styled(prefix, style),
            Span::styled(id.name(), style),
            Span::styled(suffix, theme.style_text()),
            Span::raw("  "),
            Span::styled("  ", Style::default().bg(preview.background.to_color())),
            Span::styled("  ", Style::default().bg(preview.key_background.to_color())),
            Span::styled("  ", Style::default().bg(preview.accent.to_color())),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Enter", theme.style_accent_key()),
        Span::styled(": Select  ", theme.style_text()),
        Span::styled("Esc", theme.style_accent_key()),
        Span::styled(": Cancel", theme.style_text()),
    ]));

    let block = Block::default()
        .title(" Select Theme ")
        .borders(Borders::ALL)
        .border_type(theme.corner_radius.border_type())
        .border_style(theme.style_border())
        .style(theme.style_dialog_bg());

    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Render notifications at the bottom of the screen
pub fn render_notifications(f: &mut Frame, app: &App, theme: &KeyboardTheme, area: Rect) {
    let notification_count = app.notifications.len().min(3); // Show max 3 notifications
    if notification_count == 0 {
        return;
    }

    let height = notification_count as u16 + 2; // +2 for borders
    let notification_area = Rect {
        x: area.x + 2,
        y: area.height.saturating_sub(height + 1),
        width: area.width.saturating_sub(4).min(60),
        height: height.min(area.height),
    };

    let lines: Vec<Line> = app
        .notifications
        .iter()
        .rev()
        .take(3)
        .map(|n| {
            let (prefix, color) = match n.level {
                NotifyLevel::Info => ("ℹ", Color::Cyan),
                NotifyLevel::Warning => ("⚠", Color::Yellow),
                NotifyLevel::Error => ("✗", Color::Red),
                NotifyLevel::Success => ("✓", Color::Green),
            };
            Line::from(vec![
                Span::styled(format!(" {prefix} "), Style::default().fg(color)),
                Span::raw(n.message.as_str()),
            ])
        })
        .collect();

    let notification_widget = Paragraph::new(lines).style(theme.style_dialog_bg()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.corner_radius.border_type())
            .border_style(theme.style_border()),
    );

    f.render_widget(Clear, notification_area);
    f.render_widget(notification_widget, notification_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use keysmith::{Assistant, Layout as KeyLayout, Session, ThemePatch};
    use ratatui::{Terminal, backend::TestBackend};
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

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::with_session(Session::with_assistant(Arc::new(IdleAssistant)))
    }

    #[test]
    fn test_key_units() {
        let rows = KeyLayout::Qwerty.rows();
        assert_eq!(row_units(rows[0]), 20);
        // Space is four keys wide
        assert!(rows[3].iter().any(|k| key_units(k) == 8));
    }

    #[test]
    fn test_ui_renders_text_and_suggestions() {
        let mut app = app();
        app.session.insert_text("hello", std::time::Instant::now());

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        let screen = buffer_text(&terminal);
        assert!(screen.contains("keysmith"));
        assert!(screen.contains("hello"));
        assert!(screen.contains("Hello"));
        assert!(screen.contains("Material You"));
    }

    #[test]
    fn test_theme_picker_overlay() {
        let mut app = app();
        app.open_theme_picker();

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        let screen = buffer_text(&terminal);
        assert!(screen.contains("Select Theme"));
        assert!(screen.contains("Neon Night"));
    }
}
