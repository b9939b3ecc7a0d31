//! Application state and logic

pub mod types;

pub use types::{AppMode, Direction, KeyCursor, Notification, NotifyLevel};

use keysmith::{
    Config, CornerRadius, HexColor, InputDialog, KeyDescriptor, KeyEffect, PresetId, Session,
    SessionEvent, ThemePatch, debug,
};
use std::time::{Duration, Instant};

/// How long notifications stay on screen
const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Application state
pub struct App {
    pub session: Session,
    pub should_quit: bool,
    /// Current application mode
    pub mode: AppMode,
    /// Highlighted key
    pub cursor: KeyCursor,
    /// Theme picker: currently selected index
    pub theme_picker_index: usize,
    /// Theme description prompt
    pub theme_dialog: InputDialog,
    /// Background color entry
    pub color_dialog: InputDialog,
    /// Notifications to display
    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_session(Session::from_config(config))
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            should_quit: false,
            mode: AppMode::Typing,
            cursor: KeyCursor::default(),
            theme_picker_index: 0,
            theme_dialog: InputDialog::new("Generate Theme", "Describe a keyboard style:"),
            color_dialog: InputDialog::new("Background", "Hex color (#RRGGBB):"),
            notifications: Vec::new(),
        }
    }

    // ==================== Keyboard ====================

    /// Key under the cursor
    pub fn selected_key(&self) -> Option<&'static KeyDescriptor> {
        let rows = self.session.keyboard().layout().rows();
        rows.get(self.cursor.row)?.get(self.cursor.col)
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        self.cursor = self.cursor.moved(self.session.keyboard().layout(), direction);
    }

    /// Activate the highlighted key
    pub fn press_selected_key(&mut self, now: Instant) {
        let Some(key) = self.selected_key() else {
            return;
        };
        match self.session.activate_key(key, now) {
            KeyEffect::LayoutChanged(layout) => {
                self.cursor = self.cursor.clamped(layout);
            }
            KeyEffect::AssistRequested => self.notify_assist_dispatch(),
            KeyEffect::Edited | KeyEffect::ShiftToggled(_) => {}
        }
    }

    /// Accept the suggestion at `index` (0-based)
    pub fn accept_suggestion(&mut self, index: usize, now: Instant) {
        let word = self.session.keyboard().suggestions().get(index).cloned();
        if let Some(word) = word {
            self.session.accept_suggestion(&word, now);
        }
    }

    pub fn request_assist(&mut self) {
        self.session.invoke_assist();
        self.notify_assist_dispatch();
    }

    fn notify_assist_dispatch(&mut self) {
        if self.session.is_assist_pending() {
            self.add_notification("Asking the assistant...".to_string(), NotifyLevel::Info);
        } else if self.session.keyboard().buffer().is_blank() {
            self.add_notification("Nothing to assist yet".to_string(), NotifyLevel::Warning);
        }
    }

    // ==================== Theme ====================

    /// Open theme picker
    pub fn open_theme_picker(&mut self) {
        let current = self.session.theme().id;
        self.theme_picker_index = PresetId::all()
            .iter()
            .position(|id| *id == current)
            .unwrap_or(0);
        self.mode = AppMode::ThemePicker;
    }

    /// Apply selected preset for the rest of the session
    ///
    /// The config file is left alone; the next launch starts from `theme` again.
    pub fn apply_preset(&mut self, id: PresetId) {
        self.session.select_theme(id);
        self.add_notification(format!("Theme changed to {}", id.name()), NotifyLevel::Success);
    }

    pub fn open_theme_prompt(&mut self) {
        if self.session.is_theme_pending() {
            self.add_notification("Theme generation in progress".to_string(), NotifyLevel::Warning);
            return;
        }
        self.theme_dialog.clear();
        self.theme_dialog.show();
        self.mode = AppMode::ThemePrompt;
    }

    pub fn submit_theme_prompt(&mut self, prompt: &str) {
        self.mode = AppMode::Typing;
        if self.session.generate_theme(prompt) {
            self.add_notification("Generating theme...".to_string(), NotifyLevel::Info);
        }
    }

    pub fn open_color_prompt(&mut self) {
        let current = self.session.theme().background.to_string();
        self.color_dialog.show_with(&current);
        self.mode = AppMode::ColorPrompt;
    }

    /// Apply an entered background color, reopening the prompt on bad input
    pub fn submit_color(&mut self, value: &str) {
        match value.parse::<HexColor>() {
            Ok(color) => {
                self.session.merge_theme(&ThemePatch::background(color));
                self.mode = AppMode::Typing;
            }
            Err(e) => {
                self.color_dialog.reject(value, e.to_string());
                self.mode = AppMode::ColorPrompt;
            }
        }
    }

    /// Step the key corner radius by 4 px, wrapping back to 0
    pub fn cycle_radius(&mut self) {
        let next: CornerRadius = self.session.theme().corner_radius.stepped();
        self.session.merge_theme(&ThemePatch::corner_radius(next));
        self.add_notification(format!("Roundness {}px", next.px()), NotifyLevel::Info);
    }

    // ==================== Frame loop ====================

    /// Advance debounce timers, fold in replies and expire notifications
    pub fn update(&mut self, now: Instant) {
        self.session.tick(now);
        for event in self.session.poll_replies(now) {
            self.handle_session_event(event);
        }
        self.cleanup_notifications(now);
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SuggestionsUpdated(_) | SessionEvent::StalePredictionDropped => {}
            SessionEvent::TextAssisted(_) => {
                self.add_notification("Text updated".to_string(), NotifyLevel::Success);
            }
            SessionEvent::ThemeGenerated(_) => {
                self.add_notification("Generated theme applied".to_string(), NotifyLevel::Success);
            }
            SessionEvent::ThemeGenerationFailed => {
                self.add_notification("Could not generate a theme".to_string(), NotifyLevel::Error);
            }
        }
    }

    /// Add a notification
    pub fn add_notification(&mut self, message: String, level: NotifyLevel) {
        debug::log_category("app", &message);
        self.notifications.push(Notification {
            message,
            level,
            created_at: Instant::now(),
        });
    }

    /// Drop notifications older than the display window
    pub fn cleanup_notifications(&mut self, now: Instant) {
        self.notifications
            .retain(|n| now.saturating_duration_since(n.created_at) < NOTIFICATION_TTL);
    }

    pub fn quit(&mut self) {
        self.session.shutdown();
        self.should_quit = true;
    }
}
