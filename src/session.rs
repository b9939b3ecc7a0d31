//! Session: the surface the presentation layer drives
//!
//! Composes the keyboard, the active theme and the background request worker.
//! Everything here runs on the UI thread; assistant calls are dispatched to the
//! worker and their replies are folded back in by [`Session::poll_replies`].

use crate::config::Config;
use crate::debounce::DEFAULT_QUIET_PERIOD;
use crate::debug;
use crate::gemini::{Assistant, GeminiClient};
use crate::keyboard::{KeyEffect, Keyboard};
use crate::keys::{KeyDescriptor, Layout};
use crate::theme::{KeyboardTheme, PresetId, ThemePatch, create_theme};
use crate::worker::{Reply, RequestWorker};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Observable outcome of a finished background request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Fresh predictions were installed
    SuggestionsUpdated(Vec<String>),
    /// A prediction reply arrived after a newer edit and was ignored
    StalePredictionDropped,
    /// The buffer was replaced by assisted text
    TextAssisted(String),
    /// A generated palette was merged into the theme
    ThemeGenerated(ThemePatch),
    /// Theme generation produced nothing usable
    ThemeGenerationFailed,
}

pub struct Session {
    keyboard: Keyboard,
    theme: KeyboardTheme,
    worker: RequestWorker,
    assist_pending: bool,
    theme_pending: bool,
}

impl Session {
    pub fn new(
        assistant: Arc<dyn Assistant>,
        theme: KeyboardTheme,
        layout: Layout,
        quiet_period: Duration,
    ) -> Self {
        Self {
            keyboard: Keyboard::new(layout, quiet_period),
            theme,
            worker: RequestWorker::new(assistant),
            assist_pending: false,
            theme_pending: false,
        }
    }

    /// Session with a custom assistant and default keyboard settings
    pub fn with_assistant(assistant: Arc<dyn Assistant>) -> Self {
        Self::new(
            assistant,
            KeyboardTheme::default(),
            Layout::default(),
            DEFAULT_QUIET_PERIOD,
        )
    }

    /// Build a session backed by the Gemini client described in `config`
    pub fn from_config(config: &Config) -> Self {
        let client = GeminiClient::from_config(&config.gemini);
        let theme = create_theme(&config.theme);
        debug::log_theme("initial", &theme);
        Self::new(
            Arc::new(client),
            theme,
            config.keyboard.default_layout,
            config.keyboard.debounce(),
        )
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn theme(&self) -> &KeyboardTheme {
        &self.theme
    }

    pub fn text(&self) -> &str {
        self.keyboard.text()
    }

    pub fn is_assist_pending(&self) -> bool {
        self.assist_pending
    }

    pub fn is_theme_pending(&self) -> bool {
        self.theme_pending
    }

    // ==================== Theme ====================

    /// Replace the theme with a preset
    pub fn select_theme(&mut self, id: PresetId) {
        self.theme = KeyboardTheme::preset(id);
        debug::log_theme("select", &self.theme);
    }

    /// Merge a partial update into the active theme
    pub fn merge_theme(&mut self, patch: &ThemePatch) {
        self.theme.apply(patch);
        debug::log_theme("merge", &self.theme);
    }

    /// Ask the assistant for a palette matching `prompt`
    ///
    /// Returns false when nothing was dispatched: blank prompt, or a
    /// generation already in flight.
    pub fn generate_theme(&mut self, prompt: &str) -> bool {
        let prompt = prompt.trim();
        if prompt.is_empty() || self.theme_pending {
            return false;
        }
        self.theme_pending = true;
        self.worker.generate_theme(prompt.to_string());
        true
    }

    // ==================== Typing ====================

    /// Activate an on-screen key; the assist key dispatches an assist request
    pub fn activate_key(&mut self, key: &KeyDescriptor, now: Instant) -> KeyEffect {
        let effect = self.keyboard.activate_key(key, now);
        if effect == KeyEffect::AssistRequested {
            self.invoke_assist();
        }
        effect
    }

    pub fn accept_suggestion(&mut self, word: &str, now: Instant) -> KeyEffect {
        self.keyboard.accept_suggestion(word, now)
    }

    pub fn insert_text(&mut self, text: &str, now: Instant) -> KeyEffect {
        self.keyboard.insert_text(text, now)
    }

    pub fn delete_last(&mut self, now: Instant) -> KeyEffect {
        self.keyboard.delete_last(now)
    }

    /// Send the buffer for rewriting
    ///
    /// Returns false when the buffer is blank or an assist is already pending.
    pub fn invoke_assist(&mut self) -> bool {
        if self.keyboard.buffer().is_blank() || self.assist_pending {
            return false;
        }
        self.assist_pending = true;
        self.worker.assist(self.keyboard.text().to_string());
        true
    }

    // ==================== Frame loop ====================

    /// Dispatch a prediction request if the debounce deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(request) = self.keyboard.poll_refresh(now) {
            self.worker.predict(request.generation, request.context);
        }
    }

    /// Fold every finished reply into the session
    pub fn poll_replies(&mut self, now: Instant) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Some(reply) = self.worker.try_recv() {
            events.push(self.handle_reply(reply, now));
        }
        events
    }

    /// Block up to `timeout` for one reply
    pub fn wait_reply(&mut self, timeout: Duration, now: Instant) -> Option<SessionEvent> {
        let reply = self.worker.recv_timeout(timeout)?;
        Some(self.handle_reply(reply, now))
    }

    /// Drop the pending refresh and ignore any prediction still in flight
    pub fn shutdown(&mut self) {
        self.keyboard.cancel();
        debug::log_category("session", "shutdown");
    }

    fn handle_reply(&mut self, reply: Reply, now: Instant) -> SessionEvent {
        match reply {
            Reply::Predictions { generation, words } => {
                if self.keyboard.apply_predictions(generation, words) {
                    SessionEvent::SuggestionsUpdated(self.keyboard.suggestions().to_vec())
                } else {
                    debug::log_stale(generation, self.keyboard.generation());
                    SessionEvent::StalePredictionDropped
                }
            }
            Reply::Assist(text) => {
                self.assist_pending = false;
                self.keyboard.replace_text(&text, now);
                SessionEvent::TextAssisted(text)
            }
            Reply::Theme(Some(patch)) => {
                self.theme_pending = false;
                self.merge_theme(&patch);
                SessionEvent::ThemeGenerated(patch)
            }
            Reply::Theme(None) => {
                self.theme_pending = false;
                SessionEvent::ThemeGenerationFailed
            }
        }
    }
}
