//! Keyboard interaction surface
//!
//! Owns the transient keyboard state: active layout, shift flag, suggestions,
//! the text buffer and the prediction debouncer. It performs no I/O; the
//! session turns [`PredictionRequest`]s into background calls and feeds the
//! replies back through [`Keyboard::apply_predictions`].

use crate::buffer::TextBuffer;
use crate::debounce::{Debouncer, Generation};
use crate::keys::{KeyAction, KeyDescriptor, Layout};
use std::time::{Duration, Instant};

/// Suggestions shown while the buffer is empty
pub const DEFAULT_SUGGESTIONS: [&str; 3] = ["I", "The", "Hello"];

/// What a key activation did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    /// The buffer changed and a prediction refresh was scheduled
    Edited,
    /// The active layout changed
    LayoutChanged(Layout),
    /// Shift was toggled to the given state
    ShiftToggled(bool),
    /// The assist key was pressed; the caller dispatches the request
    AssistRequested,
}

/// A due prediction refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub generation: Generation,
    pub context: String,
}

pub struct Keyboard {
    layout: Layout,
    shifted: bool,
    suggestions: Vec<String>,
    /// A prediction fetch is in flight
    loading: bool,
    buffer: TextBuffer,
    debouncer: Debouncer,
}

impl Keyboard {
    pub fn new(layout: Layout, quiet_period: Duration) -> Self {
        Self {
            layout,
            shifted: false,
            suggestions: default_suggestions(),
            loading: false,
            buffer: TextBuffer::new(),
            debouncer: Debouncer::new(quiet_period),
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_shifted(&self) -> bool {
        self.shifted
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Generation a prediction reply must carry to be applied
    pub fn generation(&self) -> Generation {
        self.debouncer.generation()
    }

    pub fn has_pending_refresh(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Dispatch a key by its action kind
    pub fn activate_key(&mut self, key: &KeyDescriptor, now: Instant) -> KeyEffect {
        match key.action {
            KeyAction::Char => {
                self.buffer.push_str(&key.emitted(self.shifted));
                // One-shot capitalization
                self.shifted = false;
                self.edited(now)
            }
            KeyAction::Space => {
                self.buffer.push_str(" ");
                self.edited(now)
            }
            KeyAction::Delete => {
                self.buffer.delete_last();
                self.edited(now)
            }
            KeyAction::Enter => {
                self.buffer.push_str("\n");
                self.edited(now)
            }
            KeyAction::Switch(target) => {
                self.layout = target;
                KeyEffect::LayoutChanged(target)
            }
            KeyAction::Shift => {
                self.shifted = !self.shifted;
                KeyEffect::ShiftToggled(self.shifted)
            }
            KeyAction::Assist => KeyEffect::AssistRequested,
        }
    }

    /// Append text typed directly (not through a key)
    pub fn insert_text(&mut self, text: &str, now: Instant) -> KeyEffect {
        self.buffer.push_str(text);
        self.edited(now)
    }

    /// Remove the last character
    pub fn delete_last(&mut self, now: Instant) -> KeyEffect {
        self.buffer.delete_last();
        self.edited(now)
    }

    /// Replace the trailing partial word with `word` and a space
    pub fn accept_suggestion(&mut self, word: &str, now: Instant) -> KeyEffect {
        self.buffer.accept_suggestion(word);
        self.edited(now)
    }

    /// Replace the whole buffer
    pub fn replace_text(&mut self, text: &str, now: Instant) -> KeyEffect {
        self.buffer.replace(text);
        self.edited(now)
    }

    fn edited(&mut self, now: Instant) -> KeyEffect {
        self.debouncer.schedule(now);
        KeyEffect::Edited
    }

    /// Fire the debounced refresh if its quiet period has elapsed
    ///
    /// An empty buffer resets the suggestions right away and needs no fetch.
    pub fn poll_refresh(&mut self, now: Instant) -> Option<PredictionRequest> {
        let generation = self.debouncer.poll(now)?;

        if self.buffer.is_empty() {
            self.suggestions = default_suggestions();
            self.loading = false;
            return None;
        }

        self.loading = true;
        Some(PredictionRequest {
            generation,
            context: self.buffer.as_str().to_string(),
        })
    }

    /// Install predictions unless a newer edit superseded them
    ///
    /// Returns false when the reply was stale and discarded.
    pub fn apply_predictions(&mut self, generation: Generation, words: Vec<String>) -> bool {
        if !self.debouncer.is_current(generation) {
            return false;
        }
        self.suggestions = words;
        self.loading = false;
        true
    }

    /// Cancel the pending refresh and ignore anything in flight
    pub fn cancel(&mut self) {
        self.debouncer.cancel();
        self.loading = false;
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new(Layout::default(), crate::debounce::DEFAULT_QUIET_PERIOD)
    }
}

fn default_suggestions() -> Vec<String> {
    DEFAULT_SUGGESTIONS.iter().map(|w| w.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(600);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn key(label: &'static str) -> KeyDescriptor {
        KeyDescriptor::char(label)
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_initial_state() {
        let kb = Keyboard::default();
        assert_eq!(kb.layout(), Layout::Qwerty);
        assert!(!kb.is_shifted());
        assert_eq!(kb.suggestions(), words(&["I", "The", "Hello"]).as_slice());
        assert!(kb.text().is_empty());
        assert!(!kb.is_loading());
    }

    #[test]
    fn test_shifted_char_is_uppercase_and_resets_shift() {
        let t0 = Instant::now();
        let mut kb = Keyboard::new(Layout::Qwerty, QUIET);

        let shift = KeyDescriptor::new("⇧", KeyAction::Shift);
        assert_eq!(kb.activate_key(&shift, t0), KeyEffect::ShiftToggled(true));
        assert_eq!(kb.activate_key(&key("h"), t0), KeyEffect::Edited);
        assert!(!kb.is_shifted());
        kb.activate_key(&key("i"), t0);

        assert_eq!(kb.text(), "Hi");
    }

    #[test]
    fn test_shift_toggles_off() {
        let t0 = Instant::now();
        let mut kb = Keyboard::default();
        let shift = KeyDescriptor::new("⇧", KeyAction::Shift);
        kb.activate_key(&shift, t0);
        assert_eq!(kb.activate_key(&shift, t0), KeyEffect::ShiftToggled(false));
        assert!(kb.text().is_empty());
    }

    #[test]
    fn test_space_does_not_consume_shift() {
        let t0 = Instant::now();
        let mut kb = Keyboard::default();
        kb.activate_key(&KeyDescriptor::new("⇧", KeyAction::Shift), t0);
        kb.activate_key(&KeyDescriptor::new(" ", KeyAction::Space), t0);
        assert!(kb.is_shifted());
        kb.activate_key(&key("a"), t0);
        assert_eq!(kb.text(), " A");
    }

    #[test]
    fn test_space_enter_delete() {
        let t0 = Instant::now();
        let mut kb = Keyboard::default();
        kb.activate_key(&key("a"), t0);
        kb.activate_key(&KeyDescriptor::new(" ", KeyAction::Space), t0);
        kb.activate_key(&KeyDescriptor::new("↵", KeyAction::Enter), t0);
        assert_eq!(kb.text(), "a \n");

        kb.activate_key(&KeyDescriptor::new("⌫", KeyAction::Delete), t0);
        assert_eq!(kb.text(), "a ");
    }

    #[test]
    fn test_delete_on_empty_is_noop() {
        let t0 = Instant::now();
        let mut kb = Keyboard::default();
        assert_eq!(
            kb.activate_key(&KeyDescriptor::new("⌫", KeyAction::Delete), t0),
            KeyEffect::Edited
        );
        assert!(kb.text().is_empty());
    }

    #[test]
    fn test_layout_switch() {
        let t0 = Instant::now();
        let mut kb = Keyboard::default();
        let switch = KeyDescriptor::new("?123", KeyAction::Switch(Layout::Symbols));
        assert_eq!(kb.activate_key(&switch, t0), KeyEffect::LayoutChanged(Layout::Symbols));
        assert_eq!(kb.layout(), Layout::Symbols);
        assert!(!kb.has_pending_refresh());
    }

    #[test]
    fn test_assist_key_is_reported() {
        let mut kb = Keyboard::default();
        let assist = KeyDescriptor::new("AI", KeyAction::Assist);
        assert_eq!(kb.activate_key(&assist, Instant::now()), KeyEffect::AssistRequested);
        assert!(kb.text().is_empty());
    }

    #[test]
    fn test_accept_suggestion() {
        let t0 = Instant::now();
        let mut kb = Keyboard::default();
        kb.insert_text("hello wor", t0);
        kb.accept_suggestion("world", t0);
        assert_eq!(kb.text(), "hello world ");
        assert!(kb.has_pending_refresh());
    }

    #[test]
    fn test_refresh_waits_for_quiet_period() {
        let t0 = Instant::now();
        let mut kb = Keyboard::new(Layout::Qwerty, QUIET);
        kb.insert_text("hi", t0);

        assert_eq!(kb.poll_refresh(t0 + ms(599)), None);
        let request = kb.poll_refresh(t0 + ms(600)).unwrap();
        assert_eq!(request.context, "hi");
        assert!(kb.is_loading());
    }

    #[test]
    fn test_rapid_edits_yield_one_request_for_latest_text() {
        let t0 = Instant::now();
        let mut kb = Keyboard::new(Layout::Qwerty, QUIET);

        kb.insert_text("hel", t0);
        kb.insert_text("l", t0 + ms(300));
        assert_eq!(kb.poll_refresh(t0 + ms(700)), None);

        let request = kb.poll_refresh(t0 + ms(900)).unwrap();
        assert_eq!(request.context, "hell");
        assert_eq!(kb.poll_refresh(t0 + ms(5000)), None);
    }

    #[test]
    fn test_stale_predictions_are_discarded() {
        let t0 = Instant::now();
        let mut kb = Keyboard::new(Layout::Qwerty, QUIET);

        kb.insert_text("good", t0);
        let first = kb.poll_refresh(t0 + QUIET).unwrap();

        // Edit again while the first request is in flight
        kb.insert_text(" mo", t0 + ms(700));
        let second = kb.poll_refresh(t0 + ms(1300)).unwrap();

        assert!(kb.apply_predictions(second.generation, words(&["morning"])));
        assert!(!kb.apply_predictions(first.generation, words(&["luck"])));
        assert_eq!(kb.suggestions(), words(&["morning"]).as_slice());
        assert!(!kb.is_loading());
    }

    #[test]
    fn test_reply_after_newer_edit_but_before_its_request_is_discarded() {
        let t0 = Instant::now();
        let mut kb = Keyboard::new(Layout::Qwerty, QUIET);

        kb.insert_text("a", t0);
        let first = kb.poll_refresh(t0 + QUIET).unwrap();
        kb.insert_text("b", t0 + ms(650));

        assert!(!kb.apply_predictions(first.generation, words(&["x"])));
        assert_eq!(kb.suggestions(), words(&DEFAULT_SUGGESTIONS).as_slice());
        assert!(kb.generation() > first.generation);
    }

    #[test]
    fn test_empty_buffer_resets_without_request() {
        let t0 = Instant::now();
        let mut kb = Keyboard::new(Layout::Qwerty, QUIET);

        kb.insert_text("x", t0);
        let request = kb.poll_refresh(t0 + QUIET).unwrap();
        assert!(kb.apply_predictions(request.generation, words(&["ray"])));

        kb.delete_last(t0 + ms(1000));
        assert_eq!(kb.poll_refresh(t0 + ms(1600)), None);
        assert_eq!(kb.suggestions(), words(&["I", "The", "Hello"]).as_slice());
        assert!(!kb.is_loading());
    }

    #[test]
    fn test_cancel_drops_pending_and_in_flight() {
        let t0 = Instant::now();
        let mut kb = Keyboard::new(Layout::Qwerty, QUIET);
        kb.insert_text("abc", t0);
        let request = kb.poll_refresh(t0 + QUIET).unwrap();
        kb.insert_text("d", t0 + ms(700));

        kb.cancel();
        assert!(!kb.has_pending_refresh());
        assert!(!kb.is_loading());
        assert!(!kb.apply_predictions(request.generation, words(&["z"])));
        assert_eq!(kb.poll_refresh(t0 + ms(10_000)), None);
    }
}
