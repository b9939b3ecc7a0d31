//! Text buffer holding everything typed on the keyboard

/// The single mutable string the keyboard edits
///
/// There is no undo history; every operation rewrites the buffer in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    text: String,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the buffer holds only whitespace
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Remove the last character; a no-op on an empty buffer
    pub fn delete_last(&mut self) {
        self.text.pop();
    }

    /// Replace the whole buffer
    pub fn replace(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replace the trailing partial word with `word` followed by one space
    ///
    /// Everything up to and including the last space is kept verbatim.
    pub fn accept_suggestion(&mut self, word: &str) {
        let keep = self.text.rfind(' ').map(|i| i + 1).unwrap_or(0);
        self.text.truncate(keep);
        self.text.push_str(word);
        self.text.push(' ');
    }

    /// Trailing partial token (everything after the last space)
    pub fn current_word(&self) -> &str {
        match self.text.rfind(' ') {
            Some(i) => &self.text[i + 1..],
            None => &self.text,
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl From<&str> for TextBuffer {
    fn from(s: &str) -> Self {
        Self { text: s.to_string() }
    }
}
