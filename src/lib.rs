//! keysmith - AI-assisted virtual keyboard
//!
//! This crate provides the keyboard model, the Gemini assistance client and
//! the theming system behind the keysmith terminal keyboard.
//!
//! # Modules
//!
//! - [`theme`] - Keyboard themes, presets and partial theme updates
//! - [`keys`] - Key descriptors and the static layouts
//! - [`keyboard`] - Keyboard state: shift, layout, suggestions, debounced refresh
//! - [`gemini`] - Gemini client for predictions, theme generation and text assist
//! - [`session`] - The surface driven by the UI
//! - [`dialog`] - Input dialog widget for user input

pub mod buffer;
pub mod config;
pub mod debounce;
pub mod debug;
pub mod dialog;
pub mod gemini;
pub mod keyboard;
pub mod keys;
pub mod session;
pub mod theme;
pub mod worker;

// Re-export commonly used types
pub use buffer::TextBuffer;
pub use config::{Config, GeminiConfig, KeyboardConfig};
pub use debounce::{Debouncer, Generation};
pub use dialog::{DialogResult, InputDialog, centered_rect};
pub use gemini::{Assistant, GeminiClient};
pub use keyboard::{DEFAULT_SUGGESTIONS, KeyEffect, Keyboard, PredictionRequest};
pub use keys::{KeyAction, KeyDescriptor, Layout};
pub use session::{Session, SessionEvent};
pub use theme::{
    ColorError, CornerRadius, GeneratedPalette, HexColor, KeyboardTheme, PresetId, ThemePatch,
    create_theme, presets,
};
pub use worker::{Reply, RequestWorker};
