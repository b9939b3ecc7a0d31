//! TUI module - rendering and input handling

pub mod input;
pub mod render;

pub use input::{handle_keybinding, handle_prompt_input, handle_theme_picker_input, handle_typing_input};
pub use render::ui;
