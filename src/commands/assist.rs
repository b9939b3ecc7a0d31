//! One-shot assistant commands: predict, assist, theme

use anyhow::{Context, Result};
use keysmith::{Assistant, GeneratedPalette, KeyboardTheme};
use std::io::Write;

/// Print next-word predictions, one per line
pub fn run_predict(assistant: &dyn Assistant, context: &str, out: &mut impl Write) -> Result<()> {
    for word in assistant.predict_next_words(context) {
        writeln!(out, "{word}")?;
    }
    Ok(())
}

/// Print the assisted rewrite of `text`
pub fn run_assist(assistant: &dyn Assistant, text: &str, out: &mut impl Write) -> Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Nothing to assist: text is empty");
    }
    writeln!(out, "{}", assistant.assist_text(text))?;
    Ok(())
}

/// Print the generated palette as JSON, merged over `base` so the
/// resulting theme is complete
pub fn run_theme(
    assistant: &dyn Assistant,
    prompt: &str,
    base: &KeyboardTheme,
    out: &mut impl Write,
) -> Result<()> {
    if prompt.trim().is_empty() {
        anyhow::bail!("Theme description is empty");
    }

    match assistant.generate_theme(prompt) {
        Some(patch) => {
            let theme = base.clone().merged(&patch);
            let json = serde_json::to_string_pretty(&theme)
                .context("Failed to serialize generated theme")?;
            writeln!(out, "{json}")?;
        }
        None => {
            writeln!(
                out,
                "No theme generated (expected fields: {})",
                GeneratedPalette::FIELDS.join(", ")
            )?;
        }
    }
    Ok(())
}
