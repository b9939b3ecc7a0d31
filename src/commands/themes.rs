//! Themes command implementation

use anyhow::Result;
use keysmith::{KeyboardTheme, presets};
use std::io::Write;

/// List the preset themes, marking `active`
pub fn run_themes(active: &KeyboardTheme, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Available themes:\n")?;
    for theme in presets() {
        let marker = if theme.id == active.id { "*" } else { " " };
        writeln!(
            out,
            "{marker} {:<14} {:<14} bg {}  accent {}  radius {}px",
            theme.id.id(),
            theme.name,
            theme.background,
            theme.accent,
            theme.corner_radius.px()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use keysmith::PresetId;

    #[test]
    fn test_lists_every_preset_and_marks_active() {
        let mut out = Vec::new();
        run_themes(&KeyboardTheme::preset(PresetId::Cyberpunk), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        for id in PresetId::all() {
            assert!(text.contains(id.id()), "missing {id}");
        }
        let active: Vec<&str> = text.lines().filter(|l| l.starts_with('*')).collect();
        assert_eq!(active.len(), 1);
        assert!(active[0].contains("Neon Night"));
        assert!(active[0].contains("4px"));
    }
}
