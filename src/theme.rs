//! Keyboard theme model for keysmith
//!
//! A theme is always one complete record. Presets are complete by construction;
//! AI-generated palettes and manual tweaks arrive as [`ThemePatch`]es and are
//! merged field by field onto the active theme.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

// ==================== Colors ====================

/// Error returned when a color string cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Missing leading `#`
    MissingHash(String),
    /// Wrong number of hex digits (expects 3 or 6)
    BadLength(String),
    /// Non-hex character in the digits
    BadDigit(String),
}

impl Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::MissingHash(s) => write!(f, "color '{s}' must start with '#'"),
            ColorError::BadLength(s) => write!(f, "color '{s}' must have 3 or 6 hex digits"),
            ColorError::BadDigit(s) => write!(f, "color '{s}' contains a non-hex digit"),
        }
    }
}

impl std::error::Error for ColorError {}

/// A validated `#RRGGBB` color
///
/// Accepts `#RGB` and `#RRGGBB` (case-insensitive) and always displays as
/// upper-case `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to a terminal RGB color
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }

    /// Components as a tuple
    pub fn components(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(trimmed.to_string()))?;

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(trimmed.to_string()));
        }

        let channel = |hex: &str| {
            u8::from_str_radix(hex, 16).map_err(|_| ColorError::BadDigit(trimmed.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            // #RGB expands each nibble: #F0A -> #FF00AA
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            _ => Err(ColorError::BadLength(trimmed.to_string())),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ==================== Corner Radius ====================

/// Key corner radius in pixels, clamped to `0..=MAX`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct CornerRadius(u8);

impl CornerRadius {
    pub const MAX: u8 = 24;
    /// Increment used by the roundness tweak
    pub const STEP: u8 = 4;

    pub const fn new(px: u8) -> Self {
        if px > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(px)
        }
    }

    pub fn px(self) -> u8 {
        self.0
    }

    /// Next roundness step, wrapping back to square corners past the maximum
    pub fn stepped(self) -> Self {
        if self.0 >= Self::MAX {
            Self(0)
        } else {
            Self::new(self.0.saturating_add(Self::STEP))
        }
    }

    /// Terminal border used to approximate the radius
    pub fn border_type(self) -> BorderType {
        if self.0 < 6 {
            BorderType::Plain
        } else {
            BorderType::Rounded
        }
    }
}

impl From<u8> for CornerRadius {
    fn from(px: u8) -> Self {
        Self::new(px)
    }
}

impl From<CornerRadius> for u8 {
    fn from(radius: CornerRadius) -> Self {
        radius.0
    }
}

impl Display for CornerRadius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

// ==================== PresetId Enum ====================

/// Preset identifier for type-safe theme selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PresetId {
    #[default]
    MaterialYou,
    DarkMode,
    PixelBlue,
    Cyberpunk,
}

impl PresetId {
    /// Display name of the preset
    pub fn name(&self) -> &'static str {
        match self {
            PresetId::MaterialYou => "Material You",
            PresetId::DarkMode => "Android Dark",
            PresetId::PixelBlue => "Pixel Blue",
            PresetId::Cyberpunk => "Neon Night",
        }
    }

    /// ID string (for config files and the CLI)
    pub fn id(&self) -> &'static str {
        match self {
            PresetId::MaterialYou => "material-you",
            PresetId::DarkMode => "dark-mode",
            PresetId::PixelBlue => "pixel-blue",
            PresetId::Cyberpunk => "cyberpunk",
        }
    }

    pub fn all() -> &'static [PresetId] {
        &[
            PresetId::MaterialYou,
            PresetId::DarkMode,
            PresetId::PixelBlue,
            PresetId::Cyberpunk,
        ]
    }
}

impl FromStr for PresetId {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "material-you" | "material" | "materialyou" => Ok(PresetId::MaterialYou),
            "dark-mode" | "dark" | "android-dark" => Ok(PresetId::DarkMode),
            "pixel-blue" | "pixel" | "blue" => Ok(PresetId::PixelBlue),
            "cyberpunk" | "neon" | "neon-night" => Ok(PresetId::Cyberpunk),
            _ => Err(()),
        }
    }
}

impl Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

// ==================== KeyboardTheme ====================

/// Complete keyboard theme
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyboardTheme {
    /// Preset this theme started from
    pub id: PresetId,
    /// Display name
    pub name: String,
    /// Keyboard background
    pub background: HexColor,
    /// Regular key background
    pub key_background: HexColor,
    /// Regular key label
    pub key_text: HexColor,
    /// Function key (shift, enter, delete, switch, AI) background
    pub accent: HexColor,
    /// Function key label
    pub accent_text: HexColor,
    /// Suggestion bar words
    pub suggestion_text: HexColor,
    /// Key corner radius
    pub corner_radius: CornerRadius,
}

impl KeyboardTheme {
    /// Complete record for a preset
    pub fn preset(id: PresetId) -> Self {
        let palette = match id {
            PresetId::MaterialYou => &MATERIAL_YOU,
            PresetId::DarkMode => &DARK_MODE,
            PresetId::PixelBlue => &PIXEL_BLUE,
            PresetId::Cyberpunk => &CYBERPUNK,
        };
        Self {
            id,
            name: id.name().to_string(),
            background: palette.background,
            key_background: palette.key_background,
            key_text: palette.key_text,
            accent: palette.accent,
            accent_text: palette.accent_text,
            suggestion_text: palette.suggestion_text,
            corner_radius: palette.corner_radius,
        }
    }

    /// Merge a partial update field by field; unset fields keep their value
    pub fn apply(&mut self, patch: &ThemePatch) {
        if let Some(c) = patch.background {
            self.background = c;
        }
        if let Some(c) = patch.key_background {
            self.key_background = c;
        }
        if let Some(c) = patch.key_text {
            self.key_text = c;
        }
        if let Some(c) = patch.accent {
            self.accent = c;
        }
        if let Some(c) = patch.accent_text {
            self.accent_text = c;
        }
        if let Some(c) = patch.suggestion_text {
            self.suggestion_text = c;
        }
        if let Some(r) = patch.corner_radius {
            self.corner_radius = r;
        }
    }

    /// Like [`apply`](Self::apply) but returns the merged record
    pub fn merged(mut self, patch: &ThemePatch) -> Self {
        self.apply(patch);
        self
    }

    /// Whether this record differs from the preset it started from
    pub fn is_customized(&self) -> bool {
        *self != Self::preset(self.id)
    }

    // ==================== Styles ====================

    /// Regular key
    pub fn style_key(&self) -> Style {
        Style::default()
            .fg(self.key_text.to_color())
            .bg(self.key_background.to_color())
    }

    /// Function key
    pub fn style_accent_key(&self) -> Style {
        Style::default()
            .fg(self.accent_text.to_color())
            .bg(self.accent.to_color())
            .add_modifier(Modifier::BOLD)
    }

    /// Key under the navigation cursor
    pub fn style_key_selected(&self) -> Style {
        Style::default()
            .fg(self.accent.to_color())
            .bg(self.key_text.to_color())
            .add_modifier(Modifier::BOLD)
    }

    /// Keyboard surface
    pub fn style_background(&self) -> Style {
        Style::default().bg(self.background.to_color())
    }

    /// Suggestion bar word
    pub fn style_suggestion(&self) -> Style {
        Style::default()
            .fg(self.suggestion_text.to_color())
            .bg(self.background.to_color())
            .add_modifier(Modifier::BOLD)
    }

    /// Key border
    pub fn style_border(&self) -> Style {
        Style::default().fg(self.accent.to_color())
    }

    /// Plain text on the surface
    pub fn style_text(&self) -> Style {
        Style::default().fg(self.key_text.to_color())
    }

    /// Dialog body
    pub fn style_dialog_bg(&self) -> Style {
        Style::default()
            .fg(self.key_text.to_color())
            .bg(self.key_background.to_color())
    }
}

impl Default for KeyboardTheme {
    fn default() -> Self {
        Self::preset(PresetId::default())
    }
}

// ==================== ThemePatch ====================

/// Partial theme update
///
/// Used for AI-generated palettes (six colors) and for single-field tweaks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_background: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_text: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent_text: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_text: Option<HexColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<CornerRadius>,
}

impl ThemePatch {
    /// Single-field background tweak
    pub fn background(color: HexColor) -> Self {
        Self {
            background: Some(color),
            ..Self::default()
        }
    }

    /// Single-field roundness tweak
    pub fn corner_radius(radius: CornerRadius) -> Self {
        Self {
            corner_radius: Some(radius),
            ..Self::default()
        }
    }

    /// Combine two patches; fields set in `other` win
    pub fn merge(mut self, other: &ThemePatch) -> Self {
        self.background = other.background.or(self.background);
        self.key_background = other.key_background.or(self.key_background);
        self.key_text = other.key_text.or(self.key_text);
        self.accent = other.accent.or(self.accent);
        self.accent_text = other.accent_text.or(self.accent_text);
        self.suggestion_text = other.suggestion_text.or(self.suggestion_text);
        self.corner_radius = other.corner_radius.or(self.corner_radius);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ==================== Generated Palette ====================

/// The six-color palette returned by theme generation
///
/// Every field is required, so a palette that deserializes is always complete
/// and every color has already been validated by [`HexColor`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPalette {
    pub background: HexColor,
    pub key_background: HexColor,
    pub key_text: HexColor,
    pub accent: HexColor,
    pub accent_text: HexColor,
    pub suggestion_text: HexColor,
}

impl GeneratedPalette {
    /// JSON field names in the order the model is asked for them
    pub const FIELDS: [&'static str; 6] = [
        "background",
        "keyBackground",
        "keyText",
        "accent",
        "accentText",
        "suggestionText",
    ];
}

impl From<GeneratedPalette> for ThemePatch {
    fn from(p: GeneratedPalette) -> Self {
        Self {
            background: Some(p.background),
            key_background: Some(p.key_background),
            key_text: Some(p.key_text),
            accent: Some(p.accent),
            accent_text: Some(p.accent_text),
            suggestion_text: Some(p.suggestion_text),
            corner_radius: None,
        }
    }
}

// ==================== Preset Definitions ====================

struct PresetPalette {
    background: HexColor,
    key_background: HexColor,
    key_text: HexColor,
    accent: HexColor,
    accent_text: HexColor,
    suggestion_text: HexColor,
    corner_radius: CornerRadius,
}

const MATERIAL_YOU: PresetPalette = PresetPalette {
    background: HexColor::rgb(0xF7, 0xF2, 0xFA),
    key_background: HexColor::rgb(0xFE, 0xF7, 0xFF),
    key_text: HexColor::rgb(0x1D, 0x1B, 0x20),
    accent: HexColor::rgb(0xD0, 0xBC, 0xFF),
    accent_text: HexColor::rgb(0x38, 0x1E, 0x72),
    suggestion_text: HexColor::rgb(0x67, 0x50, 0xA4),
    corner_radius: CornerRadius::new(24),
};

const DARK_MODE: PresetPalette = PresetPalette {
    background: HexColor::rgb(0x1C, 0x1B, 0x1F),
    key_background: HexColor::rgb(0x2B, 0x29, 0x30),
    key_text: HexColor::rgb(0xE6, 0xE1, 0xE5),
    accent: HexColor::rgb(0xD0, 0xBC, 0xFF),
    accent_text: HexColor::rgb(0x38, 0x1E, 0x72),
    suggestion_text: HexColor::rgb(0xD0, 0xBC, 0xFF),
    corner_radius: CornerRadius::new(8),
};

const PIXEL_BLUE: PresetPalette = PresetPalette {
    background: HexColor::rgb(0xE3, 0xF2, 0xFD),
    key_background: HexColor::rgb(0xFF, 0xFF, 0xFF),
    key_text: HexColor::rgb(0x0D, 0x47, 0xA1),
    accent: HexColor::rgb(0x21, 0x96, 0xF3),
    accent_text: HexColor::rgb(0xFF, 0xFF, 0xFF),
    suggestion_text: HexColor::rgb(0x19, 0x76, 0xD2),
    corner_radius: CornerRadius::new(12),
};

const CYBERPUNK: PresetPalette = PresetPalette {
    background: HexColor::rgb(0x0D, 0x02, 0x21),
    key_background: HexColor::rgb(0x1A, 0x0B, 0x2E),
    key_text: HexColor::rgb(0x00, 0xF5, 0xFF),
    accent: HexColor::rgb(0xFF, 0x00, 0xFF),
    accent_text: HexColor::rgb(0xFF, 0xFF, 0xFF),
    suggestion_text: HexColor::rgb(0xFF, 0xD7, 0x00),
    corner_radius: CornerRadius::new(4),
};

/// All presets as complete records
pub fn presets() -> Vec<KeyboardTheme> {
    PresetId::all().iter().map(|id| KeyboardTheme::preset(*id)).collect()
}

/// Look up a preset by id string, falling back to the default preset
pub fn create_theme(name: &str) -> KeyboardTheme {
    KeyboardTheme::preset(name.parse().unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hex_color_parse() {
        assert_eq!("#F7F2FA".parse::<HexColor>().unwrap(), HexColor::rgb(0xF7, 0xF2, 0xFA));
        assert_eq!("#f7f2fa".parse::<HexColor>().unwrap(), HexColor::rgb(0xF7, 0xF2, 0xFA));
        assert_eq!(" #0D0221 ".parse::<HexColor>().unwrap(), HexColor::rgb(0x0D, 0x02, 0x21));
        assert_eq!("#F0A".parse::<HexColor>().unwrap(), HexColor::rgb(0xFF, 0x00, 0xAA));
    }

    #[test]
    fn test_hex_color_rejects_invalid() {
        assert!(matches!("F7F2FA".parse::<HexColor>(), Err(ColorError::MissingHash(_))));
        assert!(matches!("#F7F2".parse::<HexColor>(), Err(ColorError::BadLength(_))));
        assert!(matches!("#GGGGGG".parse::<HexColor>(), Err(ColorError::BadDigit(_))));
        assert!(matches!("#".parse::<HexColor>(), Err(ColorError::BadLength(_))));
        assert!("red".parse::<HexColor>().is_err());
        assert!("#12345é".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_hex_color_display() {
        assert_eq!(HexColor::rgb(0x0d, 0x47, 0xa1).to_string(), "#0D47A1");
        assert_eq!("#abc".parse::<HexColor>().unwrap().to_string(), "#AABBCC");
    }

    #[test]
    fn test_hex_color_to_color() {
        assert_eq!(HexColor::rgb(1, 2, 3).to_color(), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn test_hex_color_serde() {
        let json = serde_json::to_string(&HexColor::rgb(0xFF, 0, 0xFF)).unwrap();
        assert_eq!(json, "\"#FF00FF\"");

        let parsed: HexColor = serde_json::from_str("\"#00f5ff\"").unwrap();
        assert_eq!(parsed, HexColor::rgb(0x00, 0xF5, 0xFF));

        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }

    #[test]
    fn test_corner_radius_clamps_and_steps() {
        assert_eq!(CornerRadius::new(40).px(), 24);
        assert_eq!(CornerRadius::new(0).stepped().px(), 4);
        assert_eq!(CornerRadius::new(22).stepped().px(), 24);
        assert_eq!(CornerRadius::new(24).stepped().px(), 0);
        assert_eq!(CornerRadius::new(12).to_string(), "12px");
    }

    #[test]
    fn test_corner_radius_border_type() {
        assert_eq!(CornerRadius::new(0).border_type(), BorderType::Plain);
        assert_eq!(CornerRadius::new(4).border_type(), BorderType::Plain);
        assert_eq!(CornerRadius::new(8).border_type(), BorderType::Rounded);
    }

    #[test]
    fn test_preset_id_from_str() {
        assert_eq!("material-you".parse::<PresetId>().unwrap(), PresetId::MaterialYou);
        assert_eq!("DARK-MODE".parse::<PresetId>().unwrap(), PresetId::DarkMode);
        assert_eq!("pixel".parse::<PresetId>().unwrap(), PresetId::PixelBlue);
        assert_eq!("neon".parse::<PresetId>().unwrap(), PresetId::Cyberpunk);
        assert!("unknown".parse::<PresetId>().is_err());
    }

    #[test]
    fn test_preset_id_display() {
        for id in PresetId::all() {
            assert_eq!(id.to_string().parse::<PresetId>().unwrap(), *id);
        }
    }

    #[test]
    fn test_presets_are_complete_and_distinct() {
        let all = presets();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].name, "Material You");
        assert_eq!(all[1].name, "Android Dark");
        assert_eq!(all[2].name, "Pixel Blue");
        assert_eq!(all[3].name, "Neon Night");
        assert!(all.iter().all(|t| !t.is_customized()));
    }

    #[test]
    fn test_cyberpunk_preset_colors() {
        let t = KeyboardTheme::preset(PresetId::Cyberpunk);
        assert_eq!(t.background.to_string(), "#0D0221");
        assert_eq!(t.key_text.to_string(), "#00F5FF");
        assert_eq!(t.suggestion_text.to_string(), "#FFD700");
        assert_eq!(t.corner_radius.px(), 4);
    }

    #[test]
    fn test_create_theme() {
        assert_eq!(create_theme("pixel-blue").id, PresetId::PixelBlue);
        assert_eq!(create_theme("nonsense").id, PresetId::MaterialYou);
    }

    #[test]
    fn test_apply_partial_keeps_other_fields() {
        let mut theme = KeyboardTheme::preset(PresetId::DarkMode);
        let before = theme.clone();
        theme.apply(&ThemePatch::background(HexColor::rgb(0x11, 0x22, 0x33)));

        assert_eq!(theme.background, HexColor::rgb(0x11, 0x22, 0x33));
        assert_eq!(theme.key_background, before.key_background);
        assert_eq!(theme.accent, before.accent);
        assert_eq!(theme.corner_radius, before.corner_radius);
        assert_eq!(theme.id, PresetId::DarkMode);
        assert!(theme.is_customized());
    }

    #[test]
    fn test_apply_empty_patch_is_identity() {
        let theme = KeyboardTheme::preset(PresetId::PixelBlue);
        assert_eq!(theme.clone().merged(&ThemePatch::default()), theme);
        assert!(ThemePatch::default().is_empty());
    }

    #[test]
    fn test_generated_palette_into_patch() {
        let palette = GeneratedPalette {
            background: HexColor::rgb(1, 1, 1),
            key_background: HexColor::rgb(2, 2, 2),
            key_text: HexColor::rgb(3, 3, 3),
            accent: HexColor::rgb(4, 4, 4),
            accent_text: HexColor::rgb(5, 5, 5),
            suggestion_text: HexColor::rgb(6, 6, 6),
        };
        let theme = KeyboardTheme::preset(PresetId::MaterialYou).merged(&palette.into());
        assert_eq!(theme.suggestion_text, HexColor::rgb(6, 6, 6));
        // Roundness is not part of a generated palette
        assert_eq!(theme.corner_radius.px(), 24);
    }

    #[test]
    fn test_generated_palette_requires_all_fields() {
        let json = r##"{"background":"#000000","keyBackground":"#111111","keyText":"#222222","accent":"#333333","accentText":"#444444"}"##;
        assert!(serde_json::from_str::<GeneratedPalette>(json).is_err());
    }

    #[test]
    fn test_theme_patch_json_uses_camel_case() {
        let patch = ThemePatch {
            key_background: Some(HexColor::rgb(0, 0, 0)),
            ..ThemePatch::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r##"{"keyBackground":"#000000"}"##);
    }

    fn arb_color() -> impl Strategy<Value = HexColor> {
        (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| HexColor::rgb(r, g, b))
    }

    fn arb_patch() -> impl Strategy<Value = ThemePatch> {
        (
            proptest::option::of(arb_color()),
            proptest::option::of(arb_color()),
            proptest::option::of(arb_color()),
            proptest::option::of(arb_color()),
            proptest::option::of(arb_color()),
            proptest::option::of(arb_color()),
            proptest::option::of((0u8..=24).prop_map(CornerRadius::new)),
        )
            .prop_map(|(bg, kb, kt, ac, at, st, cr)| ThemePatch {
                background: bg,
                key_background: kb,
                key_text: kt,
                accent: ac,
                accent_text: at,
                suggestion_text: st,
                corner_radius: cr,
            })
    }

    /// Keep only the fields of `patch` that `mask` does not set
    fn without_fields_of(patch: ThemePatch, mask: &ThemePatch) -> ThemePatch {
        ThemePatch {
            background: patch.background.filter(|_| mask.background.is_none()),
            key_background: patch.key_background.filter(|_| mask.key_background.is_none()),
            key_text: patch.key_text.filter(|_| mask.key_text.is_none()),
            accent: patch.accent.filter(|_| mask.accent.is_none()),
            accent_text: patch.accent_text.filter(|_| mask.accent_text.is_none()),
            suggestion_text: patch.suggestion_text.filter(|_| mask.suggestion_text.is_none()),
            corner_radius: patch.corner_radius.filter(|_| mask.corner_radius.is_none()),
        }
    }

    proptest! {
        #[test]
        fn prop_disjoint_patches_commute(a in arb_patch(), b in arb_patch(), preset in 0usize..4) {
            let b = without_fields_of(b, &a);
            let base = KeyboardTheme::preset(PresetId::all()[preset]);

            let sequential = base.clone().merged(&a).merged(&b);
            let reversed = base.clone().merged(&b).merged(&a);
            let combined = base.merged(&a.clone().merge(&b));

            prop_assert_eq!(&sequential, &combined);
            prop_assert_eq!(&sequential, &reversed);
        }
    }
}
