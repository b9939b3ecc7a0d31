//! Key descriptors and static keyboard layouts

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Named arrangement of keys
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Qwerty,
    Symbols,
    Numbers,
}

impl Layout {
    /// Rows of this layout, top to bottom
    pub fn rows(&self) -> &'static [&'static [KeyDescriptor]] {
        match self {
            Layout::Qwerty => QWERTY_LAYOUT,
            Layout::Symbols => SYMBOLS_LAYOUT,
            Layout::Numbers => NUMBERS_LAYOUT,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Qwerty => "qwerty",
            Layout::Symbols => "symbols",
            Layout::Numbers => "numbers",
        }
    }
}

impl FromStr for Layout {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qwerty" | "abc" => Ok(Layout::Qwerty),
            "symbols" | "?123" => Ok(Layout::Symbols),
            "numbers" | "=*<" => Ok(Layout::Numbers),
            _ => Err(()),
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What a key does when activated
///
/// A layout switch always carries its target layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Char,
    Delete,
    Shift,
    Space,
    Enter,
    Switch(Layout),
    Assist,
}

impl KeyAction {
    /// Function keys are drawn in the accent color
    pub fn is_accent(&self) -> bool {
        !matches!(self, KeyAction::Char | KeyAction::Space)
    }
}

/// A single key on a layout
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyDescriptor {
    pub label: &'static str,
    pub action: KeyAction,
    /// Text emitted instead of the label, if any
    pub value: Option<&'static str>,
    /// Width relative to a regular key
    pub width: f32,
}

impl KeyDescriptor {
    pub const fn new(label: &'static str, action: KeyAction) -> Self {
        Self {
            label,
            action,
            value: None,
            width: 1.0,
        }
    }

    pub const fn char(label: &'static str) -> Self {
        Self::new(label, KeyAction::Char)
    }

    pub const fn wide(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub const fn with_value(mut self, value: &'static str) -> Self {
        self.value = Some(value);
        self
    }

    /// Text a character key emits, upper-cased when shifted
    pub fn emitted(&self, shifted: bool) -> String {
        let text = self.value.unwrap_or(self.label);
        if shifted {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    /// Label as drawn on the keyboard
    pub fn display_label(&self, shifted: bool) -> String {
        match self.action {
            KeyAction::Char if shifted => self.label.to_uppercase(),
            KeyAction::Space => "space".to_string(),
            _ => self.label.to_string(),
        }
    }
}

const fn c(label: &'static str) -> KeyDescriptor {
    KeyDescriptor::char(label)
}

const SHIFT: KeyDescriptor = KeyDescriptor::new("⇧", KeyAction::Shift).wide(1.5);
const DELETE: KeyDescriptor = KeyDescriptor::new("⌫", KeyAction::Delete).wide(1.5);
const SPACE: KeyDescriptor = KeyDescriptor::new(" ", KeyAction::Space).wide(4.0);
const ENTER: KeyDescriptor = KeyDescriptor::new("↵", KeyAction::Enter).wide(1.5);
const ASSIST: KeyDescriptor = KeyDescriptor::new("AI", KeyAction::Assist);

pub const QWERTY_LAYOUT: &[&[KeyDescriptor]] = &[
    &[c("q"), c("w"), c("e"), c("r"), c("t"), c("y"), c("u"), c("i"), c("o"), c("p")],
    &[c("a"), c("s"), c("d"), c("f"), c("g"), c("h"), c("j"), c("k"), c("l")],
    &[SHIFT, c("z"), c("x"), c("c"), c("v"), c("b"), c("n"), c("m"), DELETE],
    &[
        KeyDescriptor::new("?123", KeyAction::Switch(Layout::Symbols)).wide(1.5),
        ASSIST,
        SPACE,
        c("."),
        ENTER,
    ],
];

pub const SYMBOLS_LAYOUT: &[&[KeyDescriptor]] = &[
    &[c("1"), c("2"), c("3"), c("4"), c("5"), c("6"), c("7"), c("8"), c("9"), c("0")],
    &[c("@"), c("#"), c("$"), c("_"), c("&"), c("-"), c("+"), c("("), c(")")],
    &[
        KeyDescriptor::new("=*<", KeyAction::Switch(Layout::Numbers)).wide(1.5),
        c("*"),
        c("\""),
        c("'"),
        c(":"),
        c(";"),
        c("!"),
        c("?"),
        DELETE,
    ],
    &[
        KeyDescriptor::new("ABC", KeyAction::Switch(Layout::Qwerty)).wide(1.5),
        c(","),
        SPACE,
        c("."),
        ENTER,
    ],
];

pub const NUMBERS_LAYOUT: &[&[KeyDescriptor]] = &[
    &[c("~"), c("`"), c("|"), c("•"), c("√"), c("π"), c("÷"), c("×"), c("¶"), c("∆")],
    &[c("£"), c("€"), c("¥"), c("^"), c("°"), c("="), c("{"), c("}"), c("\\")],
    &[
        KeyDescriptor::new("?123", KeyAction::Switch(Layout::Symbols)).wide(1.5),
        c("%"),
        c("©"),
        c("®"),
        c("™"),
        c("<"),
        c(">"),
        c("["),
        DELETE,
    ],
    &[
        KeyDescriptor::new("ABC", KeyAction::Switch(Layout::Qwerty)).wide(1.5),
        c("]"),
        SPACE,
        c("/"),
        ENTER,
    ],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_from_str() {
        assert_eq!("qwerty".parse::<Layout>().unwrap(), Layout::Qwerty);
        assert_eq!("SYMBOLS".parse::<Layout>().unwrap(), Layout::Symbols);
        assert_eq!("=*<".parse::<Layout>().unwrap(), Layout::Numbers);
        assert!("dvorak".parse::<Layout>().is_err());
    }

    #[test]
    fn test_every_layout_has_four_rows_and_core_keys() {
        for layout in [Layout::Qwerty, Layout::Symbols, Layout::Numbers] {
            let rows = layout.rows();
            assert_eq!(rows.len(), 4, "{layout}");
            let keys: Vec<_> = rows.iter().flat_map(|r| r.iter()).collect();
            assert!(keys.iter().any(|k| k.action == KeyAction::Delete), "{layout}");
            assert!(keys.iter().any(|k| k.action == KeyAction::Space), "{layout}");
            assert!(keys.iter().any(|k| k.action == KeyAction::Enter), "{layout}");
        }
    }

    #[test]
    fn test_switch_keys_lead_to_other_layouts() {
        for layout in [Layout::Qwerty, Layout::Symbols, Layout::Numbers] {
            for key in layout.rows().iter().flat_map(|r| r.iter()) {
                if let KeyAction::Switch(target) = key.action {
                    assert_ne!(target, layout, "{} on {layout}", key.label);
                }
            }
        }
    }

    #[test]
    fn test_every_layout_can_reach_qwerty() {
        for layout in [Layout::Symbols, Layout::Numbers] {
            let reaches = layout
                .rows()
                .iter()
                .flat_map(|r| r.iter())
                .any(|k| k.action == KeyAction::Switch(Layout::Qwerty));
            assert!(reaches, "{layout}");
        }
    }

    #[test]
    fn test_emitted_text() {
        let q = KeyDescriptor::char("q");
        assert_eq!(q.emitted(false), "q");
        assert_eq!(q.emitted(true), "Q");

        let valued = KeyDescriptor::char("smile").with_value(":)");
        assert_eq!(valued.emitted(false), ":)");
    }

    #[test]
    fn test_display_label() {
        assert_eq!(KeyDescriptor::char("a").display_label(true), "A");
        assert_eq!(KeyDescriptor::char("a").display_label(false), "a");
        assert_eq!(SPACE.display_label(true), "space");
        assert_eq!(SHIFT.display_label(true), "⇧");
    }

    #[test]
    fn test_accent_keys() {
        assert!(ENTER.action.is_accent());
        assert!(ASSIST.action.is_accent());
        assert!(KeyAction::Switch(Layout::Qwerty).is_accent());
        assert!(!KeyAction::Char.is_accent());
        assert!(!KeyAction::Space.is_accent());
    }
}
