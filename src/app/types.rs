//! Application types and state structures

use keysmith::Layout;
use std::time::Instant;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Typing on the keyboard
    Typing,
    /// Preset theme picker modal
    ThemePicker,
    /// Theme description prompt
    ThemePrompt,
    /// Background color entry
    ColorPrompt,
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Notification message
pub struct Notification {
    pub message: String,
    pub level: NotifyLevel,
    pub created_at: Instant,
}

/// Cursor direction over the key grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Highlighted key position in the active layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyCursor {
    pub row: usize,
    pub col: usize,
}

impl KeyCursor {
    /// Move within `layout`, wrapping horizontally and clamping the column
    /// when the target row is shorter
    pub fn moved(self, layout: Layout, direction: Direction) -> Self {
        let rows = layout.rows();
        if rows.is_empty() {
            return Self::default();
        }
        let row_len = |row: usize| rows[row].len().max(1);

        let (row, col) = match direction {
            Direction::Up => {
                let row = if self.row == 0 { rows.len() - 1 } else { self.row - 1 };
                (row, self.col)
            }
            Direction::Down => ((self.row + 1) % rows.len(), self.col),
            Direction::Left => {
                let len = row_len(self.row);
                (self.row, if self.col == 0 { len - 1 } else { self.col - 1 })
            }
            Direction::Right => (self.row, (self.col + 1) % row_len(self.row)),
        };

        Self {
            row,
            col: col.min(row_len(row) - 1),
        }
    }

    /// Clamp into `layout` after a layout switch
    pub fn clamped(self, layout: Layout) -> Self {
        let rows = layout.rows();
        if rows.is_empty() {
            return Self::default();
        }
        let row = self.row.min(rows.len() - 1);
        Self {
            row,
            col: self.col.min(rows[row].len().saturating_sub(1)),
        }
    }
}
