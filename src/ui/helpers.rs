//! Low-level frame writing helpers.
//!
//! Components write into a [`Frame`] buffer instead of stdout so a whole
//! screen is emitted with one `print!` and can be inspected in tests.

use crate::ui::theme::Theme;
use std::fmt::Write as _;

/// A screen's worth of ANSI output.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    buffer: String,
}

impl Frame {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the cursor to a 1-indexed `row`, `col`.
    pub fn position(&mut self, row: usize, col: usize) -> &mut Self {
        let _ = write!(self.buffer, "\u{1b}[{row};{col}H");
        self
    }

    /// Appends raw text, escapes included.
    pub fn push(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text);
        self
    }

    /// Sets the foreground to a `#rrggbb` color.
    pub fn fg(&mut self, hex: &str) -> &mut Self {
        self.push(&Theme::fg(hex))
    }

    /// Sets the background to a `#rrggbb` color.
    pub fn bg(&mut self, hex: &str) -> &mut Self {
        self.push(&Theme::bg(hex))
    }

    pub fn reset(&mut self) -> &mut Self {
        self.push(Theme::reset())
    }

    /// Appends `count` spaces.
    pub fn pad(&mut self, count: usize) -> &mut Self {
        self.buffer.extend(std::iter::repeat(' ').take(count));
        self
    }

    /// Writes `text` centered in `width` columns, padding both sides.
    pub fn centered(&mut self, text: &str, width: usize) -> &mut Self {
        let len = display_width(text).min(width);
        let left = (width - len) / 2;
        self.pad(left).push(&clip(text, width)).pad(width - left - len)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Consumes the frame, returning the buffered output.
    #[must_use]
    pub fn into_string(self) -> String {
        self.buffer
    }
}

/// Column count of `text`, counting each `char` as one column.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `width` chars.
#[must_use]
pub fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Strips ANSI escape sequences, leaving the visible text.
#[must_use]
pub fn strip_ansi(text: &str) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            for terminator in chars.by_ref() {
                if terminator.is_ascii_alphabetic() {
                    break;
                }
            }
        } else {
            plain.push(c);
        }
    }
    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fills_the_width() {
        let mut frame = Frame::new();
        frame.centered("abc", 9);
        assert_eq!(frame.as_str(), "   abc   ");
    }

    #[test]
    fn centered_clips_long_text() {
        let mut frame = Frame::new();
        frame.centered("abcdef", 4);
        assert_eq!(frame.as_str(), "abcd");
    }

    #[test]
    fn strip_ansi_keeps_visible_text() {
        let mut frame = Frame::new();
        frame.position(2, 1).fg("#ffffff").push("Salt").reset();
        assert_eq!(strip_ansi(frame.as_str()), "Salt");
    }
}
