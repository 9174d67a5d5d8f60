#![forbid(unsafe_code)]

//! Border glyph sets and box drawing.

use droplist_core::geometry::Rect;

use crate::buffer::Buffer;
use crate::cell::CellStyle;

/// Border characters for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub vertical: char,
    pub horizontal: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
}

impl BorderChars {
    /// Square corners (┌, ┐).
    pub const SQUARE: Self = Self {
        vertical: '│',
        horizontal: '─',
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
    };

    /// Rounded corners (╭, ╮, ╯, ╰).
    pub const ROUNDED: Self = Self {
        vertical: '│',
        horizontal: '─',
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
    };

    /// Double lines (║, ═).
    pub const DOUBLE: Self = Self {
        vertical: '║',
        horizontal: '═',
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
    };

    /// ASCII only (+, -, |).
    pub const ASCII: Self = Self {
        vertical: '|',
        horizontal: '-',
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
    };
}

/// Border style presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderType {
    Square,
    #[default]
    Rounded,
    Double,
    Ascii,
}

impl BorderType {
    pub const fn chars(self) -> BorderChars {
        match self {
            Self::Square => BorderChars::SQUARE,
            Self::Rounded => BorderChars::ROUNDED,
            Self::Double => BorderChars::DOUBLE,
            Self::Ascii => BorderChars::ASCII,
        }
    }
}

/// Box drawing on a [`Buffer`] with signed placement.
pub trait Draw {
    /// Outline a `width` x `height` box whose top-left corner is at `(x, y)`.
    fn draw_border(
        &mut self,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        chars: BorderChars,
        style: CellStyle,
        clip: Rect,
    );
}

impl Draw for Buffer {
    fn draw_border(
        &mut self,
        x: i32,
        y: i32,
        width: u16,
        height: u16,
        chars: BorderChars,
        style: CellStyle,
        clip: Rect,
    ) {
        if width < 2 || height < 2 {
            return;
        }
        let right = x.saturating_add(i32::from(width) - 1);
        let bottom = y.saturating_add(i32::from(height) - 1);
        for cx in x.saturating_add(1)..right {
            self.draw_char(cx, y, chars.horizontal, style, clip);
            self.draw_char(cx, bottom, chars.horizontal, style, clip);
        }
        for cy in y.saturating_add(1)..bottom {
            self.draw_char(x, cy, chars.vertical, style, clip);
            self.draw_char(right, cy, chars.vertical, style, clip);
        }
        self.draw_char(x, y, chars.top_left, style, clip);
        self.draw_char(right, y, chars.top_right, style, clip);
        self.draw_char(x, bottom, chars.bottom_left, style, clip);
        self.draw_char(right, bottom, chars.bottom_right, style, clip);
    }
}
