#![forbid(unsafe_code)]

//! Cells: one glyph plus its colors and attributes.

use bitflags::bitflags;

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

bitflags! {
    /// Text attributes stored per cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const BOLD = 0b0000_0001;
        const DIM = 0b0000_0010;
        const ITALIC = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
    }
}

/// Colors and attributes applied when drawing.
///
/// `None` colors leave whatever the cell already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellStyle {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub flags: CellFlags,
}

impl CellStyle {
    /// Empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            flags: CellFlags::empty(),
        }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    /// Add attributes.
    #[must_use]
    pub fn flags(mut self, flags: CellFlags) -> Self {
        self.flags |= flags;
        self
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub ch: char,
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::from_char(' ')
    }
}

impl Cell {
    /// Marker for the trailing half of a double-width glyph.
    pub const CONTINUATION: char = '\0';

    /// Plain cell holding `ch`.
    #[must_use]
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            fg: None,
            bg: None,
            flags: CellFlags::empty(),
        }
    }

    /// Whether this cell is the trailing half of a wide glyph.
    #[inline]
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.ch == Self::CONTINUATION
    }

    /// Whether this cell is blank and unstyled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply a style on top of this cell.
    pub fn apply(&mut self, style: CellStyle) {
        if let Some(fg) = style.fg {
            self.fg = Some(fg);
        }
        if let Some(bg) = style.bg {
            self.bg = Some(bg);
        }
        self.flags |= style.flags;
    }
}
