#![forbid(unsafe_code)]

//! Fixed-size cell grid.
//!
//! Drawing helpers accept signed coordinates and a clip rectangle so that
//! content translated partly off-screen is cut at the edge instead of being
//! shifted back into view.

use droplist_core::geometry::Rect;
use unicode_width::UnicodeWidthChar;

use crate::cell::{Cell, CellStyle};

/// A 2D grid of cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create a blank buffer.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Get a mutable reference to the cell at (x, y).
    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Overwrite the cell at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Blank every cell in `rect` and apply `style` to it.
    pub fn fill(&mut self, rect: Rect, style: CellStyle) {
        let rect = rect.intersection(&self.bounds());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    *cell = Cell::default();
                    cell.apply(style);
                }
            }
        }
    }

    /// Draw one glyph at a signed position if it is inside `clip`.
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char, style: CellStyle, clip: Rect) {
        if clip.contains_signed(x, y) {
            // contains_signed guarantees both fit in u16.
            if let Some(cell) = self.get_mut(x as u16, y as u16) {
                cell.ch = ch;
                cell.apply(style);
            }
        }
    }

    /// Draw `text` starting at a signed position, clipped to `clip`.
    ///
    /// Control and zero-width characters are skipped. A double-width glyph
    /// is drawn only if both of its cells are visible. Returns the x
    /// position after the last glyph, visible or not.
    pub fn draw_str(&mut self, x: i32, y: i32, text: &str, style: CellStyle, clip: Rect) -> i32 {
        let clip = clip.intersection(&self.bounds());
        let mut cursor = x;
        for ch in text.chars() {
            let width = match ch.width() {
                Some(w) if w > 0 => w as i32,
                _ => continue,
            };
            if width == 2 {
                let next = cursor.saturating_add(1);
                if clip.contains_signed(cursor, y) && clip.contains_signed(next, y) {
                    self.draw_char(cursor, y, ch, style, clip);
                    self.draw_char(next, y, Cell::CONTINUATION, style, clip);
                }
            } else {
                self.draw_char(cursor, y, ch, style, clip);
            }
            cursor = cursor.saturating_add(width);
        }
        cursor
    }

    /// Row contents as a string (wide-glyph continuations skipped).
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.is_continuation())
            .map(|cell| cell.ch)
            .collect()
    }

    /// All rows, newline separated, with trailing spaces trimmed.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
