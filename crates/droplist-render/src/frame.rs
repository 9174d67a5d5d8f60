#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for a render pass.
//!
//! Widgets draw into [`Frame::buffer`] and, when the frame carries a
//! [`HitGrid`], register the rectangles that should respond to pointer
//! input. The host hit-tests pointer positions against the grid of the
//! last rendered frame.
//!
//! ```
//! use droplist_core::geometry::Rect;
//! use droplist_render::frame::{Frame, HitId, HitRegion};
//!
//! let mut frame = Frame::with_hit_grid(20, 5);
//! frame.register_hit(Rect::new(0, 1, 20, 2), HitId::new(1), HitRegion::Content, 7);
//! assert_eq!(frame.hit_test(3, 2), Some((HitId::new(1), HitRegion::Content, 7)));
//! ```

use droplist_core::geometry::Rect;

use crate::buffer::Buffer;

/// Identifier for a clickable region in the hit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque widget data attached to a hit cell.
pub type HitData = u64;

/// Which part of a widget a hit cell belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
    /// Widget border or header.
    Border,
    /// Drag handle.
    Handle,
}

/// A single hit cell in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitCell {
    pub widget_id: Option<HitId>,
    pub region: HitRegion,
    pub data: HitData,
}

/// Maps screen cells to widget IDs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    /// Create an empty grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the hit cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&HitCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Register a region. Later registrations overwrite earlier ones.
    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let rect = rect.intersection(&Rect::from_size(self.width, self.height));
        let hit = HitCell {
            widget_id: Some(widget_id),
            region,
            data,
        };
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = hit;
                }
            }
        }
    }

    /// Hit test at (x, y).
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.get(x, y)
            .and_then(|cell| cell.widget_id.map(|id| (id, cell.region, cell.data)))
    }

    /// Forget every registration.
    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// The render target for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// The cell grid for this render pass.
    pub buffer: Buffer,
    /// Optional hit grid for pointer hit testing.
    pub hit_grid: Option<HitGrid>,
}

impl Frame {
    /// Frame without hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: None,
        }
    }

    /// Frame with an empty hit grid.
    pub fn with_hit_grid(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: Some(HitGrid::new(width, height)),
        }
    }

    /// Frame width.
    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    /// Frame height.
    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    /// The full frame area.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.buffer.bounds()
    }

    /// Register a hit region. Returns `false` if the frame has no hit grid.
    pub fn register_hit(
        &mut self,
        rect: Rect,
        id: HitId,
        region: HitRegion,
        data: HitData,
    ) -> bool {
        if let Some(ref mut grid) = self.hit_grid {
            grid.register(rect, id, region, data);
            true
        } else {
            false
        }
    }

    /// Hit test at (x, y), if hit testing is enabled.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.as_ref().and_then(|grid| grid.hit_test(x, y))
    }

    /// Hit test at a fractional pointer position.
    ///
    /// Positions are floored to the containing cell; anything negative or
    /// non-finite misses.
    pub fn hit_test_point(&self, x: f32, y: f32) -> Option<(HitId, HitRegion, HitData)> {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return None;
        }
        let (cx, cy) = (x.floor(), y.floor());
        if cx > f32::from(u16::MAX) || cy > f32::from(u16::MAX) {
            return None;
        }
        self.hit_test(cx as u16, cy as u16)
    }

    /// Blank the buffer and forget hit regions.
    pub fn clear(&mut self) {
        self.buffer.clear();
        if let Some(ref mut grid) = self.hit_grid {
            grid.clear();
        }
    }
}
