#![forbid(unsafe_code)]

//! Render kernel: cells, buffers, border glyphs, and hit-tested frames.
//!
//! # Role in droplist
//! `droplist-render` is the drawing surface. Widgets write glyphs into a
//! [`buffer::Buffer`] held by a [`frame::Frame`] and register interactive
//! rectangles with the frame's hit grid so that pointer positions can be
//! mapped back to list rows.
//!
//! All drawing helpers take signed coordinates plus a clip rectangle: the
//! panel moves freely under the pointer and may hang off any edge.

pub mod buffer;
pub mod cell;
pub mod drawing;
pub mod frame;

pub use buffer::Buffer;
pub use cell::{Cell, CellFlags, CellStyle, Rgb};
pub use drawing::{BorderChars, BorderType, Draw};
pub use frame::{Frame, HitData, HitGrid, HitId, HitRegion};
