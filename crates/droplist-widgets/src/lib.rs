#![forbid(unsafe_code)]

//! Draggable list panel widget.
//!
//! # Role in droplist
//! `droplist-widgets` composes the gesture core with a grouped list
//! renderer: [`panel::DraggableList`] draws a bordered panel of records
//! (optionally grouped) at the live translation held by
//! [`panel::DraggableListState`], and turns pointer input into tap and drop
//! notifications.
//!
//! # Modules
//! - [`item`]: the [`item::ListRecord`] trait and a JSON-friendly [`item::Item`].
//! - [`grouping`]: key normalization and first-seen-order grouping.
//! - [`style`]: panel appearance with override merging.
//! - [`panel`]: the widget, its state, and callback dispatch.

pub mod grouping;
pub mod item;
pub mod panel;
pub mod style;

use droplist_core::geometry::Rect;
use droplist_render::frame::Frame;

/// A widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the frame within `area`.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

pub use grouping::{Group, GroupBy, ListView, NormalizedItem, UNKNOWN_GROUP};
pub use item::{Item, ListRecord};
pub use panel::{
    Callbacks, DraggableList, DraggableListState, ListCallbacks, PanelOutcome, TapTarget,
};
pub use style::PanelStyle;
