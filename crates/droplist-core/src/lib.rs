#![forbid(unsafe_code)]

//! Core: geometry, pointer events, and drag gesture recognition.
//!
//! # Role in droplist
//! `droplist-core` is the input layer. It owns the pointer event vocabulary
//! the host surface speaks and the gesture state machine that turns those
//! events into a live panel translation and a drop notification.
//!
//! # Primary responsibilities
//! - **PointerEvent**: down / move / up / cancel samples with absolute coordinates.
//! - **GestureState**: an explicit, copyable state value with a pure reducer.
//! - **DragController**: the single writer of one panel's gesture state.
//! - **Geometry**: host-unit points and offsets, cell rectangles.
//!
//! # How it fits in the system
//! The render kernel (`droplist-render`) is independent of input. The widget
//! crate (`droplist-widgets`) feeds pointer events into a `DragController`
//! and reads back the translation when drawing.

pub mod event;
pub mod geometry;
pub mod gesture;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

pub use event::{PointerEvent, PointerPhase};
pub use geometry::{Offset, Point, Rect};
pub use gesture::{
    DragController, DragState, GestureConfig, GestureConfigError, GestureEffect,
    GestureNoopReason, GesturePhase, GestureState, GestureTransition,
};
