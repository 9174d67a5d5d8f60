#![forbid(unsafe_code)]

//! Pointer events as delivered by the host surface.
//!
//! A gesture is the ordered sequence `Down`, zero or more `Move`, then `Up`
//! or `Cancel`, all from the same pointer. Hosts are not trusted to deliver
//! well-formed sequences; the gesture machine treats anything else as a no-op.

use crate::geometry::Point;

/// Phase of a pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerPhase {
    /// Pointer touched down (the gesture is granted).
    Down,
    /// Pointer moved while down.
    Move,
    /// Pointer released.
    Up,
    /// The host revoked the gesture (another responder took over).
    Cancel,
}

/// One pointer sample with absolute screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerEvent {
    #[cfg_attr(feature = "serde", serde(default))]
    pub pointer_id: u32,
    pub phase: PointerPhase,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub position: Point,
}

impl PointerEvent {
    /// Create a new event.
    #[must_use]
    pub const fn new(pointer_id: u32, phase: PointerPhase, position: Point) -> Self {
        Self {
            pointer_id,
            phase,
            position,
        }
    }

    /// Primary-pointer touch down at `(x, y)`.
    #[must_use]
    pub const fn down(x: f32, y: f32) -> Self {
        Self::new(0, PointerPhase::Down, Point::new(x, y))
    }

    /// Primary-pointer move to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f32, y: f32) -> Self {
        Self::new(0, PointerPhase::Move, Point::new(x, y))
    }

    /// Primary-pointer release at `(x, y)`.
    #[must_use]
    pub const fn up(x: f32, y: f32) -> Self {
        Self::new(0, PointerPhase::Up, Point::new(x, y))
    }

    /// Primary-pointer cancel at `(x, y)`.
    #[must_use]
    pub const fn cancel(x: f32, y: f32) -> Self {
        Self::new(0, PointerPhase::Cancel, Point::new(x, y))
    }

    /// Same event, attributed to another pointer.
    #[must_use]
    pub const fn with_pointer(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn deserializes_flat_script_entry() {
        let ev: PointerEvent =
            serde_json::from_str(r#"{"phase":"move","x":4.5,"y":-1}"#).expect("parse");
        assert_eq!(ev, PointerEvent::moved(4.5, -1.0));
    }

    #[test]
    fn pointer_id_round_trips() {
        let ev = PointerEvent::up(1.0, 2.0).with_pointer(7);
        let json = serde_json::to_string(&ev).expect("serialize");
        assert!(json.contains(r#""pointer_id":7"#));
        assert!(json.contains(r#""phase":"up""#));
    }
}
