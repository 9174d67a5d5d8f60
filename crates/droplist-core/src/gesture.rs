#![forbid(unsafe_code)]

//! Drag gesture recognition: turns pointer samples into a live translation
//! and a drop notification.
//!
//! # State Machine
//!
//! ```text
//! Idle --Down--> Candidate --Move (> threshold)--> Dragging
//!   ^               |  \--Move (<= threshold)--> Candidate
//!   |               |
//!   +------Up-------+ (Released, tap-eligible)
//!   +------Up------------------------------------ Dragging (Released, drag)
//!   +------Cancel--- Candidate | Dragging (Canceled, no drop)
//! ```
//!
//! [`GestureState`] is a plain value and [`GestureState::reduce`] is a pure
//! function of `(state, event, config)`. [`DragController`] owns one state
//! value and adds transition numbering and logging on top.
//!
//! # Invariants
//!
//! 1. A gesture that reaches `Dragging` releases with `was_drag == true`, even
//!    if the pointer returns near its origin before release.
//! 2. Exactly one `Released` effect is produced per `Down` … `Up` gesture, and
//!    it carries the release event's absolute position.
//! 3. While dragging, `translation() == base + (current - origin)` where `base`
//!    is the committed translation captured on entering `Dragging`.
//! 4. Leaving `Dragging` (release or cancel) commits the live translation, so
//!    the next drag starts where this one ended.
//!
//! # Failure Modes
//!
//! Out-of-sequence events (move without down, duplicate release, a second
//! down while active, events from another pointer, non-finite coordinates)
//! leave the state untouched and produce [`GestureEffect::Noop`] with a
//! [`GestureNoopReason`]. They are never errors.

use std::fmt;

use crate::event::{PointerEvent, PointerPhase};
use crate::geometry::{Offset, Point};

/// Default per-axis movement (host units) a gesture must exceed to become a drag.
pub const DEFAULT_DRAG_THRESHOLD: f32 = 5.0;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for gesture recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureConfig {
    /// Per-axis displacement a pointer must exceed before a drag starts
    /// (default: 5.0). Movement within the threshold in both axes stays a
    /// potential tap.
    pub drag_threshold: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl GestureConfig {
    /// Construct a config with an explicit drag threshold.
    pub fn new(drag_threshold: f32) -> Result<Self, GestureConfigError> {
        if !drag_threshold.is_finite() || drag_threshold < 0.0 {
            return Err(GestureConfigError::InvalidDragThreshold {
                threshold: drag_threshold,
            });
        }
        Ok(Self { drag_threshold })
    }

    /// Whether `delta` exceeds the threshold on either axis.
    #[inline]
    #[must_use]
    pub fn exceeds_threshold(&self, delta: Offset) -> bool {
        delta.x.abs() > self.drag_threshold || delta.y.abs() > self.drag_threshold
    }
}

/// Gesture configuration errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureConfigError {
    InvalidDragThreshold { threshold: f32 },
}

impl fmt::Display for GestureConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDragThreshold { threshold } => {
                write!(
                    f,
                    "drag threshold must be finite and >= 0 (got {threshold})"
                )
            }
        }
    }
}

impl std::error::Error for GestureConfigError {}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Lifecycle phase of the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "phase", rename_all = "snake_case"))]
pub enum GesturePhase {
    /// No pointer is down.
    #[default]
    Idle,
    /// Pointer is down and has not moved past the threshold yet.
    Candidate {
        pointer_id: u32,
        origin: Point,
        current: Point,
    },
    /// Pointer moved past the threshold; the panel follows it.
    Dragging {
        pointer_id: u32,
        origin: Point,
        current: Point,
        /// Committed translation captured on entering this phase.
        base: Offset,
    },
}

impl GesturePhase {
    /// Short label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Candidate { .. } => "candidate",
            Self::Dragging { .. } => "dragging",
        }
    }

    const fn pointer_id(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Candidate { pointer_id, .. } | Self::Dragging { pointer_id, .. } => {
                Some(*pointer_id)
            }
        }
    }
}

/// Snapshot read by the renderer: where the panel is, and whether a drag is
/// in progress (item taps are suppressed while it is).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragState {
    pub translation: Offset,
    pub is_dragging: bool,
}

/// Explicit gesture state: the current phase plus the last committed
/// translation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureState {
    pub phase: GesturePhase,
    pub committed: Offset,
}

/// Explicit no-op diagnostics for events that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GestureNoopReason {
    /// Move, release, or cancel with no pointer down.
    IdleWithoutActiveGesture,
    /// A second touch-down while a gesture is active.
    GestureAlreadyInProgress,
    /// The event belongs to a different pointer than the active gesture.
    PointerMismatch,
    /// The event carries NaN or infinite coordinates, or would push the
    /// translation out of the finite range.
    NonFinitePosition,
    /// Candidate movement within the threshold (position is still tracked).
    ThresholdNotReached,
}

impl GestureNoopReason {
    /// Short label for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IdleWithoutActiveGesture => "idle_without_active_gesture",
            Self::GestureAlreadyInProgress => "gesture_already_in_progress",
            Self::PointerMismatch => "pointer_mismatch",
            Self::NonFinitePosition => "non_finite_position",
            Self::ThresholdNotReached => "threshold_not_reached",
        }
    }
}

/// Effect emitted by one reducer step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "effect", rename_all = "snake_case"))]
pub enum GestureEffect {
    /// Pointer went down; the gesture is a tap candidate.
    Armed { pointer_id: u32, origin: Point },
    /// Movement crossed the threshold.
    DragStarted {
        origin: Point,
        current: Point,
        translation: Offset,
    },
    /// Movement while dragging.
    DragMoved {
        previous: Point,
        current: Point,
        translation: Offset,
    },
    /// Pointer released. This is the drop notification.
    Released {
        /// Absolute position of the release event.
        position: Point,
        /// The gesture crossed the drag threshold at some point.
        was_drag: bool,
        /// Committed translation after the release.
        translation: Offset,
    },
    /// The host revoked the gesture. No drop, no tap.
    Canceled { translation: Offset },
    /// The event was ignored.
    Noop { reason: GestureNoopReason },
}

impl GestureEffect {
    /// Short label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Armed { .. } => "armed",
            Self::DragStarted { .. } => "drag_started",
            Self::DragMoved { .. } => "drag_moved",
            Self::Released { .. } => "released",
            Self::Canceled { .. } => "canceled",
            Self::Noop { .. } => "noop",
        }
    }

    /// Whether this effect left the state untouched or only tracked a
    /// sub-threshold move.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::Noop { .. })
    }

    /// The drop position, if this effect is a release.
    #[must_use]
    pub const fn drop_position(&self) -> Option<Point> {
        match self {
            Self::Released { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Whether this effect is a release that never became a drag.
    #[must_use]
    pub const fn is_tap_release(&self) -> bool {
        matches!(self, Self::Released { was_drag: false, .. })
    }
}

impl GestureState {
    /// Idle state at the given committed translation.
    #[must_use]
    pub const fn at(committed: Offset) -> Self {
        Self {
            phase: GesturePhase::Idle,
            committed,
        }
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    /// Whether any gesture (candidate or drag) is active.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.phase, GesturePhase::Idle)
    }

    /// The live translation to render.
    #[must_use]
    pub fn translation(&self) -> Offset {
        match self.phase {
            GesturePhase::Dragging {
                origin,
                current,
                base,
                ..
            } => base + (current - origin),
            GesturePhase::Idle | GesturePhase::Candidate { .. } => self.committed,
        }
    }

    /// The renderer-facing snapshot.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        DragState {
            translation: self.translation(),
            is_dragging: self.is_dragging(),
        }
    }

    /// Apply one pointer event, returning the next state and the effect.
    #[must_use]
    pub fn reduce(self, event: &PointerEvent, config: &GestureConfig) -> (Self, GestureEffect) {
        let noop = |reason| (self, GestureEffect::Noop { reason });

        if !event.position.is_finite() {
            return noop(GestureNoopReason::NonFinitePosition);
        }

        let position = event.position;
        let (next, effect) = match (self.phase, event.phase) {
            (GesturePhase::Idle, PointerPhase::Down) => {
                let next = Self {
                    phase: GesturePhase::Candidate {
                        pointer_id: event.pointer_id,
                        origin: position,
                        current: position,
                    },
                    committed: self.committed,
                };
                (
                    next,
                    GestureEffect::Armed {
                        pointer_id: event.pointer_id,
                        origin: position,
                    },
                )
            }
            (GesturePhase::Idle, _) => noop(GestureNoopReason::IdleWithoutActiveGesture),
            (_, PointerPhase::Down) => noop(GestureNoopReason::GestureAlreadyInProgress),
            (phase, _) if phase.pointer_id() != Some(event.pointer_id) => {
                noop(GestureNoopReason::PointerMismatch)
            }
            (
                GesturePhase::Candidate {
                    pointer_id, origin, ..
                },
                PointerPhase::Move,
            ) => {
                if config.exceeds_threshold(position - origin) {
                    let next = Self {
                        phase: GesturePhase::Dragging {
                            pointer_id,
                            origin,
                            current: position,
                            base: self.committed,
                        },
                        committed: self.committed,
                    };
                    (
                        next,
                        GestureEffect::DragStarted {
                            origin,
                            current: position,
                            translation: next.translation(),
                        },
                    )
                } else {
                    let next = Self {
                        phase: GesturePhase::Candidate {
                            pointer_id,
                            origin,
                            current: position,
                        },
                        committed: self.committed,
                    };
                    (
                        next,
                        GestureEffect::Noop {
                            reason: GestureNoopReason::ThresholdNotReached,
                        },
                    )
                }
            }
            (GesturePhase::Candidate { .. }, PointerPhase::Up) => (
                Self::at(self.committed),
                GestureEffect::Released {
                    position,
                    was_drag: false,
                    translation: self.committed,
                },
            ),
            (GesturePhase::Candidate { .. }, PointerPhase::Cancel) => (
                Self::at(self.committed),
                GestureEffect::Canceled {
                    translation: self.committed,
                },
            ),
            (
                GesturePhase::Dragging {
                    pointer_id,
                    origin,
                    current,
                    base,
                },
                PointerPhase::Move,
            ) => {
                let next = Self {
                    phase: GesturePhase::Dragging {
                        pointer_id,
                        origin,
                        current: position,
                        base,
                    },
                    committed: self.committed,
                };
                (
                    next,
                    GestureEffect::DragMoved {
                        previous: current,
                        current: position,
                        translation: next.translation(),
                    },
                )
            }
            (GesturePhase::Dragging { .. }, PointerPhase::Up) => {
                // Commit what is on screen: the translation as of the last move.
                let committed = self.translation();
                (
                    Self::at(committed),
                    GestureEffect::Released {
                        position,
                        was_drag: true,
                        translation: committed,
                    },
                )
            }
            (GesturePhase::Dragging { .. }, PointerPhase::Cancel) => {
                let committed = self.translation();
                (
                    Self::at(committed),
                    GestureEffect::Canceled {
                        translation: committed,
                    },
                )
            }
        };

        if !next.translation().is_finite() {
            return noop(GestureNoopReason::NonFinitePosition);
        }
        (next, effect)
    }
}

// ---------------------------------------------------------------------------
// DragController
// ---------------------------------------------------------------------------

/// One controller step with numbering for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureTransition {
    pub transition_id: u64,
    pub from: GesturePhase,
    pub to: GesturePhase,
    pub effect: GestureEffect,
}

/// Owns the gesture state of one panel instance.
///
/// The controller is the single writer of its [`GestureState`]; readers get
/// copies through [`state`](DragController::state) and
/// [`drag_state`](DragController::drag_state).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DragController {
    config: GestureConfig,
    state: GestureState,
    transition_counter: u64,
}

impl DragController {
    /// Create an idle controller at zero translation.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: GestureState::default(),
            transition_counter: 0,
        }
    }

    /// Current gesture state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> GestureState {
        self.state
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    /// The live translation.
    #[must_use]
    pub fn translation(&self) -> Offset {
        self.state.translation()
    }

    /// Renderer-facing snapshot.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.state.drag_state()
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Update the configuration. Takes effect from the next event.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Apply one pointer event.
    pub fn apply(&mut self, event: &PointerEvent) -> GestureTransition {
        let from = self.state.phase;
        let (next, effect) = self.state.reduce(event, &self.config);
        self.state = next;
        self.record(from, effect)
    }

    /// Abandon any active gesture as if the host had cancelled it.
    ///
    /// Returns `None` when already idle.
    pub fn force_cancel(&mut self) -> Option<GestureTransition> {
        if !self.state.is_active() {
            return None;
        }
        let from = self.state.phase;
        let committed = self.state.translation();
        self.state = GestureState::at(committed);
        Some(self.record(
            from,
            GestureEffect::Canceled {
                translation: committed,
            },
        ))
    }

    /// Return to idle at zero translation, dropping any active gesture
    /// without emitting anything.
    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }

    fn record(&mut self, from: GesturePhase, effect: GestureEffect) -> GestureTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = GestureTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state.phase,
            effect,
        };
        #[cfg(feature = "tracing")]
        log_transition(&transition);
        transition
    }
}

#[cfg(feature = "tracing")]
fn log_transition(transition: &GestureTransition) {
    match transition.effect {
        GestureEffect::Noop { reason } => tracing::trace!(
            message = "gesture.noop",
            transition_id = transition.transition_id,
            phase = transition.from.name(),
            reason = reason.as_str()
        ),
        effect => tracing::debug!(
            message = "gesture.transition",
            transition_id = transition.transition_id,
            from = transition.from.name(),
            to = transition.to.name(),
            effect = effect.name()
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
