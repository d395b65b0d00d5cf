#![forbid(unsafe_code)]

//! Slider drag tracking.
//!
//! A drag turns a stream of pointer events into handle offsets. It begins on
//! a primary press on the handle or on the bare track, follows moves from the
//! same device, and ends on release, leave, or cancel.
//!
//! # Grab offset
//!
//! Pressing the handle records where inside the handle the pointer landed,
//! so the handle does not jump under the pointer. Pressing the track jumps
//! the handle's centre to the pointer and then continues as if the handle
//! had been grabbed by its centre.
//!
//! # Invariants
//!
//! 1. A drag is well-formed: one begin, zero or more moves, one end.
//! 2. Moves and releases from a different device than the one that began the
//!    drag are ignored.
//! 3. Events arriving while idle never produce an offset.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Press outside the slider | `PointerTarget::Outside` | Drag not started |
//! | Secondary-button press | Context menu | Drag not started |
//! | Second press mid-drag | Multi-touch, stuck button | Ignored |

use wordslide_core::event::{PointerEvent, PointerEventKind, PointerSource, PointerTarget};

/// Where a drag was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOrigin {
    /// Pressed on the handle itself.
    Handle,
    /// Pressed on the track; the handle jumped to the pointer.
    Track,
}

/// An active drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Device that started the drag.
    pub source: PointerSource,
    /// What was pressed.
    pub origin: DragOrigin,
    /// Distance from the handle's left edge to the pointer.
    pub grab_offset: f64,
    /// Pointer position at the press.
    pub start_x: f64,
    /// Latest pointer position.
    pub current_x: f64,
    /// Moves seen since the press.
    pub moves: u32,
}

impl DragState {
    /// Handle offset (left edge) that keeps the grab point under `x`.
    /// Unclamped; the caller clamps to the track.
    #[must_use]
    pub fn handle_offset_at(&self, x: f64) -> f64 {
        x - self.grab_offset
    }

    /// Horizontal distance moved since the press.
    #[must_use]
    pub fn delta(&self) -> f64 {
        self.current_x - self.start_x
    }
}

/// Drag state machine: `Idle → Dragging → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// Pointer is driving the handle.
    Dragging(DragState),
}

/// What the caller should do after feeding a pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragUpdate {
    /// Nothing to do.
    Ignored,
    /// A drag began; move the handle to `offset` (unclamped).
    Started {
        /// Target handle offset.
        offset: f64,
        /// What was pressed.
        origin: DragOrigin,
    },
    /// The drag continued; move the handle to `offset` (unclamped).
    Moved {
        /// Target handle offset.
        offset: f64,
    },
    /// The drag finished.
    Ended(DragState),
}

impl DragPhase {
    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Active drag, if any.
    #[must_use]
    pub fn state(&self) -> Option<&DragState> {
        match self {
            Self::Dragging(state) => Some(state),
            Self::Idle => None,
        }
    }

    /// Feed one pointer event.
    ///
    /// `handle_offset` and `handle_width` describe the handle as currently
    /// drawn; they are only consulted on a press.
    pub fn on_pointer(&mut self, event: &PointerEvent, handle_offset: f64, handle_width: f64) -> DragUpdate {
        match (*self, event.kind) {
            (Self::Idle, PointerEventKind::Down) => self.begin(event, handle_offset, handle_width),
            (Self::Dragging(mut state), PointerEventKind::Move) if state.source == event.source => {
                state.current_x = event.x;
                state.moves = state.moves.saturating_add(1);
                *self = Self::Dragging(state);
                DragUpdate::Moved {
                    offset: state.handle_offset_at(event.x),
                }
            }
            (Self::Dragging(state), _) if event.is_release() && state.source == event.source => {
                *self = Self::Idle;
                DragUpdate::Ended(state)
            }
            _ => DragUpdate::Ignored,
        }
    }

    fn begin(&mut self, event: &PointerEvent, handle_offset: f64, handle_width: f64) -> DragUpdate {
        if !event.is_primary() || !event.x.is_finite() {
            return DragUpdate::Ignored;
        }
        let (origin, grab_offset) = match event.target {
            PointerTarget::Handle => (DragOrigin::Handle, event.x - handle_offset),
            PointerTarget::Track => (DragOrigin::Track, handle_width.max(0.0) / 2.0),
            PointerTarget::Outside => return DragUpdate::Ignored,
        };
        let state = DragState {
            source: event.source,
            origin,
            grab_offset,
            start_x: event.x,
            current_x: event.x,
            moves: 0,
        };
        *self = Self::Dragging(state);
        DragUpdate::Started {
            offset: state.handle_offset_at(event.x),
            origin,
        }
    }
}
