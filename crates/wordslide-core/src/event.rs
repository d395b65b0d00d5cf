#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The host (a browser shell, a test, a replay) translates its native
//! callbacks into these values and pushes them into the engine. Everything
//! the browser reacts to arrives as an [`Event`].
//!
//! # Design Notes
//!
//! - Coordinates are CSS pixels relative to the element named by the event:
//!   pointer `x` is relative to the slider track's left edge, scroll `top` is
//!   the viewport's `scrollTop`.
//! - Mouse and touch input share one [`PointerEvent`] shape; the
//!   [`PointerSource`] is informational only.
//! - Pixel values are `f64`, so events are `PartialEq` but not `Eq`.

use bitflags::bitflags;

use crate::geometry::Size;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Pointer activity on or around the slider track.
    Pointer(PointerEvent),

    /// Wheel input over the scrollable viewport.
    Wheel(WheelEvent),

    /// The viewport's scroll offset changed.
    Scroll {
        /// New `scrollTop` in pixels.
        top: f64,
    },

    /// The viewport or track was resized.
    Resize(ResizeEvent),

    /// The host is about to paint a frame (`requestAnimationFrame`).
    ///
    /// Scroll-driven synchronization is deferred until this arrives.
    AnimationFrame,

    /// Timer tick. Lets time-based state (the snap guard) expire without
    /// other input.
    Tick,
}

impl Event {
    /// Shorthand for a pointer event.
    #[must_use]
    pub const fn pointer(kind: PointerEventKind, target: PointerTarget, x: f64) -> Self {
        Self::Pointer(PointerEvent::new(kind, target, x))
    }

    /// Shorthand for a scroll event.
    #[must_use]
    pub const fn scroll(top: f64) -> Self {
        Self::Scroll { top }
    }
}

/// A mouse or touch event on the slider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerEventKind,

    /// Which slider part was under the pointer when the event fired.
    pub target: PointerTarget,

    /// Horizontal position relative to the track's left edge.
    pub x: f64,

    /// Buttons held. Touch contacts report [`Buttons::PRIMARY`].
    pub buttons: Buttons,

    /// Input device family.
    pub source: PointerSource,
}

impl PointerEvent {
    /// Create a primary-button mouse event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, target: PointerTarget, x: f64) -> Self {
        Self {
            kind,
            target,
            x,
            buttons: Buttons::PRIMARY,
            source: PointerSource::Mouse,
        }
    }

    /// Create a touch event.
    #[must_use]
    pub const fn touch(kind: PointerEventKind, target: PointerTarget, x: f64) -> Self {
        Self {
            kind,
            target,
            x,
            buttons: Buttons::PRIMARY,
            source: PointerSource::Touch,
        }
    }

    /// Replace the held buttons.
    #[must_use]
    pub const fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Whether the primary button (or a touch contact) is involved.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        self.buttons.contains(Buttons::PRIMARY)
    }

    /// Whether this event ends a drag.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(
            self.kind,
            PointerEventKind::Up | PointerEventKind::Leave | PointerEventKind::Cancel
        )
    }
}

/// The phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// `mousedown` / `touchstart`.
    Down,
    /// `mousemove` / `touchmove`.
    Move,
    /// `mouseup` / `touchend`.
    Up,
    /// `mouseleave` on the drag surface.
    Leave,
    /// `touchcancel`.
    Cancel,
}

/// The slider part an event landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// The draggable handle.
    Handle,
    /// The track outside the handle.
    Track,
    /// Anywhere else (only meaningful for moves/releases mid-drag).
    Outside,
}

/// Device family that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerSource {
    /// Mouse or pen.
    #[default]
    Mouse,
    /// Touch contact.
    Touch,
}

bitflags! {
    /// Pointer buttons held during an event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u8 {
        /// No buttons.
        const NONE = 0b0000;
        /// Primary (usually left) button or touch contact.
        const PRIMARY = 0b0001;
        /// Secondary (usually right) button.
        const SECONDARY = 0b0010;
        /// Middle button.
        const MIDDLE = 0b0100;
    }
}

/// Unit of a wheel delta, matching DOM `WheelEvent.deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelDeltaMode {
    /// `DOM_DELTA_PIXEL`.
    #[default]
    Pixel,
    /// `DOM_DELTA_LINE`.
    Line,
    /// `DOM_DELTA_PAGE`.
    Page,
}

/// A wheel event over the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelEvent {
    /// Horizontal delta.
    pub delta_x: f64,
    /// Vertical delta.
    pub delta_y: f64,
    /// Unit of the deltas.
    pub mode: WheelDeltaMode,
}

impl WheelEvent {
    /// Create a vertical pixel-mode wheel event.
    #[must_use]
    pub const fn vertical(delta_y: f64) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            mode: WheelDeltaMode::Pixel,
        }
    }

    /// Replace the delta mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: WheelDeltaMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether the event looks like it came from a trackpad rather than a
    /// notched wheel.
    ///
    /// Notched wheels report either line/page deltas or pixel deltas that
    /// are whole multiples of the platform notch size. Trackpads report
    /// small, often fractional, pixel deltas.
    #[must_use]
    pub fn is_trackpad_shaped(&self, notch_px: f64) -> bool {
        if self.mode != WheelDeltaMode::Pixel {
            return false;
        }
        let dy = self.delta_y.abs();
        if dy == 0.0 || notch_px <= 0.0 {
            return true;
        }
        if dy.fract() != 0.0 || dy < notch_px {
            return true;
        }
        let steps = dy / notch_px;
        (steps - steps.round()).abs() > 1e-3
    }
}

/// New geometry reported by the host after a resize.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResizeEvent {
    /// Scrollable viewport size.
    pub viewport: Size,
    /// Slider track width.
    pub track_width: f64,
    /// Slider handle width.
    pub handle_width: f64,
}

impl ResizeEvent {
    /// Create a resize event.
    #[must_use]
    pub const fn new(viewport: Size, track_width: f64, handle_width: f64) -> Self {
        Self {
            viewport,
            track_width,
            handle_width,
        }
    }
}
