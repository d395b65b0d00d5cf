#![forbid(unsafe_code)]

//! Event coalescing for high-frequency viewport events.
//!
//! A fast fling can fire dozens of `scroll` callbacks between two painted
//! frames, and a window drag fires a resize per pixel. Recomputing the
//! visible page (or the whole layout) for each of them floods layout work
//! for results nobody sees.
//!
//! [`EventCoalescer`] keeps the latest scroll offset and the latest resize
//! and hands them out on demand:
//!
//! - Scroll: latest `top` wins; delivered once per animation frame.
//! - Resize: latest geometry wins; delivered once per animation frame,
//!   after the scroll that was measured against the old geometry.
//! - Everything else passes through immediately.
//!
//! # Usage
//!
//! ```
//! use wordslide_core::event::Event;
//! use wordslide_core::event_coalescer::EventCoalescer;
//!
//! let mut coalescer = EventCoalescer::new();
//! assert!(coalescer.push(Event::scroll(10.0)).is_none());
//! assert!(coalescer.push(Event::scroll(40.0)).is_none());
//! assert_eq!(coalescer.pending_scroll_count(), 2);
//!
//! // The frame callback passes through; the caller then drains the scroll.
//! assert_eq!(coalescer.push(Event::AnimationFrame), Some(Event::AnimationFrame));
//! assert_eq!(coalescer.take_scroll(), Some(40.0));
//! assert_eq!(coalescer.take_scroll(), None);
//! ```

use crate::event::{Event, ResizeEvent};

/// Coalesces scroll and resize events.
///
/// Not thread-safe; use from the single event-processing thread. All
/// operations are O(1) and at most two events are held.
#[derive(Debug, Clone, Default)]
pub struct EventCoalescer {
    pending_scroll: Option<PendingScroll>,
    pending_resize: Option<ResizeEvent>,
}

#[derive(Debug, Clone, Copy)]
struct PendingScroll {
    top: f64,
    count: u32,
}

impl EventCoalescer {
    /// Create an empty coalescer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event.
    ///
    /// Returns `Some(event)` when the event should be handled now, `None`
    /// when it was absorbed into pending state.
    pub fn push(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Scroll { top } => {
                let count = self
                    .pending_scroll
                    .map_or(1, |pending| pending.count.saturating_add(1));
                self.pending_scroll = Some(PendingScroll { top, count });
                None
            }
            Event::Resize(resize) => {
                self.pending_resize = Some(resize);
                None
            }
            other => Some(other),
        }
    }

    /// Take the latest pending scroll offset.
    pub fn take_scroll(&mut self) -> Option<f64> {
        self.pending_scroll.take().map(|pending| pending.top)
    }

    /// Take the latest pending resize.
    pub fn take_resize(&mut self) -> Option<ResizeEvent> {
        self.pending_resize.take()
    }

    /// Drain everything pending, scroll first.
    ///
    /// A pending scroll offset was measured against the geometry in effect
    /// before any pending resize, so it is delivered while that geometry is
    /// still current.
    #[must_use]
    pub fn flush(&mut self) -> Vec<Event> {
        let mut events = Vec::with_capacity(2);
        if let Some(top) = self.take_scroll() {
            events.push(Event::Scroll { top });
        }
        if let Some(resize) = self.take_resize() {
            events.push(Event::Resize(resize));
        }
        events
    }

    /// Number of scroll events folded into the pending one; 0 if none.
    #[must_use]
    pub fn pending_scroll_count(&self) -> u32 {
        self.pending_scroll.map_or(0, |pending| pending.count)
    }
}
