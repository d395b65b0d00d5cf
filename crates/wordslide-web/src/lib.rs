#![forbid(unsafe_code)]

//! `wordslide-web` provides host-driven building blocks for running the
//! wordslide browser inside a web page.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes input events,
//!   geometry changes, and the word-list response.
//! - **Deterministic time**: the host advances a monotonic clock explicitly.
//! - **No blocking / no threads**: suitable for `wasm32-unknown-unknown`.
//!
//! This crate intentionally does not bind to `wasm-bindgen`. Every surface
//! write is recorded as a [`SurfaceOp`] that a thin JS layer replays onto the
//! real DOM, and measurements are fed in ahead of time through
//! [`HostMeasurer`].

pub mod session;
pub mod word_source;

pub use session::{StepResult, WebSession};
pub use word_source::{LoadError, decode_word_list};

use core::time::Duration;
use std::collections::{HashMap, VecDeque};

use unicode_width::UnicodeWidthStr;
use wordslide_core::event::Event;
use wordslide_widgets::{Divider, Measurer, OverlayLabel, Surface};

/// Log target for session lifecycle events (load, failure).
pub const TARGET_SESSION: &str = "wordslide::web";

/// Cell width used to estimate text widths the host has not reported.
pub const DEFAULT_CELL_WIDTH: f64 = 9.0;

/// Web session error type.
#[derive(Debug)]
pub enum WebError {
    /// The host-supplied configuration blob could not be parsed.
    Config(serde_json::Error),
}

impl core::fmt::Display for WebError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid browser config: {err}"),
        }
    }
}

impl std::error::Error for WebError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

/// Deterministic monotonic clock controlled by the host.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time.
    pub fn set(&mut self, now: Duration) {
        self.now = now;
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// FIFO of canonical events pushed by the host between steps.
#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    queue: VecDeque<Event>,
}

impl EventQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a canonical event into the queue.
    pub fn push_event(&mut self, event: Event) {
        self.queue.push_back(event);
    }

    /// Drain all pending events.
    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    /// Number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// One recorded [`Surface`] call, in the order the engine made it.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    /// Replace all page children with empty placeholders.
    RebuildPages {
        /// Number of placeholders.
        count: usize,
        /// Height of each placeholder in pixels.
        height: f64,
    },
    /// Render words into a placeholder.
    PopulatePage {
        /// Page index.
        page: usize,
        /// Words in row-major order.
        words: Vec<String>,
    },
    /// Empty a placeholder, keeping its height.
    ClearPage {
        /// Page index.
        page: usize,
    },
    /// Move the slider handle.
    HandleOffset(f64),
    /// Set the viewport's `scrollTop`.
    ScrollTo(f64),
    /// Replace the divider marks.
    Dividers(Vec<Divider>),
    /// Replace the drag overlay.
    Overlay(Vec<OverlayLabel>),
    /// Remove the drag overlay.
    ClearOverlay,
    /// Toggle CSS scroll-snap on the viewport.
    ScrollSnap(bool),
}

/// Captured outputs for host consumption.
#[derive(Debug, Default, Clone)]
pub struct WebOutputs {
    /// Surface operations since the last take, oldest first.
    pub ops: Vec<SurfaceOp>,
    /// Log lines written by the session.
    pub logs: Vec<String>,
}

impl WebOutputs {
    /// Whether nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.logs.is_empty()
    }

    /// The last handle offset written, if any.
    #[must_use]
    pub fn last_handle_offset(&self) -> Option<f64> {
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::HandleOffset(x) => Some(*x),
            _ => None,
        })
    }

    /// The last scroll target written, if any.
    #[must_use]
    pub fn last_scroll(&self) -> Option<f64> {
        self.ops.iter().rev().find_map(|op| match op {
            SurfaceOp::ScrollTo(top) => Some(*top),
            _ => None,
        })
    }
}

/// Surface that records every write for the JS host.
#[derive(Debug, Default, Clone)]
pub struct WebSurface {
    outputs: WebOutputs,
}

impl WebSurface {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get captured outputs.
    #[must_use]
    pub const fn outputs(&self) -> &WebOutputs {
        &self.outputs
    }

    /// Mutably access captured outputs.
    pub fn outputs_mut(&mut self) -> &mut WebOutputs {
        &mut self.outputs
    }

    /// Take captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> WebOutputs {
        std::mem::take(&mut self.outputs)
    }

    /// Append a host-visible log line.
    pub fn write_log(&mut self, text: &str) {
        self.outputs.logs.push(text.to_owned());
    }

    fn record(&mut self, op: SurfaceOp) {
        self.outputs.ops.push(op);
    }
}

impl Surface for WebSurface {
    fn rebuild_pages(&mut self, page_count: usize, page_height: f64) {
        self.record(SurfaceOp::RebuildPages {
            count: page_count,
            height: page_height,
        });
    }

    fn populate_page(&mut self, page: usize, words: &[String]) {
        self.record(SurfaceOp::PopulatePage {
            page,
            words: words.to_vec(),
        });
    }

    fn clear_page(&mut self, page: usize) {
        self.record(SurfaceOp::ClearPage { page });
    }

    fn set_handle_offset(&mut self, offset: f64) {
        self.record(SurfaceOp::HandleOffset(offset));
    }

    fn scroll_to(&mut self, top: f64) {
        self.record(SurfaceOp::ScrollTo(top));
    }

    fn set_dividers(&mut self, dividers: &[Divider]) {
        self.record(SurfaceOp::Dividers(dividers.to_vec()));
    }

    fn set_overlay(&mut self, labels: &[OverlayLabel]) {
        self.record(SurfaceOp::Overlay(labels.to_vec()));
    }

    fn clear_overlay(&mut self) {
        self.record(SurfaceOp::ClearOverlay);
    }

    fn set_scroll_snap(&mut self, enabled: bool) {
        self.record(SurfaceOp::ScrollSnap(enabled));
    }
}

/// Measurer fed by the host ahead of time.
///
/// The JS side measures an off-screen word item and the letter labels once
/// fonts are ready and reports the numbers here. Text the host never reported
/// is estimated from its display width in cells.
#[derive(Debug, Clone)]
pub struct HostMeasurer {
    item_height: Option<f64>,
    cell_width: f64,
    widths: HashMap<(String, String), f64>,
}

impl Default for HostMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl HostMeasurer {
    /// Create a measurer with no reported metrics.
    #[must_use]
    pub fn new() -> Self {
        Self {
            item_height: None,
            cell_width: DEFAULT_CELL_WIDTH,
            widths: HashMap::new(),
        }
    }

    /// Record the measured height of one word item.
    ///
    /// Non-finite or non-positive heights are treated as "not measurable".
    pub fn set_item_height(&mut self, height: f64) {
        self.item_height = (height.is_finite() && height > 0.0).then_some(height);
    }

    /// Forget the item height (fonts are reloading).
    pub fn clear_item_height(&mut self) {
        self.item_height = None;
    }

    /// Record the rendered width of `text` in `font`.
    pub fn set_text_width(&mut self, font: &str, text: &str, width: f64) {
        self.widths
            .insert((font.to_owned(), text.to_owned()), width.max(0.0));
    }

    /// Set the per-cell width used for estimates.
    pub fn set_cell_width(&mut self, width: f64) {
        self.cell_width = width.max(0.0);
    }

    /// Number of reported widths.
    #[must_use]
    pub fn reported_widths(&self) -> usize {
        self.widths.len()
    }
}

impl Measurer for HostMeasurer {
    fn measure_item_height(&mut self) -> Option<f64> {
        self.item_height
    }

    fn measure_text_width(&mut self, text: &str, font: &str) -> f64 {
        self.widths
            .get(&(font.to_owned(), text.to_owned()))
            .copied()
            .unwrap_or_else(|| text.width() as f64 * self.cell_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordslide_core::event::{PointerEventKind, PointerTarget};

    use pretty_assertions::assert_eq;

    #[test]
    fn deterministic_clock_advances_monotonically() {
        let mut c = DeterministicClock::new();
        assert_eq!(c.now(), Duration::ZERO);

        c.advance(Duration::from_millis(10));
        assert_eq!(c.now(), Duration::from_millis(10));

        c.advance(Duration::from_millis(5));
        assert_eq!(c.now(), Duration::from_millis(15));

        // Saturation: don't panic or wrap.
        c.set(Duration::MAX);
        c.advance(Duration::from_secs(1));
        assert_eq!(c.now(), Duration::MAX);
    }

    #[test]
    fn event_queue_is_fifo() {
        let mut q = EventQueue::new();
        assert!(q.is_empty());

        q.push_event(Event::Tick);
        q.push_event(Event::scroll(40.0));
        q.push_event(Event::pointer(PointerEventKind::Down, PointerTarget::Handle, 3.0));
        assert_eq!(q.len(), 3);

        let drained: Vec<Event> = q.drain_events().collect();
        assert_eq!(
            drained,
            vec![
                Event::Tick,
                Event::scroll(40.0),
                Event::pointer(PointerEventKind::Down, PointerTarget::Handle, 3.0),
            ]
        );
        assert!(q.is_empty());
    }

    #[test]
    fn surface_records_calls_in_order() {
        let mut s = WebSurface::new();
        s.rebuild_pages(3, 400.0);
        s.populate_page(1, &["apple".to_string()]);
        s.set_handle_offset(12.5);
        s.scroll_to(400.0);
        s.clear_page(1);
        s.set_scroll_snap(false);
        s.clear_overlay();
        s.write_log("hello");

        let out = s.take_outputs();
        assert_eq!(
            out.ops,
            vec![
                SurfaceOp::RebuildPages {
                    count: 3,
                    height: 400.0
                },
                SurfaceOp::PopulatePage {
                    page: 1,
                    words: vec!["apple".to_string()]
                },
                SurfaceOp::HandleOffset(12.5),
                SurfaceOp::ScrollTo(400.0),
                SurfaceOp::ClearPage { page: 1 },
                SurfaceOp::ScrollSnap(false),
                SurfaceOp::ClearOverlay,
            ]
        );
        assert_eq!(out.logs, vec!["hello"]);
        assert_eq!(out.last_handle_offset(), Some(12.5));
        assert_eq!(out.last_scroll(), Some(400.0));
        assert!(s.outputs().is_empty());
    }

    #[test]
    fn host_measurer_prefers_reported_widths() {
        let mut m = HostMeasurer::new();
        assert_eq!(m.measure_item_height(), None);

        m.set_item_height(22.0);
        assert_eq!(m.measure_item_height(), Some(22.0));
        m.set_item_height(f64::NAN);
        assert_eq!(m.measure_item_height(), None);

        m.set_text_width("bold 14px sans-serif", "W", 13.0);
        assert_eq!(m.measure_text_width("W", "bold 14px sans-serif"), 13.0);
        // Same text, other font: estimated.
        assert_eq!(m.measure_text_width("W", "12px serif"), DEFAULT_CELL_WIDTH);
        assert_eq!(m.reported_widths(), 1);
    }

    #[test]
    fn host_measurer_estimates_wide_glyphs() {
        let mut m = HostMeasurer::new();
        m.set_cell_width(10.0);
        assert_eq!(m.measure_text_width("ab", "f"), 20.0);
        // CJK occupies two cells.
        assert_eq!(m.measure_text_width("中", "f"), 20.0);
        assert_eq!(m.measure_text_width("", "f"), 0.0);
    }

    #[test]
    fn config_error_exposes_source() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = WebError::Config(err);
        assert!(err.to_string().starts_with("invalid browser config"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
