#![forbid(unsafe_code)]

//! Position synchronizer: one page index, two input channels.
//!
//! The slider handle and the viewport's scroll offset are both views of a
//! single value, [`PositionState::current_page`]. Either channel may move
//! it; each must then update the *other* channel's visual without letting
//! that update come back around as fresh input.
//!
//! # Channels
//!
//! | driver | page from | writes (silently) |
//! |--------|-----------|-------------------|
//! | slider | `clamp(floor(offset / travel × total), 0, total − 1)` | `scroll_to(page_top)` |
//! | scroll | page containing the viewport's vertical midpoint | `set_handle_offset(offset_for_page)` |
//!
//! # Feedback rules
//!
//! 1. Handle writes go straight to the surface; they never pass through the
//!    slider handler.
//! 2. A programmatic scroll records the target. The first scroll event that
//!    lands within tolerance of it is its echo and is dropped.
//! 3. While a drag is in progress, scroll-driven updates are ignored: the
//!    pointer owns the position until release.
//!
//! `offset_for_page` maps page `p` of `n` to `p / (n − 1) × travel`, so the
//! first page sits at the left end and the last at the right end. Feeding
//! that offset back through the slider mapping returns `p` exactly. A single
//! page (or none) maps to offset 0.

use wordslide_core::geometry::TrackGeometry;

use crate::page_store::PageStore;
use crate::surface::Surface;

/// Current position as seen by both channels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionState {
    /// The single source of truth.
    pub current_page: usize,
    /// Handle left edge, in `[0, travel]`.
    pub handle_offset: f64,
    /// Last known viewport `scrollTop`.
    pub scroll_top: f64,
}

/// What a scroll event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    /// It was the echo of our own `scroll_to`; dropped.
    Echo,
    /// A drag is in progress; ignored.
    Suppressed,
    /// The midpoint is still on the current page.
    Unchanged,
    /// The current page moved to this index.
    Moved(usize),
}

/// Keeps slider and scroll consistent with one page index.
#[derive(Debug, Clone)]
pub struct PositionSynchronizer {
    state: PositionState,
    track: TrackGeometry,
    viewport_height: f64,
    pending_echo: Option<f64>,
    echo_tolerance: f64,
}

impl PositionSynchronizer {
    /// Create a synchronizer at page 0.
    #[must_use]
    pub fn new(track: TrackGeometry, viewport_height: f64, echo_tolerance: f64) -> Self {
        Self {
            state: PositionState::default(),
            track,
            viewport_height,
            pending_echo: None,
            echo_tolerance: echo_tolerance.max(0.0),
        }
    }

    /// Current position.
    #[must_use]
    pub const fn state(&self) -> &PositionState {
        &self.state
    }

    /// Current page.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.state.current_page
    }

    /// Slider geometry.
    #[must_use]
    pub const fn track(&self) -> TrackGeometry {
        self.track
    }

    /// Whether a programmatic scroll is still waiting for its echo.
    #[must_use]
    pub const fn awaiting_echo(&self) -> bool {
        self.pending_echo.is_some()
    }

    /// Update geometry after a resize. Position is restored by the caller.
    pub fn set_geometry(&mut self, track: TrackGeometry, viewport_height: f64) {
        self.track = track;
        self.viewport_height = viewport_height;
    }

    /// Page selected by a handle at `offset` among `total_pages`.
    #[must_use]
    pub fn page_for_offset(&self, offset: f64, total_pages: usize) -> usize {
        if total_pages == 0 {
            return 0;
        }
        let normalized = self.track.normalize(offset);
        let page = (normalized * total_pages as f64).floor() as usize;
        page.min(total_pages - 1)
    }

    /// Handle offset that represents `page` among `total_pages`.
    #[must_use]
    pub fn offset_for_page(&self, page: usize, total_pages: usize) -> f64 {
        if total_pages <= 1 {
            return 0.0;
        }
        let page = page.min(total_pages - 1);
        page as f64 / (total_pages - 1) as f64 * self.track.travel()
    }

    /// Page whose bounds contain the viewport's vertical midpoint when
    /// scrolled to `top`.
    #[must_use]
    pub fn page_for_scroll(&self, top: f64, pages: &PageStore) -> usize {
        let half = if self.viewport_height.is_finite() {
            self.viewport_height.max(0.0) / 2.0
        } else {
            0.0
        };
        pages.page_at(top + half)
    }

    /// Slider channel: make `page` current.
    ///
    /// Scrolls the page into view (the echo is recorded and later dropped)
    /// and moves the populated window. Does not touch the handle; the
    /// slider already shows where the user put it.
    pub fn set_from_slider(
        &mut self,
        page: usize,
        pages: &mut PageStore,
        words: &[String],
        surface: &mut dyn Surface,
    ) {
        let page = page.min(pages.total_pages().saturating_sub(1));
        self.state.current_page = page;
        let top = pages.page_top(page);
        if (top - self.state.scroll_top).abs() > self.echo_tolerance {
            self.pending_echo = Some(top);
        }
        self.state.scroll_top = top;
        surface.scroll_to(top);
        pages.show(page, words, surface);
        wordslide_core::trace!(target: wordslide_core::logging::TARGET_SYNC, page, top, "slider → scroll");
    }

    /// Scroll channel: the viewport now sits at `top`.
    ///
    /// Ignored while `dragging`. Otherwise moves the handle directly (no
    /// slider handler runs) and the populated window when the page changed.
    pub fn set_from_scroll(
        &mut self,
        top: f64,
        dragging: bool,
        pages: &mut PageStore,
        words: &[String],
        surface: &mut dyn Surface,
    ) -> ScrollOutcome {
        if let Some(expected) = self.pending_echo.take()
            && (top - expected).abs() <= self.echo_tolerance
        {
            self.state.scroll_top = top;
            return ScrollOutcome::Echo;
        }
        if dragging {
            return ScrollOutcome::Suppressed;
        }
        self.state.scroll_top = top;

        let total = pages.total_pages();
        let page = self.page_for_scroll(top, pages);
        if total == 0 || (page == self.state.current_page && pages.window() == pages.window_around(page)) {
            return ScrollOutcome::Unchanged;
        }
        self.state.current_page = page;
        let offset = self.offset_for_page(page, total);
        self.state.handle_offset = offset;
        surface.set_handle_offset(offset);
        pages.show(page, words, surface);
        wordslide_core::trace!(target: wordslide_core::logging::TARGET_SYNC, page, top, offset, "scroll → slider");
        ScrollOutcome::Moved(page)
    }

    /// Slider channel, continuous: the user dragged the handle to `offset`.
    ///
    /// The handle follows the pointer exactly (clamped to the track); the
    /// page only switches when the offset crosses a page boundary. Returns
    /// the new page when it changed.
    pub fn drag_to(
        &mut self,
        offset: f64,
        pages: &mut PageStore,
        words: &[String],
        surface: &mut dyn Surface,
    ) -> Option<usize> {
        let offset = self.track.clamp_handle(offset);
        self.state.handle_offset = offset;
        surface.set_handle_offset(offset);
        let page = self.page_for_offset(offset, pages.total_pages());
        if page == self.state.current_page && pages.window() == pages.window_around(page) {
            return None;
        }
        self.set_from_slider(page, pages, words, surface);
        Some(page)
    }

    /// Re-place the handle for the current page after the track changed size.
    /// Does not scroll.
    pub fn realign_handle(&mut self, total_pages: usize, surface: &mut dyn Surface) {
        let offset = self.offset_for_page(self.state.current_page, total_pages);
        self.state.handle_offset = offset;
        surface.set_handle_offset(offset);
    }

    /// Programmatic jump to `page`: place the handle for it, then drive the
    /// slider channel.
    pub fn jump_to(
        &mut self,
        page: usize,
        pages: &mut PageStore,
        words: &[String],
        surface: &mut dyn Surface,
    ) {
        let total = pages.total_pages();
        let page = page.min(total.saturating_sub(1));
        let offset = self.offset_for_page(page, total);
        self.state.handle_offset = offset;
        surface.set_handle_offset(offset);
        self.set_from_slider(page, pages, words, surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMetrics;
    use crate::surface::testing::{Op, RecordingSurface};

    const PAGE_H: f64 = 400.0;

    fn fixture(n: usize) -> (PositionSynchronizer, PageStore, Vec<String>, RecordingSurface) {
        let words: Vec<String> = (0..n).map(|i| format!("w{i:05}")).collect();
        let metrics = LayoutMetrics {
            item_height: 40.0,
            rows_per_page: 10,
            columns_per_page: 3,
            page_height: PAGE_H,
        };
        let mut surface = RecordingSurface::default();
        let mut pages = PageStore::new(1);
        pages.rebuild(words.len(), &metrics, &mut surface);
        let sync = PositionSynchronizer::new(TrackGeometry::new(340.0, 40.0), PAGE_H, 1.0);
        surface.ops.clear();
        (sync, pages, words, surface)
    }

    #[test]
    fn offset_maps_to_page() {
        let (sync, ..) = fixture(3000);
        assert_eq!(sync.page_for_offset(0.0, 100), 0);
        assert_eq!(sync.page_for_offset(150.0, 100), 50);
        assert_eq!(sync.page_for_offset(300.0, 100), 99);
        assert_eq!(sync.page_for_offset(9999.0, 100), 99);
        assert_eq!(sync.page_for_offset(-3.0, 100), 0);
        assert_eq!(sync.page_for_offset(150.0, 0), 0);
    }

    #[test]
    fn single_page_never_divides_by_zero() {
        let (sync, ..) = fixture(10);
        assert_eq!(sync.offset_for_page(0, 1), 0.0);
        assert_eq!(sync.offset_for_page(5, 1), 0.0);
        assert_eq!(sync.page_for_offset(200.0, 1), 0);
        let stuck = PositionSynchronizer::new(TrackGeometry::new(40.0, 40.0), PAGE_H, 1.0);
        assert_eq!(stuck.page_for_offset(12.0, 50), 0);
        assert_eq!(stuck.offset_for_page(10, 50), 0.0);
    }

    #[test]
    fn page_offset_round_trip() {
        let (sync, ..) = fixture(3000);
        for total in [2, 3, 7, 100, 999] {
            for page in 0..total {
                let offset = sync.offset_for_page(page, total);
                assert_eq!(sync.page_for_offset(offset, total), page, "page {page} of {total}");
            }
        }
    }

    #[test]
    fn slider_scrolls_and_swallows_echo() {
        let (mut sync, mut pages, words, mut surface) = fixture(3000);
        sync.set_from_slider(40, &mut pages, &words, &mut surface);
        assert_eq!(sync.current_page(), 40);
        assert_eq!(surface.scrolls(), vec![40.0 * PAGE_H]);
        assert!(surface.handles().is_empty(), "slider channel must not write the handle");
        assert!(sync.awaiting_echo());

        surface.ops.clear();
        let outcome = sync.set_from_scroll(40.0 * PAGE_H, false, &mut pages, &words, &mut surface);
        assert_eq!(outcome, ScrollOutcome::Echo);
        assert!(surface.ops.is_empty());
        assert!(!sync.awaiting_echo());
    }

    #[test]
    fn user_scroll_moves_handle_silently() {
        let (mut sync, mut pages, words, mut surface) = fixture(3000);
        pages.show(0, &words, &mut surface);
        surface.ops.clear();
        // Midpoint of the viewport lands on page 5.
        let outcome = sync.set_from_scroll(5.0 * PAGE_H - 100.0, false, &mut pages, &words, &mut surface);
        assert_eq!(outcome, ScrollOutcome::Moved(5));
        let expected = sync.offset_for_page(5, 100);
        assert_eq!(surface.handles(), vec![expected]);
        assert!(surface.scrolls().is_empty(), "scroll channel must not scroll");
        assert_eq!(pages.window(), 4..7);
    }

    #[test]
    fn scroll_within_page_is_unchanged() {
        let (mut sync, mut pages, words, mut surface) = fixture(3000);
        sync.jump_to(3, &mut pages, &words, &mut surface);
        sync.set_from_scroll(3.0 * PAGE_H, false, &mut pages, &words, &mut surface);
        surface.ops.clear();
        let outcome = sync.set_from_scroll(3.0 * PAGE_H + 50.0, false, &mut pages, &words, &mut surface);
        assert_eq!(outcome, ScrollOutcome::Unchanged);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn scroll_ignored_while_dragging() {
        let (mut sync, mut pages, words, mut surface) = fixture(3000);
        let outcome = sync.set_from_scroll(20.0 * PAGE_H, true, &mut pages, &words, &mut surface);
        assert_eq!(outcome, ScrollOutcome::Suppressed);
        assert_eq!(sync.current_page(), 0);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn mismatched_scroll_clears_echo_and_applies() {
        let (mut sync, mut pages, words, mut surface) = fixture(3000);
        sync.set_from_slider(10, &mut pages, &words, &mut surface);
        let outcome = sync.set_from_scroll(60.0 * PAGE_H, false, &mut pages, &words, &mut surface);
        assert_eq!(outcome, ScrollOutcome::Moved(60));
        assert!(!sync.awaiting_echo());
    }

    #[test]
    fn drag_only_switches_on_page_boundary() {
        let (mut sync, mut pages, words, mut surface) = fixture(3000);
        assert_eq!(sync.drag_to(0.0, &mut pages, &words, &mut surface), Some(0));
        assert_eq!(sync.drag_to(1.0, &mut pages, &words, &mut surface), None);
        assert_eq!(sync.drag_to(3.0, &mut pages, &words, &mut surface), Some(1));
        assert_eq!(sync.drag_to(500.0, &mut pages, &words, &mut surface), Some(99));
        assert_eq!(sync.state().handle_offset, 300.0);
        assert_eq!(surface.ops.last(), Some(&Op::Populate(99, words[2970..3000].to_vec())));
    }
}
