#![forbid(unsafe_code)]

//! Interaction controller: the word browser as one event-driven value.
//!
//! [`Browser`] owns the word list and every piece of derived state (layout,
//! letter index, dividers, page store, position) and reacts to canonical
//! [`Event`]s. All output goes through a [`Surface`] passed to each call, so
//! the same controller runs under a DOM host, the web session, and tests.
//!
//! # Event handling
//!
//! | event | effect |
//! |-------|--------|
//! | `Pointer` | drag state machine; handle moves, page follows, overlay refreshes |
//! | `Wheel` | wheel-snap guard may suspend scroll-snap |
//! | `Scroll` | coalesced; applied on the next frame |
//! | `Resize` | coalesced; applied on the next frame, after any scroll |
//! | `AnimationFrame` | apply pending scroll, then pending resize; poll timers |
//! | `Tick` | poll timers |
//!
//! # Resize
//!
//! A layout change rebuilds the page store, which starts over at page 0.
//! The browser then returns to the page holding the word that was first on
//! screen before the resize, so the reader keeps their place.
//!
//! # Empty lists
//!
//! With no words there are no pages and no dividers; pointer input is
//! ignored and the slider stays at 0.

use core::time::Duration;

use wordslide_core::event::{Event, PointerEvent, ResizeEvent};
use wordslide_core::event_coalescer::EventCoalescer;
use wordslide_core::geometry::{Size, TrackGeometry};
use wordslide_core::wheel_snap::{SnapCommand, WheelSnapGuard};

use crate::config::BrowserConfig;
use crate::drag::{DragPhase, DragUpdate};
use crate::layout::{LayoutMetrics, compute_layout};
use crate::letter_index::{Divider, LetterFits, LetterIndex, build_letter_index, fit_letters};
use crate::measure::{GlyphWidthCache, Measurer};
use crate::overlay::{LetterOverlay, OverlayLabel};
use crate::page_store::PageStore;
use crate::surface::Surface;
use crate::sync::{PositionSynchronizer, ScrollOutcome};

/// An alphabetical word browser bound to a measurer.
#[derive(Debug)]
pub struct Browser<M> {
    words: Vec<String>,
    config: BrowserConfig,
    measurer: M,
    viewport: Size,
    layout: LayoutMetrics,
    letters: LetterIndex,
    dividers: Vec<Divider>,
    fits: LetterFits,
    glyphs: GlyphWidthCache,
    pages: PageStore,
    sync: PositionSynchronizer,
    drag: DragPhase,
    overlay: LetterOverlay,
    coalescer: EventCoalescer,
    snap: WheelSnapGuard,
}

impl<M: Measurer> Browser<M> {
    /// Build the browser for `words` (assumed sorted case-insensitively) and
    /// render its initial state: placeholders, dividers, page 0.
    pub fn new(
        words: Vec<String>,
        config: BrowserConfig,
        mut measurer: M,
        geometry: ResizeEvent,
        surface: &mut dyn Surface,
    ) -> Self {
        let _span = wordslide_core::debug_span!("browser_new", words = words.len()).entered();

        let track = TrackGeometry::new(geometry.track_width, geometry.handle_width);
        let layout = compute_layout(geometry.viewport.height, None, &mut measurer, &config);
        let mut browser = Self {
            letters: build_letter_index(&words),
            glyphs: GlyphWidthCache::new(config.label_font.clone()),
            pages: PageStore::new(config.window_radius),
            sync: PositionSynchronizer::new(
                track,
                geometry.viewport.height,
                config.scroll_echo_tolerance,
            ),
            snap: WheelSnapGuard::new(config.wheel_snap),
            drag: DragPhase::default(),
            overlay: LetterOverlay::new(),
            coalescer: EventCoalescer::new(),
            dividers: Vec::new(),
            fits: LetterFits::default(),
            viewport: geometry.viewport,
            words,
            config,
            measurer,
            layout,
        };

        browser
            .pages
            .rebuild(browser.words.len(), &browser.layout, surface);
        browser.refresh_dividers(surface);
        if browser.pages.total_pages() > 0 {
            browser
                .sync
                .jump_to(0, &mut browser.pages, &browser.words, surface);
        } else {
            surface.set_handle_offset(0.0);
        }

        wordslide_core::info!(
            target: wordslide_core::logging::TARGET_LAYOUT,
            words = browser.words.len(),
            total_pages = browser.pages.total_pages(),
            words_per_page = browser.layout.words_per_page(),
            "browser ready"
        );
        browser
    }

    /// React to one event observed at `now` on the host clock.
    pub fn handle_event(&mut self, event: Event, now: Duration, surface: &mut dyn Surface) {
        match event {
            Event::Pointer(pointer) => self.on_pointer(&pointer, surface),
            Event::Wheel(wheel) => {
                if let Some(command) = self.snap.on_wheel(&wheel, now) {
                    apply_snap(command, surface);
                }
            }
            Event::Scroll { .. } | Event::Resize(_) => {
                let passthrough = self.coalescer.push(event);
                debug_assert!(passthrough.is_none());
            }
            Event::AnimationFrame => self.on_frame(now, surface),
            Event::Tick => self.poll_timers(now, surface),
        }
    }

    /// Apply a resize immediately, bypassing frame coalescing.
    pub fn resize(&mut self, geometry: ResizeEvent, surface: &mut dyn Surface) {
        self.apply_resize(geometry, surface);
    }

    /// Re-measure item height and glyph widths at the current geometry.
    ///
    /// Hosts call this when a webfont finishes loading.
    pub fn remeasure(&mut self, surface: &mut dyn Surface) {
        let track = self.sync.track();
        let geometry = ResizeEvent::new(self.viewport, track.width, track.handle_width);
        self.apply_resize(geometry, surface);
    }

    /// Switch the font slider labels are measured in.
    ///
    /// Cached glyph widths are dropped and label fits recomputed; the page
    /// layout is untouched.
    pub fn set_label_font(&mut self, font: &str, surface: &mut dyn Surface) {
        if self.glyphs.font() == font {
            return;
        }
        self.config.label_font = font.to_string();
        self.glyphs.set_font(font);
        wordslide_core::debug!(
            target: wordslide_core::logging::TARGET_LAYOUT,
            font,
            "label font changed"
        );
        self.refresh_dividers(surface);
        if self.overlay.is_visible() {
            self.refresh_overlay(surface);
        }
    }

    /// Move `delta` pages forward (or back) through the slider channel.
    pub fn step_pages(&mut self, delta: isize, surface: &mut dyn Surface) {
        let total = self.pages.total_pages();
        if total == 0 {
            return;
        }
        let target = self
            .sync
            .current_page()
            .saturating_add_signed(delta)
            .min(total - 1);
        self.jump_to_page(target, surface);
    }

    /// Show `page` (clamped), moving both handle and scroll position.
    pub fn jump_to_page(&mut self, page: usize, surface: &mut dyn Surface) {
        if self.pages.total_pages() == 0 {
            return;
        }
        self.sync
            .jump_to(page, &mut self.pages, &self.words, surface);
    }

    /// Show the page holding the first word starting with `letter`.
    ///
    /// Returns `false` when no word starts with it.
    pub fn jump_to_letter(&mut self, letter: char, surface: &mut dyn Surface) -> bool {
        let Some(first) = self.letters.first_index(letter) else {
            return false;
        };
        self.jump_to_page(self.layout.page_of(first), surface);
        true
    }

    /// When the next timer fires, if one is pending.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.snap.deadline()
    }

    // --- accessors -------------------------------------------------------

    /// The full word list.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Current page geometry.
    #[must_use]
    pub fn layout(&self) -> &LayoutMetrics {
        &self.layout
    }

    /// Letter index over the word list.
    #[must_use]
    pub fn letters(&self) -> &LetterIndex {
        &self.letters
    }

    /// Divider marks, in letter order.
    #[must_use]
    pub fn dividers(&self) -> &[Divider] {
        &self.dividers
    }

    /// Which letters have room for a label.
    #[must_use]
    pub fn fits(&self) -> &LetterFits {
        &self.fits
    }

    /// Page store state.
    #[must_use]
    pub fn pages(&self) -> &PageStore {
        &self.pages
    }

    /// Current page index.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.sync.current_page()
    }

    /// Number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.pages.total_pages()
    }

    /// Words currently rendered.
    #[must_use]
    pub fn live_items(&self) -> usize {
        self.pages.live_items()
    }

    /// Words on the current page.
    #[must_use]
    pub fn visible_words(&self) -> &[String] {
        let range = self.pages.page_range(self.sync.current_page());
        &self.words[range]
    }

    /// First word on the current page.
    #[must_use]
    pub fn first_visible_word(&self) -> Option<&str> {
        self.visible_words().first().map(String::as_str)
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Handle left edge in track pixels.
    #[must_use]
    pub fn handle_offset(&self) -> f64 {
        self.sync.state().handle_offset
    }

    /// Overlay labels on screen (empty unless dragging).
    #[must_use]
    pub fn overlay_labels(&self) -> &[OverlayLabel] {
        self.overlay.labels()
    }

    /// Whether scroll-snap is currently suspended.
    #[must_use]
    pub fn snap_suspended(&self) -> bool {
        self.snap.is_suspended()
    }

    /// The measurer, for hosts that feed it new readings.
    pub fn measurer_mut(&mut self) -> &mut M {
        &mut self.measurer
    }

    // --- internals -------------------------------------------------------

    fn on_pointer(&mut self, pointer: &PointerEvent, surface: &mut dyn Surface) {
        if self.pages.total_pages() == 0 {
            return;
        }
        let handle_width = self.sync.track().handle_width;
        match self
            .drag
            .on_pointer(pointer, self.sync.state().handle_offset, handle_width)
        {
            DragUpdate::Started { offset, origin } => {
                wordslide_core::debug!(target: wordslide_core::logging::TARGET_INPUT, ?origin, x = pointer.x, "drag started");
                self.drag_handle_to(offset, surface);
            }
            DragUpdate::Moved { offset } => self.drag_handle_to(offset, surface),
            DragUpdate::Ended(_state) => {
                self.overlay.clear(surface);
                wordslide_core::debug!(
                    target: wordslide_core::logging::TARGET_INPUT,
                    moves = _state.moves,
                    page = self.sync.current_page(),
                    "drag ended"
                );
            }
            DragUpdate::Ignored => {}
        }
    }

    fn drag_handle_to(&mut self, offset: f64, surface: &mut dyn Surface) {
        self.sync
            .drag_to(offset, &mut self.pages, &self.words, surface);
        self.refresh_overlay(surface);
    }

    fn on_frame(&mut self, now: Duration, surface: &mut dyn Surface) {
        let coalesced = self.coalescer.pending_scroll_count();
        if coalesced > 1 {
            wordslide_core::trace!(target: wordslide_core::logging::TARGET_INPUT, scrolls = coalesced, "scroll events coalesced");
        }
        // Scroll first: its offset belongs to the geometry before the resize.
        for event in self.coalescer.flush() {
            match event {
                Event::Resize(geometry) => self.apply_resize(geometry, surface),
                Event::Scroll { top } => self.apply_scroll(top, surface),
                _ => {}
            }
        }
        self.poll_timers(now, surface);
    }

    fn poll_timers(&mut self, now: Duration, surface: &mut dyn Surface) {
        if let Some(command) = self.snap.poll(now) {
            apply_snap(command, surface);
        }
    }

    fn apply_scroll(&mut self, top: f64, surface: &mut dyn Surface) {
        let outcome = self.sync.set_from_scroll(
            top,
            self.drag.is_dragging(),
            &mut self.pages,
            &self.words,
            surface,
        );
        if let ScrollOutcome::Moved(page) = outcome {
            wordslide_core::trace!(target: wordslide_core::logging::TARGET_INPUT, top, page, "scroll applied");
        }
    }

    fn apply_resize(&mut self, geometry: ResizeEvent, surface: &mut dyn Surface) {
        let _span = wordslide_core::debug_span!(
            "browser_resize",
            width = geometry.viewport.width,
            height = geometry.viewport.height
        )
        .entered();

        let anchor = self.pages.page_range(self.sync.current_page()).start;
        let track = TrackGeometry::new(geometry.track_width, geometry.handle_width);
        let track_changed = track != self.sync.track();
        self.viewport = geometry.viewport;
        self.sync.set_geometry(track, geometry.viewport.height);

        let layout = compute_layout(
            geometry.viewport.height,
            None,
            &mut self.measurer,
            &self.config,
        );
        let font_changed = layout.item_height != self.layout.item_height;
        if font_changed {
            self.glyphs.invalidate_all();
        }
        let previous = core::mem::replace(&mut self.layout, layout);

        if track_changed || font_changed {
            self.refresh_dividers(surface);
        }

        if previous.invalidates_pages(&layout) {
            self.pages.rebuild(self.words.len(), &layout, surface);
            if self.pages.total_pages() > 0 {
                self.sync
                    .jump_to(layout.page_of(anchor), &mut self.pages, &self.words, surface);
            }
            wordslide_core::info!(
                target: wordslide_core::logging::TARGET_LAYOUT,
                anchor,
                page = self.sync.current_page(),
                total_pages = self.pages.total_pages(),
                rows_per_page = layout.rows_per_page,
                "relayout"
            );
        } else if track_changed {
            self.sync.realign_handle(self.pages.total_pages(), surface);
        }

        if self.overlay.is_visible() {
            self.refresh_overlay(surface);
        }
    }

    fn refresh_dividers(&mut self, surface: &mut dyn Surface) {
        let travel = self.sync.track().travel();
        self.dividers = self.letters.dividers(travel);
        self.fits = fit_letters(
            &self.dividers,
            travel,
            self.config.fit_margin,
            &mut self.glyphs,
            &mut self.measurer,
        );
        surface.set_dividers(&self.dividers);
    }

    fn refresh_overlay(&mut self, surface: &mut dyn Surface) {
        let first = self
            .words
            .get(self.pages.page_range(self.sync.current_page()).start)
            .map(String::as_str);
        self.overlay.refresh(
            first,
            &self.letters,
            &self.dividers,
            &self.fits,
            self.sync.track().travel(),
            self.config.neighbor_opacity,
            surface,
        );
    }
}

fn apply_snap(command: SnapCommand, surface: &mut dyn Surface) {
    surface.set_scroll_snap(command == SnapCommand::Enable);
}
