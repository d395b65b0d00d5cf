#![forbid(unsafe_code)]

//! Page store: windowed virtualization of the word list.
//!
//! The viewport holds one placeholder per page, each exactly one page tall,
//! so the scroll geometry of the full list exists from the start. Only the
//! pages inside a small window around the visible page carry their words;
//! everything else is an empty box of the same height.
//!
//! # Core Types
//!
//! - [`PageStore`] - placeholder slots plus the populated window
//! - [`PageSlot`] - `Placeholder` or `Populated` per page
//! - [`WindowChange`] - which pages a window move populated and cleared
//!
//! # Invariants
//!
//! 1. At most `(2 × radius + 1) × words_per_page` words are populated,
//!    independent of list length.
//! 2. `populate` is idempotent; `clear` keeps the slot and its height.
//! 3. A rebuild discards every slot and starts over at page 0; page
//!    boundaries are not stable across layout changes.
//!
//! # Example
//!
//! ```ignore
//! let mut store = PageStore::new(1);
//! store.rebuild(words.len(), &metrics, &mut surface);
//! store.show(40, &words, &mut surface);
//! assert!(store.live_items() <= 3 * metrics.words_per_page());
//! ```

use std::collections::BTreeSet;
use std::ops::Range;

use crate::layout::LayoutMetrics;
use crate::surface::Surface;

/// State of one page placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PageSlot {
    /// Exists with its full height but renders nothing.
    #[default]
    Placeholder,
    /// Renders the words in `range`.
    Populated {
        /// Word positions rendered into this page.
        range: Range<usize>,
    },
}

impl PageSlot {
    /// Whether the slot currently renders words.
    #[must_use]
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated { .. })
    }
}

/// Pages populated and cleared by one window move.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowChange {
    /// Pages that went `Placeholder → Populated`.
    pub populated: Vec<usize>,
    /// Pages that went `Populated → Placeholder`.
    pub cleared: Vec<usize>,
}

impl WindowChange {
    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.populated.is_empty() && self.cleared.is_empty()
    }
}

/// One placeholder per page, with a populated window.
#[derive(Debug, Clone)]
pub struct PageStore {
    slots: Vec<PageSlot>,
    total_words: usize,
    words_per_page: usize,
    page_height: f64,
    radius: usize,
    window: Range<usize>,
    populated: BTreeSet<usize>,
    live_items: usize,
}

impl PageStore {
    /// Create an empty store with the given window radius.
    #[must_use]
    pub fn new(radius: usize) -> Self {
        Self {
            slots: Vec::new(),
            total_words: 0,
            words_per_page: 1,
            page_height: 0.0,
            radius,
            window: 0..0,
            populated: BTreeSet::new(),
            live_items: 0,
        }
    }

    /// Number of pages.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.slots.len()
    }

    /// Words per full page.
    #[must_use]
    pub fn words_per_page(&self) -> usize {
        self.words_per_page
    }

    /// Height of every page placeholder.
    #[must_use]
    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Window radius.
    #[must_use]
    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Current populated window (page range).
    #[must_use]
    pub fn window(&self) -> Range<usize> {
        self.window.clone()
    }

    /// Words currently rendered across all populated pages.
    #[must_use]
    pub fn live_items(&self) -> usize {
        self.live_items
    }

    /// Slot for `page`.
    #[must_use]
    pub fn slot(&self, page: usize) -> Option<&PageSlot> {
        self.slots.get(page)
    }

    /// Word positions belonging to `page`. Empty for out-of-range pages.
    #[must_use]
    pub fn page_range(&self, page: usize) -> Range<usize> {
        if page >= self.slots.len() {
            return 0..0;
        }
        let start = page * self.words_per_page;
        let end = (start + self.words_per_page).min(self.total_words);
        start..end
    }

    /// Scroll offset of `page`'s top edge.
    #[must_use]
    pub fn page_top(&self, page: usize) -> f64 {
        page as f64 * self.page_height
    }

    /// Page whose vertical extent contains `y`, clamped to existing pages.
    #[must_use]
    pub fn page_at(&self, y: f64) -> usize {
        let last = self.slots.len().saturating_sub(1);
        if self.page_height <= 0.0 || !y.is_finite() || y <= 0.0 {
            return 0;
        }
        ((y / self.page_height).floor() as usize).min(last)
    }

    /// Discard every slot and recreate placeholders for a new layout.
    ///
    /// The window resets to empty (page 0 is populated by the next
    /// [`show`](Self::show)).
    pub fn rebuild(&mut self, total_words: usize, metrics: &LayoutMetrics, surface: &mut dyn Surface) {
        let _span = wordslide_core::debug_span!(
            "page_store_rebuild",
            total_words,
            words_per_page = metrics.words_per_page()
        )
        .entered();

        self.total_words = total_words;
        self.words_per_page = metrics.words_per_page().max(1);
        self.page_height = metrics.page_height;
        let total_pages = total_words.div_ceil(self.words_per_page);
        self.slots = vec![PageSlot::Placeholder; total_pages];
        self.window = 0..0;
        self.populated.clear();
        self.live_items = 0;
        surface.rebuild_pages(total_pages, self.page_height);

        wordslide_core::info!(
            target: wordslide_core::logging::TARGET_PAGES,
            total_pages,
            page_height = self.page_height,
            "page store rebuilt"
        );
    }

    /// Render `page`'s words. No-op if already populated or out of range.
    ///
    /// Returns whether the page changed state.
    pub fn populate(&mut self, page: usize, words: &[String], surface: &mut dyn Surface) -> bool {
        let range = self.page_range(page);
        let Some(slot) = self.slots.get_mut(page) else {
            return false;
        };
        if slot.is_populated() {
            return false;
        }
        let range = range.start.min(words.len())..range.end.min(words.len());
        surface.populate_page(page, &words[range.clone()]);
        self.live_items += range.len();
        *slot = PageSlot::Populated { range };
        self.populated.insert(page);
        true
    }

    /// Drop `page`'s rendered words, keeping its placeholder and height.
    ///
    /// Returns whether the page changed state.
    pub fn clear(&mut self, page: usize, surface: &mut dyn Surface) -> bool {
        let Some(slot) = self.slots.get_mut(page) else {
            return false;
        };
        let PageSlot::Populated { range } = std::mem::take(slot) else {
            return false;
        };
        self.live_items -= range.len();
        self.populated.remove(&page);
        surface.clear_page(page);
        true
    }

    /// Window of pages that should be populated around `center`.
    #[must_use]
    pub fn window_around(&self, center: usize) -> Range<usize> {
        let total = self.slots.len();
        if total == 0 {
            return 0..0;
        }
        let center = center.min(total - 1);
        let start = center.saturating_sub(self.radius);
        let end = center.saturating_add(self.radius).saturating_add(1).min(total);
        start..end
    }

    /// Move the populated window to surround `center`.
    ///
    /// Pages leaving the window are cleared before new ones are populated,
    /// so the live item count never exceeds the bound mid-move. Work is
    /// proportional to the populated pages, not to the list length.
    pub fn show(&mut self, center: usize, words: &[String], surface: &mut dyn Surface) -> WindowChange {
        let next = self.window_around(center);
        let mut change = WindowChange::default();

        let stale: Vec<usize> = self
            .populated
            .iter()
            .copied()
            .filter(|page| !next.contains(page))
            .collect();
        for page in stale {
            if self.clear(page, surface) {
                change.cleared.push(page);
            }
        }
        for page in next.clone() {
            if self.populate(page, words, surface) {
                change.populated.push(page);
            }
        }
        self.window = next;

        if !change.is_empty() {
            wordslide_core::trace!(
                target: wordslide_core::logging::TARGET_PAGES,
                center,
                populated = ?change.populated,
                cleared = ?change.cleared,
                "window moved"
            );
        }
        change
    }
}
