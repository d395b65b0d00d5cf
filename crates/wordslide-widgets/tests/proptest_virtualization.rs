//! Property-based invariant tests for page virtualization and position sync.
//!
//! 1. Live items never exceed `(2 × radius + 1) × words_per_page`.
//! 2. Populate is idempotent; clear restores a placeholder and repopulating
//!    renders the same words.
//! 3. The offset chosen for a page maps back to that page.
//! 4. Dividers are non-decreasing for sorted lists and stay on the track.
//! 5. Any pointer sequence leaves the handle inside the track and the page
//!    inside the list.
//! 6. Layout always yields at least one row and a page at least one item tall.

mod common;

use std::time::Duration;

use common::{FixedMeasurer, RecordingSurface, alphabet_words, geometry};
use proptest::prelude::*;
use wordslide_core::event::{Event, PointerEventKind, PointerTarget};
use wordslide_core::geometry::TrackGeometry;
use wordslide_widgets::{
    Browser, BrowserConfig, LayoutMetrics, PageStore, PositionSynchronizer, build_letter_index,
    compute_layout,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn metrics(rows: usize, cols: usize) -> LayoutMetrics {
    LayoutMetrics {
        item_height: 24.0,
        rows_per_page: rows,
        columns_per_page: cols,
        page_height: rows as f64 * 24.0,
    }
}

fn word_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z][a-z]{0,6}", 0..400).prop_map(|mut words| {
        words.sort_by_key(|w| w.to_lowercase());
        words
    })
}

fn pointer_strategy() -> impl Strategy<Value = (PointerEventKind, PointerTarget, f64)> {
    (
        prop_oneof![
            Just(PointerEventKind::Down),
            Just(PointerEventKind::Move),
            Just(PointerEventKind::Move),
            Just(PointerEventKind::Up),
            Just(PointerEventKind::Cancel),
        ],
        prop_oneof![
            Just(PointerTarget::Handle),
            Just(PointerTarget::Track),
            Just(PointerTarget::Outside),
        ],
        -500.0f64..2000.0,
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Page store
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn live_items_stay_bounded(
        n in 0usize..5000,
        rows in 1usize..20,
        cols in 1usize..5,
        radius in 0usize..3,
        centers in prop::collection::vec(0usize..400, 1..40),
    ) {
        let words = alphabet_words(n);
        let m = metrics(rows, cols);
        let mut surface = RecordingSurface::default();
        let mut store = PageStore::new(radius);
        store.rebuild(words.len(), &m, &mut surface);
        let bound = (2 * radius + 1) * m.words_per_page();
        for center in centers {
            store.show(center, &words, &mut surface);
            prop_assert!(store.live_items() <= bound);
            prop_assert_eq!(store.live_items(), surface.live_words());
        }
    }

    #[test]
    fn populate_then_clear_restores_placeholder(
        n in 1usize..3000,
        rows in 1usize..20,
        page in 0usize..200,
    ) {
        let words = alphabet_words(n);
        let mut surface = RecordingSurface::default();
        let mut store = PageStore::new(1);
        store.rebuild(words.len(), &metrics(rows, 3), &mut surface);
        let page = page % store.total_pages();
        let height = surface.scroll_height();

        prop_assert!(store.populate(page, &words, &mut surface));
        let first_slot = store.slot(page).cloned();
        let live = store.live_items();
        prop_assert!(!store.populate(page, &words, &mut surface));
        prop_assert_eq!(store.live_items(), live);

        prop_assert!(store.clear(page, &mut surface));
        prop_assert_eq!(store.live_items(), 0);
        prop_assert!(!store.slot(page).is_some_and(|s| s.is_populated()));
        prop_assert_eq!(surface.scroll_height(), height);

        prop_assert!(store.populate(page, &words, &mut surface));
        prop_assert_eq!(store.slot(page).cloned(), first_slot);
        prop_assert_eq!(store.live_items(), live);
        let payloads = surface.payloads_for(page);
        prop_assert_eq!(payloads.len(), 2);
        prop_assert_eq!(payloads[0], payloads[1]);
        prop_assert_eq!(payloads[0], &words[store.page_range(page)]);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Slider round trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn offset_for_page_round_trips(
        track_width in 50.0f64..3000.0,
        total in 1usize..5000,
        page_seed in 0usize..5000,
    ) {
        let sync = PositionSynchronizer::new(TrackGeometry::new(track_width, 40.0), 400.0, 1.0);
        let page = page_seed % total;
        let offset = sync.offset_for_page(page, total);
        prop_assert!(offset >= 0.0 && offset <= sync.track().travel());
        if sync.track().travel() > 0.0 {
            prop_assert_eq!(sync.page_for_offset(offset, total), page);
        } else {
            prop_assert_eq!(sync.page_for_offset(offset, total), 0);
        }
    }

    #[test]
    fn page_for_offset_is_monotone(
        a in -100.0f64..1200.0,
        b in -100.0f64..1200.0,
        total in 0usize..2000,
    ) {
        let sync = PositionSynchronizer::new(TrackGeometry::new(1040.0, 40.0), 400.0, 1.0);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(sync.page_for_offset(lo, total) <= sync.page_for_offset(hi, total));
        prop_assert!(sync.page_for_offset(hi, total) < total.max(1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Dividers
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn dividers_are_sorted_and_on_track(words in word_strategy(), travel in 0.0f64..2000.0) {
        let index = build_letter_index(&words);
        let dividers = index.dividers(travel);
        if words.is_empty() {
            prop_assert!(dividers.is_empty());
        }
        for pair in dividers.windows(2) {
            prop_assert!(pair[0].position <= pair[1].position);
            prop_assert!(pair[0].letter < pair[1].letter);
        }
        for d in &dividers {
            prop_assert!(d.position >= 0.0 && d.position <= travel);
            prop_assert!(words[d.first_index].to_ascii_uppercase().starts_with(d.letter));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Pointer sequences
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn pointer_sequences_stay_in_bounds(
        n in 0usize..4000,
        events in prop::collection::vec(pointer_strategy(), 0..60),
    ) {
        let mut surface = RecordingSurface::default();
        let mut browser = Browser::new(
            alphabet_words(n),
            BrowserConfig::default(),
            FixedMeasurer::default(),
            geometry(416.0),
            &mut surface,
        );
        let bound = 3 * browser.layout().words_per_page();
        for (i, (kind, target, x)) in events.into_iter().enumerate() {
            let now = Duration::from_millis(i as u64 * 8);
            browser.handle_event(Event::pointer(kind, target, x), now, &mut surface);
            prop_assert!(browser.handle_offset() >= 0.0 && browser.handle_offset() <= 1000.0);
            prop_assert!(browser.current_page() < browser.total_pages().max(1));
            prop_assert!(surface.live_words() <= bound);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Layout floor
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn layout_has_at_least_one_row(
        viewport in -100.0f64..4000.0,
        item in 1.0f64..200.0,
        padding in 0.0f64..100.0,
    ) {
        let config = BrowserConfig::default().with_page_padding(padding);
        let mut measurer = FixedMeasurer { item_height: item, glyph_width: 8.0 };
        let m = compute_layout(viewport, None, &mut measurer, &config);
        prop_assert!(m.rows_per_page >= 1);
        prop_assert!(m.page_height >= m.item_height);
        prop_assert_eq!(m.words_per_page(), m.rows_per_page * 3);
    }
}
