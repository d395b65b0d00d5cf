//! Shared fixtures for integration tests: a fixed-metric measurer, a
//! recording surface, and word list generators.

#![allow(dead_code)]

use wordslide_core::event::ResizeEvent;
use wordslide_core::geometry::Size;
use wordslide_widgets::letter_index::Divider;
use wordslide_widgets::{Browser, BrowserConfig, Measurer, OverlayLabel, Surface};

/// Every item is `item_height` tall, every glyph `glyph_width` wide.
#[derive(Debug, Clone)]
pub struct FixedMeasurer {
    pub item_height: f64,
    pub glyph_width: f64,
}

impl Default for FixedMeasurer {
    fn default() -> Self {
        Self {
            item_height: 40.0,
            glyph_width: 10.0,
        }
    }
}

impl Measurer for FixedMeasurer {
    fn measure_item_height(&mut self) -> Option<f64> {
        Some(self.item_height)
    }

    fn measure_text_width(&mut self, text: &str, _font: &str) -> f64 {
        text.chars().count() as f64 * self.glyph_width
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Rebuild(usize, f64),
    Populate(usize, Vec<String>),
    Clear(usize),
    Handle(f64),
    Scroll(f64),
    Dividers(Vec<Divider>),
    Overlay(Vec<OverlayLabel>),
    ClearOverlay,
    Snap(bool),
}

/// Records calls and tracks the live word count the way a DOM would.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
    pub page_words: Vec<usize>,
    pub page_height: f64,
}

impl RecordingSurface {
    /// Words currently rendered across all pages.
    pub fn live_words(&self) -> usize {
        self.page_words.iter().sum()
    }

    /// Word payloads handed to `page`, in call order.
    pub fn payloads_for(&self, page: usize) -> Vec<&[String]> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Populate(p, words) if *p == page => Some(words.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Scroll height of the viewport content.
    pub fn scroll_height(&self) -> f64 {
        self.page_words.len() as f64 * self.page_height
    }
}

impl Surface for RecordingSurface {
    fn rebuild_pages(&mut self, page_count: usize, page_height: f64) {
        self.page_words = vec![0; page_count];
        self.page_height = page_height;
        self.ops.push(Op::Rebuild(page_count, page_height));
    }

    fn populate_page(&mut self, page: usize, words: &[String]) {
        self.page_words[page] = words.len();
        self.ops.push(Op::Populate(page, words.to_vec()));
    }

    fn clear_page(&mut self, page: usize) {
        self.page_words[page] = 0;
        self.ops.push(Op::Clear(page));
    }

    fn set_handle_offset(&mut self, offset: f64) {
        self.ops.push(Op::Handle(offset));
    }

    fn scroll_to(&mut self, top: f64) {
        self.ops.push(Op::Scroll(top));
    }

    fn set_dividers(&mut self, dividers: &[Divider]) {
        self.ops.push(Op::Dividers(dividers.to_vec()));
    }

    fn set_overlay(&mut self, labels: &[OverlayLabel]) {
        self.ops.push(Op::Overlay(labels.to_vec()));
    }

    fn clear_overlay(&mut self) {
        self.ops.push(Op::ClearOverlay);
    }

    fn set_scroll_snap(&mut self, enabled: bool) {
        self.ops.push(Op::Snap(enabled));
    }
}

/// `n` sorted words spread evenly over `a`–`z`.
pub fn alphabet_words(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("{}{i:06}", (b'a' + (i * 26 / n.max(1)) as u8) as char))
        .collect()
}

/// Viewport `height` tall, 1040px track with a 40px handle (1000px travel).
pub fn geometry(height: f64) -> ResizeEvent {
    ResizeEvent::new(Size::new(800.0, height), 1040.0, 40.0)
}

/// Browser over `words` with a 416px viewport: 10 rows of 40px, 30 words
/// per page.
pub fn browser(words: Vec<String>) -> (Browser<FixedMeasurer>, RecordingSurface) {
    let mut surface = RecordingSurface::default();
    let browser = Browser::new(
        words,
        BrowserConfig::default(),
        FixedMeasurer::default(),
        geometry(416.0),
        &mut surface,
    );
    (browser, surface)
}
