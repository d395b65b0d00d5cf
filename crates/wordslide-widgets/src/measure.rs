#![forbid(unsafe_code)]

//! Measurement capability and glyph-width memoization.
//!
//! Item heights and label widths depend on whichever webfont the page has
//! loaded, so the engine never guesses them. It asks a [`Measurer`]:
//! production hosts back it with off-screen DOM elements, tests with fixed
//! numbers.
//!
//! Letter labels are measured once per letter per font. [`GlyphWidthCache`]
//! memoizes those widths and is invalidated when font metrics change.
//!
//! # Invalidation
//!
//! Call [`GlyphWidthCache::invalidate_all`] when the measured item height
//! changes; that is the engine's signal that the font swapped under it.
//! Changing the label font through [`GlyphWidthCache::set_font`] invalidates
//! automatically.

use crate::letter_index::{ALPHABET_LEN, letter_rank};

/// Measures rendered geometry on behalf of the engine.
pub trait Measurer {
    /// Render one throwaway word item off-screen and report its height.
    ///
    /// Returns `None` while the host cannot measure yet (fonts still
    /// loading, element detached).
    fn measure_item_height(&mut self) -> Option<f64>;

    /// Width of `text` rendered in the CSS `font`.
    fn measure_text_width(&mut self, text: &str, font: &str) -> f64;
}

impl<M: Measurer + ?Sized> Measurer for &mut M {
    fn measure_item_height(&mut self) -> Option<f64> {
        (**self).measure_item_height()
    }

    fn measure_text_width(&mut self, text: &str, font: &str) -> f64 {
        (**self).measure_text_width(text, font)
    }
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphCacheStats {
    /// Letters with a cached width.
    pub entries: usize,
    /// Lookups served from the cache.
    pub hits: u64,
    /// Lookups that called the measurer.
    pub misses: u64,
}

/// Memoized label widths for `A`–`Z` in one font.
#[derive(Debug, Clone)]
pub struct GlyphWidthCache {
    font: String,
    widths: [Option<f64>; ALPHABET_LEN],
    hits: u64,
    misses: u64,
}

impl GlyphWidthCache {
    /// Create an empty cache for `font`.
    #[must_use]
    pub fn new(font: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            widths: [None; ALPHABET_LEN],
            hits: 0,
            misses: 0,
        }
    }

    /// Font the cached widths belong to.
    #[must_use]
    pub fn font(&self) -> &str {
        &self.font
    }

    /// Switch fonts. Clears cached widths if the font differs.
    pub fn set_font(&mut self, font: &str) {
        if self.font != font {
            self.font = font.to_string();
            self.invalidate_all();
        }
    }

    /// Width of the label for `letter`, measuring on first use.
    ///
    /// Characters outside `A`–`Z` are measured every time and not cached.
    pub fn width(&mut self, letter: char, measurer: &mut dyn Measurer) -> f64 {
        let mut buf = [0u8; 4];
        let text = letter.encode_utf8(&mut buf);
        let Some(rank) = letter_rank(letter) else {
            self.misses += 1;
            return measurer.measure_text_width(text, &self.font);
        };
        if let Some(width) = self.widths[rank] {
            self.hits += 1;
            return width;
        }
        self.misses += 1;
        let width = measurer.measure_text_width(text, &self.font);
        self.widths[rank] = Some(width);
        width
    }

    /// Forget every cached width.
    pub fn invalidate_all(&mut self) {
        self.widths = [None; ALPHABET_LEN];
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> GlyphCacheStats {
        GlyphCacheStats {
            entries: self.widths.iter().filter(|w| w.is_some()).count(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
