#![forbid(unsafe_code)]

//! Layout calculator: how many words fit on one page.
//!
//! A page is one viewport-high block of `rows × columns` word items. Rows
//! come from the measured item height:
//!
//! ```text
//! rows_per_page  = max(1, floor((viewport_height - padding) / item_height))
//! words_per_page = rows_per_page * columns_per_page
//! total_pages    = ceil(len / words_per_page)
//! ```
//!
//! A viewport too small for a single row still gets one row, so page math
//! never divides by zero or indexes negatively.

use crate::config::{BrowserConfig, FALLBACK_ITEM_HEIGHT};
use crate::measure::Measurer;

/// Derived page geometry. Recomputed on every viewport or font change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Measured height of one word item.
    pub item_height: f64,
    /// Rows per page; at least 1.
    pub rows_per_page: usize,
    /// Columns per page; at least 1.
    pub columns_per_page: usize,
    /// Height of one page placeholder. At least one row tall.
    pub page_height: f64,
}

impl LayoutMetrics {
    /// Words on one full page.
    #[must_use]
    pub fn words_per_page(&self) -> usize {
        self.rows_per_page * self.columns_per_page
    }

    /// Pages needed for `len` words. Zero for an empty list.
    #[must_use]
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.words_per_page())
    }

    /// Page holding `word_index`.
    #[must_use]
    pub fn page_of(&self, word_index: usize) -> usize {
        word_index / self.words_per_page()
    }

    /// Whether switching from `self` to `other` moves any page boundary or
    /// page size.
    #[must_use]
    pub fn invalidates_pages(&self, other: &Self) -> bool {
        self.words_per_page() != other.words_per_page() || self.page_height != other.page_height
    }
}

fn usable(height: Option<f64>) -> Option<f64> {
    height.filter(|h| h.is_finite() && *h > 0.0)
}

/// Compute page geometry for a viewport.
///
/// `sample_item_height` is the host's current measurement, if it has one.
/// When it is missing or unusable the measurer renders a throwaway item;
/// if that fails too, [`FALLBACK_ITEM_HEIGHT`] is used.
pub fn compute_layout(
    viewport_height: f64,
    sample_item_height: Option<f64>,
    measurer: &mut dyn Measurer,
    config: &BrowserConfig,
) -> LayoutMetrics {
    let item_height = usable(sample_item_height)
        .or_else(|| usable(measurer.measure_item_height()))
        .unwrap_or(FALLBACK_ITEM_HEIGHT);

    let available = if viewport_height.is_finite() {
        viewport_height - config.page_padding
    } else {
        0.0
    };
    let rows = (available / item_height).floor();
    let rows_per_page = if rows >= 1.0 { rows as usize } else { 1 };

    let page_height = if viewport_height.is_finite() {
        viewport_height.max(item_height)
    } else {
        item_height
    };

    let metrics = LayoutMetrics {
        item_height,
        rows_per_page,
        columns_per_page: config.columns(),
        page_height,
    };
    wordslide_core::debug!(
        target: wordslide_core::logging::TARGET_LAYOUT,
        viewport_height,
        item_height,
        rows_per_page,
        words_per_page = metrics.words_per_page(),
        "layout computed"
    );
    metrics
}
