#![forbid(unsafe_code)]

//! Browser configuration.

use wordslide_core::wheel_snap::WheelSnapConfig;

/// Words laid out side by side in one row.
pub const DEFAULT_COLUMNS_PER_PAGE: usize = 3;

/// Item height used when nothing could be measured.
pub const FALLBACK_ITEM_HEIGHT: f64 = 24.0;

/// Tunables for a [`Browser`](crate::browser::Browser).
///
/// All values have working defaults; hosts override what their stylesheet
/// changes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BrowserConfig {
    /// Columns per page (default: 3).
    pub columns_per_page: usize,
    /// Vertical padding inside each page, subtracted before fitting rows
    /// (default: 16px).
    pub page_padding: f64,
    /// Pages kept populated on each side of the visible page (default: 1).
    pub window_radius: usize,
    /// Extra room a letter label needs beyond its glyph width (default: 4px).
    pub fit_margin: f64,
    /// Opacity of the neighbouring letters in the drag overlay
    /// (default: 0.35).
    pub neighbor_opacity: f64,
    /// How far a scroll event may land from a programmatic scroll target and
    /// still count as its echo (default: 1px).
    pub scroll_echo_tolerance: f64,
    /// CSS font used to measure letter labels (default: `bold 14px sans-serif`).
    pub label_font: String,
    /// Scroll-snap correction for notched wheels.
    pub wheel_snap: WheelSnapConfig,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            columns_per_page: DEFAULT_COLUMNS_PER_PAGE,
            page_padding: 16.0,
            window_radius: 1,
            fit_margin: 4.0,
            neighbor_opacity: 0.35,
            scroll_echo_tolerance: 1.0,
            label_font: "bold 14px sans-serif".to_string(),
            wheel_snap: WheelSnapConfig::default(),
        }
    }
}

impl BrowserConfig {
    /// Set columns per page. Zero is treated as one.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns_per_page = columns;
        self
    }

    /// Set the page padding.
    #[must_use]
    pub fn with_page_padding(mut self, padding: f64) -> Self {
        self.page_padding = padding;
        self
    }

    /// Set the virtualization window radius.
    #[must_use]
    pub fn with_window_radius(mut self, radius: usize) -> Self {
        self.window_radius = radius;
        self
    }

    /// Set the label fit margin.
    #[must_use]
    pub fn with_fit_margin(mut self, margin: f64) -> Self {
        self.fit_margin = margin;
        self
    }

    /// Set the label font.
    #[must_use]
    pub fn with_label_font(mut self, font: impl Into<String>) -> Self {
        self.label_font = font.into();
        self
    }

    /// Set the wheel-snap correction.
    #[must_use]
    pub fn with_wheel_snap(mut self, wheel_snap: WheelSnapConfig) -> Self {
        self.wheel_snap = wheel_snap;
        self
    }

    /// Columns per page, never zero.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns_per_page.max(1)
    }
}
