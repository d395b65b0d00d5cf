#![forbid(unsafe_code)]

//! The rendering surface the browser drives.
//!
//! The engine never touches a DOM. Everything visible goes through
//! [`Surface`]: page placeholders in the scrollable viewport, the slider
//! handle, divider marks, and the drag overlay. A browser host implements it
//! over real elements; `wordslide-web` records the calls for a JS bridge;
//! tests record them to assert on.
//!
//! Writes through a surface are *silent*: setting the handle offset or the
//! scroll position must not re-enter the engine as if the user had done it.
//! The scroll position is the one exception the host cannot suppress (the
//! browser fires `scroll` for programmatic scrolls too); the synchronizer
//! recognizes and drops that echo.

use crate::letter_index::Divider;
use crate::overlay::OverlayLabel;

/// Output side of the browser.
pub trait Surface {
    /// Replace every page child with `page_count` empty placeholders of
    /// `page_height` pixels.
    fn rebuild_pages(&mut self, page_count: usize, page_height: f64);

    /// Render `words` into placeholder `page`.
    fn populate_page(&mut self, page: usize, words: &[String]);

    /// Remove the rendered words from `page`, keeping its height.
    fn clear_page(&mut self, page: usize);

    /// Move the slider handle's left edge to `offset` without firing slider
    /// handlers.
    fn set_handle_offset(&mut self, offset: f64);

    /// Set the viewport's `scrollTop` (instant, no smooth scrolling).
    fn scroll_to(&mut self, top: f64);

    /// Replace the divider marks on the track.
    fn set_dividers(&mut self, dividers: &[Divider]);

    /// Replace the drag overlay labels.
    fn set_overlay(&mut self, labels: &[OverlayLabel]);

    /// Remove all drag overlay labels.
    fn clear_overlay(&mut self);

    /// Toggle the viewport's CSS scroll-snap.
    fn set_scroll_snap(&mut self, enabled: bool);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn rebuild_pages(&mut self, page_count: usize, page_height: f64) {
        (**self).rebuild_pages(page_count, page_height);
    }

    fn populate_page(&mut self, page: usize, words: &[String]) {
        (**self).populate_page(page, words);
    }

    fn clear_page(&mut self, page: usize) {
        (**self).clear_page(page);
    }

    fn set_handle_offset(&mut self, offset: f64) {
        (**self).set_handle_offset(offset);
    }

    fn scroll_to(&mut self, top: f64) {
        (**self).scroll_to(top);
    }

    fn set_dividers(&mut self, dividers: &[Divider]) {
        (**self).set_dividers(dividers);
    }

    fn set_overlay(&mut self, labels: &[OverlayLabel]) {
        (**self).set_overlay(labels);
    }

    fn clear_overlay(&mut self) {
        (**self).clear_overlay();
    }

    fn set_scroll_snap(&mut self, enabled: bool) {
        (**self).set_scroll_snap(enabled);
    }
}
