#![forbid(unsafe_code)]

//! Letter overlay shown above the track while dragging.
//!
//! The overlay names the letter under the handle and the present letters on
//! either side of it. Each label is centred in its letter's segment (between
//! its divider and the next one, or the end of the track). Labels that
//! [`fit_letters`](crate::letter_index::fit_letters) rejected are skipped;
//! neighbours are drawn at reduced opacity.

use crate::letter_index::{Divider, LetterFits, LetterIndex, leading_letter, segment_end};
use crate::surface::Surface;

/// One label in the drag overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLabel {
    /// Uppercase letter.
    pub letter: char,
    /// Horizontal centre in track pixels.
    pub x: f64,
    /// 1.0 for the current letter, lower for neighbours.
    pub opacity: f64,
    /// Whether this is the letter under the handle.
    pub current: bool,
}

/// Labels for `letter` and its present neighbours, left to right.
///
/// Letters without a divider or without room for a label are omitted, so the
/// result may be empty.
#[must_use]
pub fn overlay_labels(
    letter: char,
    index: &LetterIndex,
    dividers: &[Divider],
    fits: &LetterFits,
    travel: f64,
    neighbor_opacity: f64,
) -> Vec<OverlayLabel> {
    let (before, after) = index.neighbors(letter);
    [before, Some(letter), after]
        .into_iter()
        .flatten()
        .filter(|l| fits.fits(*l))
        .filter_map(|l| {
            let i = dividers.iter().position(|d| d.letter == l)?;
            let start = dividers[i].position;
            let end = segment_end(dividers, i, travel);
            let current = l == letter;
            Some(OverlayLabel {
                letter: l,
                x: (start + end) / 2.0,
                opacity: if current { 1.0 } else { neighbor_opacity },
                current,
            })
        })
        .collect()
}

/// Tracks what the overlay is showing so redundant writes are skipped.
#[derive(Debug, Clone, Default)]
pub struct LetterOverlay {
    shown: Option<Vec<OverlayLabel>>,
}

impl LetterOverlay {
    /// Create a hidden overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any labels are on screen.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.shown.is_some()
    }

    /// Labels currently on screen.
    #[must_use]
    pub fn labels(&self) -> &[OverlayLabel] {
        self.shown.as_deref().unwrap_or(&[])
    }

    /// Show the labels for the page starting with `first_word`.
    ///
    /// A first word with no leading letter shows an empty overlay.
    #[allow(clippy::too_many_arguments)]
    pub fn refresh(
        &mut self,
        first_word: Option<&str>,
        index: &LetterIndex,
        dividers: &[Divider],
        fits: &LetterFits,
        travel: f64,
        neighbor_opacity: f64,
        surface: &mut dyn Surface,
    ) {
        let labels = first_word
            .and_then(leading_letter)
            .map(|letter| overlay_labels(letter, index, dividers, fits, travel, neighbor_opacity))
            .unwrap_or_default();
        if self.shown.as_ref() == Some(&labels) {
            return;
        }
        surface.set_overlay(&labels);
        self.shown = Some(labels);
    }

    /// Remove every label.
    pub fn clear(&mut self, surface: &mut dyn Surface) {
        if self.shown.take().is_some() {
            surface.clear_overlay();
        }
    }
}
