#![forbid(unsafe_code)]

//! Letter index: where each initial letter starts in the word list.
//!
//! One linear scan records, for `A`–`Z`, the first word position whose
//! leading character is that letter (case-insensitive). From that the slider
//! gets its dividers: a letter whose words start at `i` in a list of `n`
//! words gets a divider at `i / n × travel`, the handle offset that selects
//! its first word.
//!
//! For a case-insensitively sorted list the dividers are non-decreasing in
//! letter order. Letters with no words are absent and get no divider.
//!
//! [`fit_letters`] decides which dividers have room for a letter label: a
//! letter fits only if its glyph plus a margin is narrower than the gap to
//! the next present divider. Rare letters (`Q`, `X`) usually do not.

use crate::measure::{GlyphWidthCache, Measurer};

/// Number of letters tracked.
pub const ALPHABET_LEN: usize = 26;

/// Rank of `c` in `A`–`Z` (case-insensitive), or `None`.
#[must_use]
pub fn letter_rank(c: char) -> Option<usize> {
    let upper = c.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| (upper as u8 - b'A') as usize)
}

/// Letter at `rank` (0 = `A`).
///
/// # Panics
///
/// Panics if `rank >= ALPHABET_LEN`.
#[must_use]
pub fn letter_at(rank: usize) -> char {
    assert!(rank < ALPHABET_LEN, "letter rank {rank} out of range");
    (b'A' + rank as u8) as char
}

/// Uppercase leading letter of `word`, if it starts with `A`–`Z`.
#[must_use]
pub fn leading_letter(word: &str) -> Option<char> {
    let first = word.chars().next()?;
    letter_rank(first).map(letter_at)
}

/// First word position for each letter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LetterIndex {
    first: [Option<usize>; ALPHABET_LEN],
    len: usize,
}

/// Scan `words` once and record each letter's first position.
pub fn build_letter_index<S: AsRef<str>>(words: &[S]) -> LetterIndex {
    let mut first = [None; ALPHABET_LEN];
    for (i, word) in words.iter().enumerate() {
        if let Some(rank) = word.as_ref().chars().next().and_then(letter_rank)
            && first[rank].is_none()
        {
            first[rank] = Some(i);
        }
    }
    LetterIndex {
        first,
        len: words.len(),
    }
}

/// A letter boundary on the slider track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Divider {
    /// Uppercase letter.
    pub letter: char,
    /// First word position for the letter.
    pub first_index: usize,
    /// Pixel offset along the handle's travel.
    pub position: f64,
}

impl LetterIndex {
    /// Length of the indexed list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the indexed list was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First position of `letter`, or `None` if absent.
    #[must_use]
    pub fn first_index(&self, letter: char) -> Option<usize> {
        letter_rank(letter).and_then(|rank| self.first[rank])
    }

    /// Present letters with their first positions, in alphabet order.
    pub fn present(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.first
            .iter()
            .enumerate()
            .filter_map(|(rank, first)| first.map(|i| (letter_at(rank), i)))
    }

    /// Nearest present letters before and after `letter`.
    #[must_use]
    pub fn neighbors(&self, letter: char) -> (Option<char>, Option<char>) {
        let Some(rank) = letter_rank(letter) else {
            return (None, None);
        };
        let before = (0..rank)
            .rev()
            .find(|&r| self.first[r].is_some())
            .map(letter_at);
        let after = (rank + 1..ALPHABET_LEN)
            .find(|&r| self.first[r].is_some())
            .map(letter_at);
        (before, after)
    }

    /// Divider for every present letter, scaled to `travel` pixels.
    ///
    /// Empty when the list is empty.
    #[must_use]
    pub fn dividers(&self, travel: f64) -> Vec<Divider> {
        if self.len == 0 {
            return Vec::new();
        }
        let travel = if travel.is_finite() { travel.max(0.0) } else { 0.0 };
        self.present()
            .map(|(letter, first_index)| Divider {
                letter,
                first_index,
                position: first_index as f64 / self.len as f64 * travel,
            })
            .collect()
    }
}

/// Which letters have room for a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LetterFits {
    fits: [bool; ALPHABET_LEN],
}

impl LetterFits {
    /// Whether `letter` was marked as fitting.
    #[must_use]
    pub fn fits(&self, letter: char) -> bool {
        letter_rank(letter).is_some_and(|rank| self.fits[rank])
    }

    /// Count of fitting letters.
    #[must_use]
    pub fn count(&self) -> usize {
        self.fits.iter().filter(|f| **f).count()
    }
}

/// Right edge of the segment starting at `dividers[i]`.
#[must_use]
pub fn segment_end(dividers: &[Divider], i: usize, travel: f64) -> f64 {
    dividers.get(i + 1).map_or(travel, |next| next.position)
}

/// Measure each divider's label against its segment.
pub fn fit_letters(
    dividers: &[Divider],
    travel: f64,
    margin: f64,
    glyphs: &mut GlyphWidthCache,
    measurer: &mut dyn Measurer,
) -> LetterFits {
    let mut fits = LetterFits::default();
    for (i, divider) in dividers.iter().enumerate() {
        let Some(rank) = letter_rank(divider.letter) else {
            continue;
        };
        let space = segment_end(dividers, i, travel) - divider.position;
        let glyph = glyphs.width(divider.letter, measurer);
        fits.fits[rank] = glyph + margin < space;
    }
    fits
}
