#![forbid(unsafe_code)]

//! Alphabetical word browser engine.
//!
//! A sorted word list is laid out as viewport-high pages in a scrollable
//! viewport, with a horizontal slider whose track is marked by letter
//! dividers. Dragging the slider or scrolling the viewport moves one shared
//! page position; only the pages around it carry rendered words.
//!
//! The engine is headless. It reads geometry through a [`Measurer`] and
//! writes everything visible through a [`Surface`]; [`Browser`] ties the
//! pieces together and consumes canonical
//! [`Event`](wordslide_core::event::Event)s.
//!
//! # Modules
//!
//! | module | role |
//! |--------|------|
//! | [`layout`] | rows, words per page, page height |
//! | [`letter_index`] | first word per letter, dividers, label fit |
//! | [`page_store`] | placeholder pages with a populated window |
//! | [`sync`] | slider ↔ scroll position synchronizer |
//! | [`drag`] | pointer drag state machine |
//! | [`overlay`] | letter labels shown while dragging |
//! | [`browser`] | the controller |

pub mod browser;
pub mod config;
pub mod drag;
pub mod layout;
pub mod letter_index;
pub mod measure;
pub mod overlay;
pub mod page_store;
pub mod surface;
pub mod sync;

pub use browser::Browser;
pub use config::BrowserConfig;
pub use layout::{LayoutMetrics, compute_layout};
pub use letter_index::{Divider, LetterFits, LetterIndex, build_letter_index, fit_letters};
pub use measure::{GlyphWidthCache, Measurer};
pub use overlay::OverlayLabel;
pub use page_store::{PageSlot, PageStore};
pub use surface::Surface;
pub use sync::{PositionState, PositionSynchronizer};
