#![forbid(unsafe_code)]

//! wordslide public facade crate.
//!
//! Re-exports the engine types hosts need day to day and offers a small
//! prelude. The `web` feature (on by default) adds the host-driven session.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use wordslide_core::event::{
    Buttons, Event, PointerEvent, PointerEventKind, PointerSource, PointerTarget, ResizeEvent,
    WheelDeltaMode, WheelEvent,
};
pub use wordslide_core::geometry::{Size, TrackGeometry};
pub use wordslide_core::wheel_snap::WheelSnapConfig;

// --- Engine re-exports -----------------------------------------------------

pub use wordslide_widgets::{
    Browser, BrowserConfig, Divider, LayoutMetrics, Measurer, OverlayLabel, PositionState,
    Surface,
};

// --- Web re-exports --------------------------------------------------------

#[cfg(feature = "web")]
pub use wordslide_web::{
    HostMeasurer, LoadError, StepResult, SurfaceOp, WebError, WebOutputs, WebSession,
    WebSurface, decode_word_list,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for wordslide hosts.
#[derive(Debug)]
pub enum Error {
    /// The word list could not be fetched or decoded.
    #[cfg(feature = "web")]
    Load(wordslide_web::LoadError),
    /// The session could not be set up.
    #[cfg(feature = "web")]
    Session(wordslide_web::WebError),
    /// Host-side failure with message.
    Host(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "web")]
            Self::Load(err) => write!(f, "{err}"),
            #[cfg(feature = "web")]
            Self::Session(err) => write!(f, "{err}"),
            Self::Host(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "web")]
            Self::Load(err) => Some(err),
            #[cfg(feature = "web")]
            Self::Session(err) => Some(err),
            Self::Host(_) => None,
        }
    }
}

#[cfg(feature = "web")]
impl From<wordslide_web::LoadError> for Error {
    fn from(err: wordslide_web::LoadError) -> Self {
        Self::Load(err)
    }
}

#[cfg(feature = "web")]
impl From<wordslide_web::WebError> for Error {
    fn from(err: wordslide_web::WebError) -> Self {
        Self::Session(err)
    }
}

/// Standard result type for wordslide APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Browser, BrowserConfig, Error, Event, Measurer, PointerEventKind, PointerTarget,
        ResizeEvent, Result, Size, Surface,
    };

    #[cfg(feature = "web")]
    pub use crate::{HostMeasurer, WebSession};

    #[cfg(feature = "web")]
    pub use crate::web;
    pub use crate::{core, widgets};
}

pub use wordslide_core as core;
#[cfg(feature = "web")]
pub use wordslide_web as web;
pub use wordslide_widgets as widgets;
