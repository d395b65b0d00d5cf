#![forbid(unsafe_code)]

//! Core: canonical input events, pixel geometry, and input pacing.

pub mod event;
pub mod event_coalescer;
pub mod geometry;
pub mod logging;
pub mod wheel_snap;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
