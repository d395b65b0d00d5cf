#![forbid(unsafe_code)]

//! Pixel geometry primitives.

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero, negative, or not finite.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// Horizontal geometry of the slider: a track and the handle sliding on it.
///
/// The handle's left edge travels over `[0, travel()]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    /// Track width in pixels.
    pub width: f64,
    /// Handle width in pixels.
    pub handle_width: f64,
}

impl TrackGeometry {
    /// Create a new track geometry.
    #[inline]
    pub const fn new(width: f64, handle_width: f64) -> Self {
        Self {
            width,
            handle_width,
        }
    }

    /// Distance the handle's left edge can move. Never negative.
    #[inline]
    pub fn travel(&self) -> f64 {
        let travel = self.width - self.handle_width;
        if travel.is_finite() && travel > 0.0 {
            travel
        } else {
            0.0
        }
    }

    /// Clamp a handle offset into `[0, travel()]`.
    ///
    /// Non-finite input clamps to 0.
    #[inline]
    pub fn clamp_handle(&self, offset: f64) -> f64 {
        if !offset.is_finite() {
            return 0.0;
        }
        offset.clamp(0.0, self.travel())
    }

    /// Offset as a fraction of travel, in `[0, 1]`. Zero travel maps to 0.
    #[inline]
    pub fn normalize(&self, offset: f64) -> f64 {
        let travel = self.travel();
        if travel <= 0.0 {
            return 0.0;
        }
        self.clamp_handle(offset) / travel
    }
}
