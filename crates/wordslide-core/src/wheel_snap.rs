#![forbid(unsafe_code)]

//! Scroll-snap suspension for notched wheel input.
//!
//! Some browser engines animate native scroll-snap badly when fed discrete
//! wheel notches: each notch scrolls, snaps back, scrolls again. The fix is
//! to switch snapping off while notched input is arriving and switch it back
//! on once the wheel has been quiet for a short settle period.
//!
//! Whether the correction is needed is a platform decision; the host
//! resolves it and passes [`WheelSnapConfig::enabled`]. This module never
//! inspects user agents.
//!
//! # State Machine
//!
//! ```text
//!            notched wheel / Disable
//!   Snapping ───────────────────────▶ Suspended { deadline }
//!      ▲                                   │  notched wheel: deadline = now + settle
//!      └──────── poll(now >= deadline) ────┘  / Enable
//! ```
//!
//! Time is supplied by the caller, so the guard is deterministic under test.

use core::time::Duration;

use crate::event::WheelEvent;

/// Default quiet period before snapping is restored.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(120);

/// Default pixel size of one wheel notch.
pub const DEFAULT_NOTCH_PX: f64 = 100.0;

/// Configuration for the wheel-snap correction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WheelSnapConfig {
    /// Whether the correction is active on this platform (default: false).
    pub enabled: bool,
    /// Quiet period after the last notched event (default: 120ms).
    #[cfg_attr(feature = "serde", serde(deserialize_with = "millis::deserialize"))]
    pub settle: Duration,
    /// Pixel delta of one wheel notch on this platform (default: 100).
    pub notch_px: f64,
}

impl Default for WheelSnapConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            settle: DEFAULT_SETTLE,
            notch_px: DEFAULT_NOTCH_PX,
        }
    }
}

impl WheelSnapConfig {
    /// Enable or disable the correction.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the settle period.
    #[must_use]
    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Set the notch size.
    #[must_use]
    pub fn with_notch_px(mut self, notch_px: f64) -> Self {
        self.notch_px = notch_px;
        self
    }
}

#[cfg(feature = "serde")]
mod millis {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// What the host should do with the viewport's scroll-snap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapCommand {
    /// Turn scroll-snap off.
    Disable,
    /// Turn scroll-snap back on.
    Enable,
}

/// Debounced scroll-snap suspension.
#[derive(Debug, Clone, Default)]
pub struct WheelSnapGuard {
    config: WheelSnapConfig,
    deadline: Option<Duration>,
}

impl WheelSnapGuard {
    /// Create a guard.
    #[must_use]
    pub fn new(config: WheelSnapConfig) -> Self {
        Self {
            config,
            deadline: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &WheelSnapConfig {
        &self.config
    }

    /// Whether snapping is currently suspended.
    #[must_use]
    pub const fn is_suspended(&self) -> bool {
        self.deadline.is_some()
    }

    /// When the pending re-enable fires, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    /// Feed a wheel event observed at `now`.
    ///
    /// Returns [`SnapCommand::Disable`] on the first notched event; later
    /// notched events only push the deadline out.
    pub fn on_wheel(&mut self, wheel: &WheelEvent, now: Duration) -> Option<SnapCommand> {
        if !self.config.enabled || wheel.is_trackpad_shaped(self.config.notch_px) {
            return None;
        }
        let was_suspended = self.deadline.is_some();
        self.deadline = Some(now.saturating_add(self.config.settle));
        if was_suspended {
            None
        } else {
            crate::debug!(target: crate::logging::TARGET_INPUT, delta_y = wheel.delta_y, "scroll-snap suspended");
            Some(SnapCommand::Disable)
        }
    }

    /// Check the timer at `now`.
    ///
    /// Returns [`SnapCommand::Enable`] once the deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<SnapCommand> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                crate::debug!(target: crate::logging::TARGET_INPUT, "scroll-snap restored");
                Some(SnapCommand::Enable)
            }
            _ => None,
        }
    }
}
