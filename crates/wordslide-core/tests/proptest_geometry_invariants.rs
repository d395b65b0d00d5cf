//! Property-based invariant tests for slider geometry and input pacing.
//!
//! 1. Handle clamping always lands inside `[0, travel]`.
//! 2. Clamping is idempotent.
//! 3. Normalization stays in `[0, 1]` and is monotone in the offset.
//! 4. Travel is never negative, whatever the widths.
//! 5. The coalescer always hands back the last scroll offset pushed.
//! 6. The snap guard never re-enables before `settle` has elapsed.

use std::time::Duration;

use proptest::prelude::*;
use wordslide_core::event::{Event, WheelEvent};
use wordslide_core::event_coalescer::EventCoalescer;
use wordslide_core::geometry::TrackGeometry;
use wordslide_core::wheel_snap::{SnapCommand, WheelSnapConfig, WheelSnapGuard};

// ── Helpers ─────────────────────────────────────────────────────────────

fn track_strategy() -> impl Strategy<Value = TrackGeometry> {
    (0.0f64..4000.0, 0.0f64..400.0).prop_map(|(w, h)| TrackGeometry::new(w, h))
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Clamping
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn clamp_stays_in_travel(track in track_strategy(), x in -10_000.0f64..10_000.0) {
        let clamped = track.clamp_handle(x);
        prop_assert!(clamped >= 0.0);
        prop_assert!(clamped <= track.travel());
    }

    #[test]
    fn clamp_is_idempotent(track in track_strategy(), x in -10_000.0f64..10_000.0) {
        let once = track.clamp_handle(x);
        prop_assert_eq!(track.clamp_handle(once), once);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–4. Normalization and travel
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn normalize_in_unit_range(track in track_strategy(), x in -10_000.0f64..10_000.0) {
        let n = track.normalize(x);
        prop_assert!((0.0..=1.0).contains(&n), "normalized {} out of range", n);
    }

    #[test]
    fn normalize_is_monotone(
        track in track_strategy(),
        a in -10_000.0f64..10_000.0,
        b in -10_000.0f64..10_000.0,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(track.normalize(lo) <= track.normalize(hi));
    }

    #[test]
    fn travel_never_negative(w in any::<f64>(), h in any::<f64>()) {
        prop_assert!(TrackGeometry::new(w, h).travel() >= 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Coalescer: latest wins
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn coalescer_keeps_last_scroll(tops in proptest::collection::vec(0.0f64..1e6, 1..64)) {
        let mut coalescer = EventCoalescer::new();
        for &top in &tops {
            prop_assert!(coalescer.push(Event::scroll(top)).is_none());
        }
        prop_assert_eq!(coalescer.pending_scroll_count() as usize, tops.len());
        prop_assert_eq!(coalescer.take_scroll(), tops.last().copied());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Snap guard debounce
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn snap_guard_waits_for_settle(gaps in proptest::collection::vec(0u64..300, 1..16)) {
        let config = WheelSnapConfig::default().with_enabled(true);
        let settle = config.settle;
        let mut guard = WheelSnapGuard::new(config);
        let mut now = Duration::ZERO;
        let mut last_notch = None;
        for gap in gaps {
            now += Duration::from_millis(gap);
            if let Some(SnapCommand::Enable) = guard.poll(now) {
                let last: Duration = last_notch.expect("enable without a prior notch");
                prop_assert!(now >= last + settle);
            }
            guard.on_wheel(&WheelEvent::vertical(100.0), now);
            last_notch = Some(now);
        }
        prop_assert!(guard.is_suspended());
    }
}
