// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tap and double-tap recognition from completed presses.

use kurbo::Point;

use crate::config::GestureConfig;

/// What a completed press amounted to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TapOutcome {
    /// Held too long to count as a tap.
    None,
    /// A single tap; it may become the first half of a double tap.
    Tap,
    /// The second tap of a double tap, at the given position.
    DoubleTap(Point),
}

#[derive(Clone, Copy, Debug)]
struct PendingTap {
    down_pos: Point,
    up_time_ms: u64,
}

/// Pairs taps into double taps using the timing and distance windows of a
/// [`GestureConfig`].
///
/// Feed it only presses that never crossed the touch slop.
#[derive(Clone, Debug, Default)]
pub struct DoubleTapDetector {
    pending: Option<PendingTap>,
}

impl DoubleTapDetector {
    /// Creates a detector with no pending tap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a press that went down at `down_time_ms`/`down_pos` and was
    /// released at `up_time_ms`.
    pub fn on_tap(
        &mut self,
        down_time_ms: u64,
        down_pos: Point,
        up_time_ms: u64,
        config: &GestureConfig,
    ) -> TapOutcome {
        if up_time_ms.saturating_sub(down_time_ms) > config.tap_timeout_ms {
            self.pending = None;
            return TapOutcome::None;
        }
        if let Some(first) = self.pending.take() {
            let gap = down_time_ms.saturating_sub(first.up_time_ms);
            let in_window = down_time_ms >= first.up_time_ms
                && gap >= config.double_tap_min_time_ms
                && gap <= config.double_tap_timeout_ms;
            if in_window && first.down_pos.distance(down_pos) <= config.double_tap_slop {
                return TapOutcome::DoubleTap(down_pos);
            }
        }
        self.pending = Some(PendingTap {
            down_pos,
            up_time_ms,
        });
        TapOutcome::Tap
    }

    /// Returns `true` while a first tap is waiting for its partner.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Drops any pending first tap.
    pub fn reset(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::{DoubleTapDetector, TapOutcome};
    use crate::config::GestureConfig;

    const CONFIG: GestureConfig = GestureConfig::DEFAULT;

    #[test]
    fn two_quick_taps_make_a_double_tap() {
        let mut taps = DoubleTapDetector::new();
        let p = Point::new(50.0, 50.0);
        assert_eq!(taps.on_tap(0, p, 60, &CONFIG), TapOutcome::Tap);
        assert_eq!(
            taps.on_tap(160, Point::new(55.0, 48.0), 220, &CONFIG),
            TapOutcome::DoubleTap(Point::new(55.0, 48.0))
        );
        assert!(!taps.has_pending());
    }

    #[test]
    fn third_tap_starts_over() {
        let mut taps = DoubleTapDetector::new();
        let p = Point::new(0.0, 0.0);
        taps.on_tap(0, p, 50, &CONFIG);
        taps.on_tap(150, p, 200, &CONFIG);
        assert_eq!(taps.on_tap(300, p, 350, &CONFIG), TapOutcome::Tap);
    }

    #[test]
    fn slow_second_tap_is_a_new_first_tap() {
        let mut taps = DoubleTapDetector::new();
        let p = Point::new(0.0, 0.0);
        taps.on_tap(0, p, 50, &CONFIG);
        assert_eq!(taps.on_tap(400, p, 450, &CONFIG), TapOutcome::Tap);
        assert_eq!(
            taps.on_tap(550, p, 600, &CONFIG),
            TapOutcome::DoubleTap(p)
        );
    }

    #[test]
    fn bounce_and_distance_are_rejected() {
        let mut taps = DoubleTapDetector::new();
        taps.on_tap(0, Point::new(0.0, 0.0), 50, &CONFIG);
        // Second down only 10 ms after the first up.
        assert_eq!(
            taps.on_tap(60, Point::new(0.0, 0.0), 90, &CONFIG),
            TapOutcome::Tap
        );
        // Far from the previous tap.
        assert_eq!(
            taps.on_tap(200, Point::new(300.0, 0.0), 250, &CONFIG),
            TapOutcome::Tap
        );
    }

    #[test]
    fn long_press_is_not_a_tap() {
        let mut taps = DoubleTapDetector::new();
        let p = Point::new(0.0, 0.0);
        taps.on_tap(0, p, 50, &CONFIG);
        assert_eq!(taps.on_tap(150, p, 900, &CONFIG), TapOutcome::None);
        assert!(!taps.has_pending());
    }

    #[test]
    fn reset_forgets_first_tap() {
        let mut taps = DoubleTapDetector::new();
        let p = Point::new(0.0, 0.0);
        taps.on_tap(0, p, 50, &CONFIG);
        taps.reset();
        assert_eq!(taps.on_tap(150, p, 200, &CONFIG), TapOutcome::Tap);
    }
}
