// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Release-velocity estimation from recent pointer samples.
//!
//! [`VelocityTracker`] keeps a short ring buffer of `(time, position)` samples
//! and reports the average velocity across the ones that are recent enough, so
//! a pointer that wanders and comes back to where it was has no velocity.
//! Samples older than [`VelocityTracker::HORIZON_MS`] relative to the newest
//! sample are ignored, and so is everything before a pause longer than
//! [`VelocityTracker::ASSUME_STOPPED_MS`]: a pointer that stopped before
//! lifting has no velocity.
//!
//! ```
//! use kurbo::Point;
//! use understory_gesture::VelocityTracker;
//!
//! let mut tracker = VelocityTracker::new();
//! for i in 0..5 {
//!     // 2 px per ms to the right.
//!     tracker.add_position(i * 10, Point::new(i as f64 * 20.0, 0.0));
//! }
//! let v = tracker.velocity();
//! assert!((v.x - 2000.0).abs() < 1e-6);
//! assert!(v.y.abs() < 1e-9);
//! ```

use kurbo::{Point, Vec2};

const HISTORY: usize = 20;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    position: Point,
}

/// Estimates pointer velocity in units per second.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY],
    newest: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    /// Samples older than this (relative to the newest) are not used.
    pub const HORIZON_MS: u64 = 100;
    /// A gap between consecutive samples longer than this cuts the history.
    pub const ASSUME_STOPPED_MS: u64 = 40;

    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY],
            newest: 0,
        }
    }

    /// Records a pointer position.
    pub fn add_position(&mut self, time_ms: u64, position: Point) {
        if !position.is_finite() {
            return;
        }
        if self.samples[self.newest].is_some() {
            self.newest = (self.newest + 1) % HISTORY;
        }
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Forgets all samples.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY];
        self.newest = 0;
    }

    /// Average velocity across the usable recent samples: net displacement
    /// divided by elapsed time.
    ///
    /// Zero when fewer than two usable samples exist or they share one timestamp.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        let Some(newest) = self.samples[self.newest] else {
            return Vec2::ZERO;
        };

        let mut oldest = newest;
        let mut previous_time = newest.time_ms;
        for back in 1..HISTORY {
            let index = (self.newest + HISTORY - back) % HISTORY;
            let Some(sample) = self.samples[index] else {
                break;
            };
            let age = newest.time_ms.saturating_sub(sample.time_ms);
            let gap = previous_time.saturating_sub(sample.time_ms);
            if age > Self::HORIZON_MS || gap > Self::ASSUME_STOPPED_MS {
                break;
            }
            oldest = sample;
            previous_time = sample.time_ms;
        }

        let elapsed_ms = newest.time_ms.saturating_sub(oldest.time_ms);
        if elapsed_ms == 0 {
            return Vec2::ZERO;
        }
        (newest.position - oldest.position) * (1000.0 / elapsed_ms as f64)
    }

    /// [`VelocityTracker::velocity`] with its magnitude capped at `max`.
    #[must_use]
    pub fn velocity_clamped(&self, max: f64) -> Vec2 {
        let v = self.velocity();
        if !(max.is_finite() && max >= 0.0) {
            return v;
        }
        let speed = v.hypot();
        if speed > max { v * (max / speed) } else { v }
    }
}
