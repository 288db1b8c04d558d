// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slop-aware drag tracking: ignore jitter until the pointer has travelled far
//! enough, then report movement deltas.
//!
//! ## Usage
//!
//! 1) Start tracking with [`DragState::start`] at the pointer-down position.
//! 2) On each move, call [`DragState::update`]. While the pointer stays within
//!    the slop radius this returns [`DragUpdate::BelowSlop`]; the first move past
//!    it returns [`DragUpdate::SlopCrossed`] carrying only the distance travelled
//!    beyond the slop, and later moves return [`DragUpdate::Moved`].
//! 3) If the tracked pointer changes (for example after a pinch), call
//!    [`DragState::rebase`] so the next delta starts from the new position.
//! 4) Finish with [`DragState::end`].
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::drag::{DragState, DragUpdate};
//!
//! let mut drag = DragState::new(8.0);
//! drag.start(Point::new(0.0, 0.0));
//!
//! assert_eq!(drag.update(Point::new(3.0, 4.0)), Some(DragUpdate::BelowSlop));
//! assert_eq!(
//!     drag.update(Point::new(0.0, 10.0)),
//!     Some(DragUpdate::SlopCrossed(Vec2::new(0.0, 2.0)))
//! );
//! assert_eq!(
//!     drag.update(Point::new(5.0, 10.0)),
//!     Some(DragUpdate::Moved(Vec2::new(5.0, 0.0)))
//! );
//! ```

use kurbo::{Point, Vec2};

/// Result of feeding a position into a [`DragState`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragUpdate {
    /// Still within the slop radius; nothing to report.
    BelowSlop,
    /// The slop radius was just exceeded; carries the over-slop offset.
    SlopCrossed(Vec2),
    /// Movement since the previous update.
    Moved(Vec2),
}

/// Tracks one pointer's drag, including the touch-slop threshold.
#[derive(Debug, Clone, Copy)]
pub struct DragState {
    slop: f64,
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    past_slop: bool,
}

impl Default for DragState {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl DragState {
    /// Creates an idle tracker with the given slop radius.
    ///
    /// Negative or non-finite radii are treated as zero.
    #[must_use]
    pub fn new(slop: f64) -> Self {
        Self {
            slop: if slop.is_finite() { slop.max(0.0) } else { 0.0 },
            start_pos: None,
            last_pos: None,
            past_slop: false,
        }
    }

    /// Start tracking a new drag from `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.past_slop = false;
    }

    /// Feed a new position.
    ///
    /// Returns `None` while no drag is being tracked.
    pub fn update(&mut self, pos: Point) -> Option<DragUpdate> {
        let start = self.start_pos?;
        let last = self.last_pos.unwrap_or(pos);
        self.last_pos = Some(pos);
        if self.past_slop {
            return Some(DragUpdate::Moved(pos - last));
        }
        let total = pos - start;
        let distance = total.hypot();
        if distance <= self.slop {
            return Some(DragUpdate::BelowSlop);
        }
        self.past_slop = true;
        let over = total * ((distance - self.slop) / distance);
        Some(DragUpdate::SlopCrossed(over))
    }

    /// Continue the drag from `pos` without reporting a jump.
    ///
    /// The drag is considered past slop afterwards.
    pub fn rebase(&mut self, pos: Point) {
        if self.start_pos.is_none() {
            self.start_pos = Some(pos);
        }
        self.last_pos = Some(pos);
        self.past_slop = true;
    }

    /// Offset of `current_pos` from where the drag started.
    #[must_use]
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// End the current drag and reset state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
        self.past_slop = false;
    }

    /// Returns `true` while a drag is being tracked.
    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }

    /// Returns `true` once the slop radius has been exceeded.
    #[must_use]
    pub fn is_past_slop(&self) -> bool {
        self.past_slop
    }
}
