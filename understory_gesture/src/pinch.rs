// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-pointer pinch geometry.
//!
//! [`PinchTracker`] follows every pointer currently down. With two or more of
//! them it reports, per move, the incremental zoom factor (change in the mean
//! distance of the pointers from their centroid) and the incremental pan
//! (change in the centroid itself).
//!
//! Adding or removing a pointer resets the baseline so the change in pointer
//! set never shows up as a jump.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_gesture::{PinchTracker, PointerId};
//!
//! let mut pinch = PinchTracker::new();
//! pinch.pointer_down(PointerId(1), Point::new(40.0, 50.0));
//! pinch.pointer_down(PointerId(2), Point::new(60.0, 50.0));
//! assert!(pinch.is_pinching());
//!
//! // Second finger moves away: the span doubles about a shifted centroid.
//! let update = pinch.pointer_move(PointerId(2), Point::new(80.0, 50.0)).unwrap();
//! assert_eq!(update.factor, 2.0);
//! assert_eq!(update.pan, Vec2::new(10.0, 0.0));
//! assert_eq!(update.centroid, Point::new(60.0, 50.0));
//! ```

use kurbo::{Point, Vec2};
use smallvec::SmallVec;

use crate::pointer::PointerId;

/// Spans at or below this are too small to divide by.
const MIN_SPAN: f64 = 1e-6;

/// Incremental change reported by [`PinchTracker::pointer_move`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchUpdate {
    /// Ratio of the current span to the previous one; `1.0` when the previous
    /// span was degenerate.
    pub factor: f64,
    /// Movement of the centroid since the previous frame.
    pub pan: Vec2,
    /// Current centroid.
    pub centroid: Point,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    centroid: Point,
    span: f64,
}

/// Tracks the positions of all pointers currently down.
#[derive(Clone, Debug, Default)]
pub struct PinchTracker {
    pointers: SmallVec<[(PointerId, Point); 4]>,
    last: Option<Frame>,
}

impl PinchTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new pointer. A pointer that is already down is moved instead.
    pub fn pointer_down(&mut self, id: PointerId, pos: Point) {
        match self.index_of(id) {
            Some(i) => self.pointers[i].1 = pos,
            None => self.pointers.push((id, pos)),
        }
        self.rebaseline();
    }

    /// Moves a tracked pointer.
    ///
    /// Returns an update while pinching; `None` for unknown pointers or when
    /// fewer than two pointers are down.
    pub fn pointer_move(&mut self, id: PointerId, pos: Point) -> Option<PinchUpdate> {
        let i = self.index_of(id)?;
        self.pointers[i].1 = pos;
        let current = self.frame()?;
        let previous = self.last.replace(current)?;
        let factor = if previous.span > MIN_SPAN && current.span > MIN_SPAN {
            current.span / previous.span
        } else {
            1.0
        };
        Some(PinchUpdate {
            factor,
            pan: current.centroid - previous.centroid,
            centroid: current.centroid,
        })
    }

    /// Forgets a pointer. Returns `true` if it was tracked.
    pub fn pointer_up(&mut self, id: PointerId) -> bool {
        let Some(i) = self.index_of(id) else {
            return false;
        };
        self.pointers.remove(i);
        self.rebaseline();
        true
    }

    /// Number of pointers currently down.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    /// Returns `true` when no pointer is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Returns `true` while two or more pointers are down.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.pointers.len() >= 2
    }

    /// Returns `true` if `id` is down.
    #[must_use]
    pub fn contains(&self, id: PointerId) -> bool {
        self.index_of(id).is_some()
    }

    /// Last known position of `id`.
    #[must_use]
    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.index_of(id).map(|i| self.pointers[i].1)
    }

    /// Some pointer that is still down, with its position.
    #[must_use]
    pub fn any_pointer(&self) -> Option<(PointerId, Point)> {
        self.pointers.first().copied()
    }

    /// Forgets every pointer.
    pub fn clear(&mut self) {
        self.pointers.clear();
        self.last = None;
    }

    fn index_of(&self, id: PointerId) -> Option<usize> {
        self.pointers.iter().position(|(p, _)| *p == id)
    }

    fn rebaseline(&mut self) {
        self.last = self.frame();
    }

    fn frame(&self) -> Option<Frame> {
        if self.pointers.len() < 2 {
            return None;
        }
        let n = self.pointers.len() as f64;
        let sum = self
            .pointers
            .iter()
            .fold(Vec2::ZERO, |acc, (_, p)| acc + p.to_vec2());
        let centroid = (sum / n).to_point();
        let span = self
            .pointers
            .iter()
            .map(|(_, p)| p.distance(centroid))
            .sum::<f64>()
            / n;
        Some(Frame { centroid, span })
    }
}
