// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw pointer samples as delivered by the host.

use kurbo::Point;

/// Identifies one pointer (finger, pen, mouse) for the lifetime of its contact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u64);

/// What happened to a pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    /// Contact started.
    Down,
    /// Contact moved.
    Move,
    /// Contact ended normally.
    Up,
    /// The toolkit cancelled the gesture (for example, a parent took over).
    Cancel,
}

/// One pointer sample.
///
/// Positions are in viewport coordinates (origin at the viewport's top-left,
/// device-independent units). Timestamps are monotonic milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Which pointer this sample belongs to.
    pub pointer: PointerId,
    /// What happened.
    pub phase: PointerPhase,
    /// When it happened, in milliseconds.
    pub time_ms: u64,
    /// Where it happened.
    pub position: Point,
}

impl PointerEvent {
    /// A pointer-down sample.
    #[must_use]
    pub fn down(pointer: PointerId, time_ms: u64, position: Point) -> Self {
        Self {
            pointer,
            phase: PointerPhase::Down,
            time_ms,
            position,
        }
    }

    /// A pointer-move sample.
    #[must_use]
    pub fn moved(pointer: PointerId, time_ms: u64, position: Point) -> Self {
        Self {
            pointer,
            phase: PointerPhase::Move,
            time_ms,
            position,
        }
    }

    /// A pointer-up sample.
    #[must_use]
    pub fn up(pointer: PointerId, time_ms: u64, position: Point) -> Self {
        Self {
            pointer,
            phase: PointerPhase::Up,
            time_ms,
            position,
        }
    }

    /// A cancellation sample.
    #[must_use]
    pub fn cancel(pointer: PointerId, time_ms: u64, position: Point) -> Self {
        Self {
            pointer,
            phase: PointerPhase::Cancel,
            time_ms,
            position,
        }
    }
}
