// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture thresholds and the gesture-to-intent binding policy.

/// How a recognized double tap is turned into an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoubleTapAction {
    /// Emit [`Intent::AnimateToScale`](crate::Intent::AnimateToScale).
    Animate,
    /// Emit [`Intent::SnapToScale`](crate::Intent::SnapToScale).
    Snap,
}

/// Which gestures are wired to which intents.
///
/// Both presets drive the same [`TransformState`](understory_zoom::TransformState);
/// they differ only in what input is allowed to move it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureBindings {
    /// Pinch span changes produce `ZoomBy`.
    pub pinch_zoom: bool,
    /// Pinch centroid movement produces `PanBy` (only while zooming).
    pub pinch_pan: bool,
    /// Single-pointer drags produce `PanBy` (only while zooming).
    pub drag_pan: bool,
    /// Releasing a drag produces `FlingWith` (only while zooming).
    pub fling: bool,
    /// How double taps are reported; `None` disables them.
    pub double_tap: Option<DoubleTapAction>,
}

impl GestureBindings {
    /// Free two-finger zoom and pan, one-finger pan, fling, animated double tap.
    pub const FREE: Self = Self {
        pinch_zoom: true,
        pinch_pan: true,
        drag_pan: true,
        fling: true,
        double_tap: Some(DoubleTapAction::Animate),
    };

    /// Only double tap, which toggles the scale instantly.
    pub const DOUBLE_TAP_ONLY: Self = Self {
        pinch_zoom: false,
        pinch_pan: false,
        drag_pan: false,
        fling: false,
        double_tap: Some(DoubleTapAction::Snap),
    };
}

impl Default for GestureBindings {
    fn default() -> Self {
        Self::FREE
    }
}

/// Thresholds used by [`GestureInterpreter`](crate::GestureInterpreter).
///
/// Distances are in logical pixels, times in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureConfig {
    /// Master switch. When `false` no intents are produced.
    pub enabled: bool,
    /// Distance a pointer must travel before a drag starts.
    pub touch_slop: f64,
    /// Longest gap between the first up and the second down of a double tap.
    pub double_tap_timeout_ms: u64,
    /// Shortest such gap; anything quicker is treated as bounce.
    pub double_tap_min_time_ms: u64,
    /// Largest distance between the two downs of a double tap.
    pub double_tap_slop: f64,
    /// A press held longer than this is not a tap.
    pub tap_timeout_ms: u64,
    /// Release velocities are capped to this magnitude, in px/s.
    pub max_fling_velocity: f64,
    /// Gesture-to-intent policy.
    pub bindings: GestureBindings,
}

impl GestureConfig {
    /// Default thresholds with every gesture bound.
    pub const DEFAULT: Self = Self {
        enabled: true,
        touch_slop: 8.0,
        double_tap_timeout_ms: 300,
        double_tap_min_time_ms: 40,
        double_tap_slop: 100.0,
        tap_timeout_ms: 400,
        max_fling_velocity: 8000.0,
        bindings: GestureBindings::FREE,
    };

    /// Returns a copy with different bindings.
    #[must_use]
    pub const fn with_bindings(mut self, bindings: GestureBindings) -> Self {
        self.bindings = bindings;
        self
    }

    /// Returns a copy with the master switch set.
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
