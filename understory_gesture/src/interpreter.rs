// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::fmt;

use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use understory_zoom::TransformState;

use crate::config::{DoubleTapAction, GestureConfig};
use crate::drag::{DragState, DragUpdate};
use crate::pinch::PinchTracker;
use crate::pointer::{PointerEvent, PointerId, PointerPhase};
use crate::tap::{DoubleTapDetector, TapOutcome};
use crate::velocity::VelocityTracker;

/// Where the current (or most recent) pointer session is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GesturePhase {
    /// No pointer has gone down yet.
    #[default]
    Idle,
    /// One pointer is down and has not moved past the touch slop.
    AwaitingSlop,
    /// The slop was exceeded, or a pinch took place.
    Dragging,
    /// The last pointer lifted after a drag.
    Ended,
    /// The session ended without a drag, or was cancelled by the toolkit.
    Cancelled,
}

/// A discrete request for the transform, produced from pointer input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    /// Multiply the scale by `factor`, keeping `focal` (viewport coordinates)
    /// visually fixed.
    ZoomBy {
        /// Incremental scale factor.
        factor: f64,
        /// Pinch centroid in viewport coordinates.
        focal: Point,
    },
    /// Move the content by this delta.
    PanBy(Vec2),
    /// Start momentum with this release velocity, in units per second.
    FlingWith(Vec2),
    /// Jump to this scale.
    SnapToScale(f64),
    /// Animate to this scale.
    AnimateToScale(f64),
}

/// Intents produced by one pointer event.
pub type Intents = SmallVec<[Intent; 2]>;

/// Target-scale function for double taps; receives the current scale.
pub type DoubleTapScale = Box<dyn Fn(f64) -> f64>;

#[derive(Clone, Debug)]
struct GestureSession {
    primary: PointerId,
    down_time_ms: u64,
    down_pos: Point,
    drag: DragState,
    velocity: VelocityTracker,
    pinch: PinchTracker,
    pinched: bool,
    pan_total: Vec2,
    zoom_total: f64,
}

impl GestureSession {
    fn start(event: &PointerEvent, slop: f64) -> Self {
        let mut drag = DragState::new(slop);
        drag.start(event.position);
        let mut velocity = VelocityTracker::new();
        velocity.add_position(event.time_ms, event.position);
        let mut pinch = PinchTracker::new();
        pinch.pointer_down(event.pointer, event.position);
        Self {
            primary: event.pointer,
            down_time_ms: event.time_ms,
            down_pos: event.position,
            drag,
            velocity,
            pinch,
            pinched: false,
            pan_total: Vec2::ZERO,
            zoom_total: 1.0,
        }
    }
}

/// Turns a stream of pointer events into [`Intent`]s.
///
/// The interpreter runs one pointer session at a time: the first pointer down
/// opens it, the last pointer up (or a cancel) closes it. Single-pointer
/// movement is held back until it exceeds the touch slop and then reported as
/// pans; two or more pointers are reported as incremental zooms about their
/// centroid plus centroid pans. Releasing a drag reports a fling. Pans and
/// flings are suppressed while the [`TransformState`] is at its minimum scale.
///
/// Events that make no sense for the current session (moves with nothing
/// down, ups for unknown pointers, non-finite positions) are ignored.
///
/// The interpreter only reads the transform. Apply the returned intents
/// yourself, or use [`ZoomController`](crate::ZoomController).
pub struct GestureInterpreter {
    config: GestureConfig,
    double_tap_scale: Option<DoubleTapScale>,
    taps: DoubleTapDetector,
    session: Option<GestureSession>,
    phase: GesturePhase,
}

impl fmt::Debug for GestureInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureInterpreter")
            .field("config", &self.config)
            .field("double_tap_scale", &self.double_tap_scale.is_some())
            .field("phase", &self.phase)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(GestureConfig::DEFAULT)
    }
}

impl GestureInterpreter {
    /// Creates an idle interpreter. Double tap stays off until
    /// [`set_double_tap_scale`](Self::set_double_tap_scale) is called.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            double_tap_scale: None,
            taps: DoubleTapDetector::new(),
            session: None,
            phase: GesturePhase::Idle,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Replaces the configuration. A running session keeps its slop radius.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.config = config;
    }

    /// Sets or clears the double-tap target-scale function.
    pub fn set_double_tap_scale(&mut self, f: Option<DoubleTapScale>) {
        self.double_tap_scale = f;
        self.taps.reset();
    }

    /// Phase of the current or most recent session.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Returns `true` while a pointer session is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Returns `true` while two or more pointers are down.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.pinch.is_pinching())
    }

    /// Total pan reported during the open session.
    #[must_use]
    pub fn session_pan(&self) -> Option<Vec2> {
        self.session.as_ref().map(|s| s.pan_total)
    }

    /// Product of zoom factors reported during the open session.
    #[must_use]
    pub fn session_zoom(&self) -> Option<f64> {
        self.session.as_ref().map(|s| s.zoom_total)
    }

    /// Drops any open session as if the toolkit had cancelled it.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            self.phase = GesturePhase::Cancelled;
        }
        self.taps.reset();
    }

    /// Feeds one pointer event and returns the intents it produced.
    ///
    /// `state` is only read, to gate pans and flings on
    /// [`TransformState::zooming`] and to evaluate the double-tap target.
    pub fn handle(&mut self, event: &PointerEvent, state: &TransformState) -> Intents {
        let mut out = Intents::new();
        if !self.config.enabled {
            if self.session.is_some() {
                log::trace!("gestures disabled; dropping session");
                self.cancel();
            }
            return out;
        }
        if event.phase != PointerPhase::Cancel && !event.position.is_finite() {
            log::trace!("ignoring {:?} with non-finite position", event.phase);
            return out;
        }
        match event.phase {
            PointerPhase::Down => self.on_down(event),
            PointerPhase::Move => self.on_move(event, state, &mut out),
            PointerPhase::Up => self.on_up(event, state, &mut out),
            PointerPhase::Cancel => self.on_cancel(event),
        }
        out
    }

    fn on_down(&mut self, event: &PointerEvent) {
        let Some(session) = self.session.as_mut() else {
            self.session = Some(GestureSession::start(event, self.config.touch_slop));
            self.phase = GesturePhase::AwaitingSlop;
            return;
        };
        if session.pinch.contains(event.pointer) {
            log::trace!("ignoring repeated down for {:?}", event.pointer);
            return;
        }
        session.pinch.pointer_down(event.pointer, event.position);
        session.pinched = true;
        session.velocity.reset();
        self.taps.reset();
        self.phase = GesturePhase::Dragging;
    }

    fn on_move(&mut self, event: &PointerEvent, state: &TransformState, out: &mut Intents) {
        let bindings = self.config.bindings;
        let Some(session) = self.session.as_mut() else {
            log::trace!("ignoring move with no session");
            return;
        };
        if !session.pinch.contains(event.pointer) {
            log::trace!("ignoring move for unknown {:?}", event.pointer);
            return;
        }

        if session.pinch.is_pinching() {
            let Some(update) = session.pinch.pointer_move(event.pointer, event.position) else {
                return;
            };
            // Pan first so the zoom pivots on where the centroid is now.
            if update.pan != Vec2::ZERO {
                if bindings.pinch_pan && state.zooming() {
                    session.pan_total += update.pan;
                    out.push(Intent::PanBy(update.pan));
                } else {
                    log::trace!("pinch pan suppressed");
                }
            }
            if bindings.pinch_zoom && update.factor != 1.0 {
                session.zoom_total *= update.factor;
                out.push(Intent::ZoomBy {
                    factor: update.factor,
                    focal: update.centroid,
                });
            }
            return;
        }

        if event.pointer != session.primary {
            log::trace!("ignoring move for non-primary {:?}", event.pointer);
            return;
        }
        session.pinch.pointer_move(event.pointer, event.position);
        session.velocity.add_position(event.time_ms, event.position);
        let delta = match session.drag.update(event.position) {
            None | Some(DragUpdate::BelowSlop) => return,
            Some(DragUpdate::SlopCrossed(over)) => {
                self.phase = GesturePhase::Dragging;
                self.taps.reset();
                over
            }
            Some(DragUpdate::Moved(delta)) => delta,
        };
        if delta == Vec2::ZERO {
            return;
        }
        if bindings.drag_pan && state.zooming() {
            session.pan_total += delta;
            out.push(Intent::PanBy(delta));
        } else {
            log::trace!("drag pan suppressed");
        }
    }

    fn on_up(&mut self, event: &PointerEvent, state: &TransformState, out: &mut Intents) {
        let Some(session) = self.session.as_mut() else {
            log::trace!("ignoring up with no session");
            return;
        };
        if !session.pinch.contains(event.pointer) {
            log::trace!("ignoring up for unknown {:?}", event.pointer);
            return;
        }

        if session.pinch.len() > 1 {
            session.pinch.pointer_up(event.pointer);
            if let Some((id, pos)) = session.pinch.any_pointer()
                && session.pinch.len() == 1
            {
                // Carry on as a drag from wherever the remaining pointer is.
                session.primary = id;
                session.drag.rebase(pos);
                session.velocity.reset();
            }
            return;
        }

        session.velocity.add_position(event.time_ms, event.position);
        let Some(session) = self.session.take() else {
            return;
        };

        match self.phase {
            GesturePhase::Dragging => {
                self.phase = GesturePhase::Ended;
                if self.config.bindings.fling && state.zooming() {
                    let velocity = session
                        .velocity
                        .velocity_clamped(self.config.max_fling_velocity);
                    out.push(Intent::FlingWith(velocity));
                } else {
                    log::trace!("fling suppressed");
                }
            }
            _ => {
                self.phase = GesturePhase::Cancelled;
                if !session.pinched {
                    self.recognize_tap(&session, event.time_ms, state, out);
                }
            }
        }
    }

    fn on_cancel(&mut self, event: &PointerEvent) {
        let tracked = self
            .session
            .as_ref()
            .is_some_and(|s| s.pinch.contains(event.pointer));
        if tracked {
            log::trace!("session cancelled by toolkit");
            self.cancel();
        } else {
            log::trace!("ignoring cancel for unknown {:?}", event.pointer);
        }
    }

    fn recognize_tap(
        &mut self,
        session: &GestureSession,
        up_time_ms: u64,
        state: &TransformState,
        out: &mut Intents,
    ) {
        let (Some(action), Some(target)) =
            (self.config.bindings.double_tap, self.double_tap_scale.as_ref())
        else {
            return;
        };
        let outcome = self
            .taps
            .on_tap(session.down_time_ms, session.down_pos, up_time_ms, &self.config);
        if let TapOutcome::DoubleTap(_) = outcome {
            let scale = target(state.scale());
            log::debug!("double tap -> scale {scale}");
            out.push(match action {
                DoubleTapAction::Animate => Intent::AnimateToScale(scale),
                DoubleTapAction::Snap => Intent::SnapToScale(scale),
            });
        }
    }
}
