// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};

use crate::animation::{AnimatedScalar, AnimationSpec, AnimationStatus, DecaySpec};
use crate::geometry::{Geometry, translation_bounds};
use crate::limits::{ConfigError, ScaleLimits};
use crate::snapshot::TransformSnapshot;

/// Which of the three animatable scalars an animation runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationChannel {
    /// The uniform scale.
    Scale,
    /// Horizontal translation.
    TranslateX,
    /// Vertical translation.
    TranslateY,
}

/// Handle to one animation started on a [`TransformState`].
///
/// Pass it to [`TransformState::animation_status`] to learn whether it is still
/// running, how it ended, or whether a later operation superseded it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId {
    /// Scalar the animation runs on.
    pub channel: AnimationChannel,
    /// Generation of that scalar when the animation started.
    pub generation: u64,
}

/// The two independent axis decays started by [`TransformState::fling`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FlingHandle {
    /// Horizontal decay.
    pub x: AnimationId,
    /// Vertical decay.
    pub y: AnimationId,
}

/// Bounded scale-and-translation state for one zoomable viewport.
///
/// `TransformState` owns three animatable scalars (scale, translate x,
/// translate y) and keeps them inside their limits:
/// - Scale always lies in the configured [`ScaleLimits`].
/// - Translation is measured from the viewport center to the content center and
///   is kept within `±bound` per axis, where
///   `bound = max(0, fitted_content * scale - viewport) / 2`.
///
/// Bounds are recomputed on every scale change and geometry update. Drags are
/// applied unclamped; the next bounds refresh (or [`TransformState::clamp_translation`]
/// at gesture end) pulls translation back in.
///
/// Until the content geometry is known, gesture-driven updates
/// ([`zoom_by`](Self::zoom_by), [`zoom_by_about`](Self::zoom_by_about),
/// [`drag`](Self::drag), [`fling`](Self::fling)) are no-ops.
///
/// Animations advance only when the host calls [`TransformState::advance`].
///
/// ```rust
/// use kurbo::{Size, Vec2};
/// use understory_zoom::{ScaleLimits, TransformState};
///
/// let mut state = TransformState::new(ScaleLimits::new(1.0, 5.0).unwrap());
/// state.update_bounds(Size::new(100.0, 200.0), Size::new(100.0, 400.0));
///
/// state.zoom_by(2.0);
/// assert_eq!(state.scale(), 2.0);
/// assert_eq!(state.bounds(), Some(Vec2::new(50.0, 300.0)));
///
/// state.drag(Vec2::new(-500.0, 20.0));
/// state.clamp_translation();
/// assert_eq!(state.translate(), Vec2::new(-50.0, 20.0));
/// ```
#[derive(Clone, Debug)]
pub struct TransformState {
    limits: ScaleLimits,
    scale: AnimatedScalar,
    translate_x: AnimatedScalar,
    translate_y: AnimatedScalar,
    viewport: Size,
    content_fitted: Option<Size>,
    bounds: Option<Vec2>,
    decay: DecaySpec,
}

impl TransformState {
    /// Creates a state at minimum scale with zero translation.
    #[must_use]
    pub fn new(limits: ScaleLimits) -> Self {
        let mut scale = AnimatedScalar::new(limits.min());
        scale.set_bounds(limits.min(), limits.max());
        Self {
            limits,
            scale,
            translate_x: AnimatedScalar::new(0.0),
            translate_y: AnimatedScalar::new(0.0),
            viewport: Size::ZERO,
            content_fitted: None,
            bounds: None,
            decay: DecaySpec::DEFAULT,
        }
    }

    /// Creates a state with explicit limits and initial values.
    ///
    /// The initial scale is clamped into `[min_scale, max_scale]`. The initial
    /// translation is kept as given until bounds are known.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the scale range is invalid; see
    /// [`ScaleLimits::new`].
    pub fn with_initial(
        min_scale: f64,
        max_scale: f64,
        initial_scale: f64,
        initial_translate: Vec2,
    ) -> Result<Self, ConfigError> {
        let limits = ScaleLimits::new(min_scale, max_scale)?;
        Ok(Self::restore(
            limits,
            TransformSnapshot {
                scale: initial_scale,
                translate_x: initial_translate.x,
                translate_y: initial_translate.y,
            },
        ))
    }

    /// Recreates a state from a persisted snapshot.
    ///
    /// Values are taken verbatim, except that a scale outside `limits` is
    /// clamped and non-finite translation is reset to zero.
    #[must_use]
    pub fn restore(limits: ScaleLimits, snapshot: TransformSnapshot) -> Self {
        let mut state = Self::new(limits);
        state.scale.snap_to(limits.clamp(snapshot.scale));
        state.translate_x.snap_to(finite_or_zero(snapshot.translate_x));
        state.translate_y.snap_to(finite_or_zero(snapshot.translate_y));
        state
    }

    /// Captures the current scale and translation for persistence.
    #[must_use]
    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot {
            scale: self.scale(),
            translate_x: self.translate_x(),
            translate_y: self.translate_y(),
        }
    }

    /// Returns the configured scale range.
    #[must_use]
    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Smallest admissible scale.
    #[must_use]
    pub fn min_scale(&self) -> f64 {
        self.limits.min()
    }

    /// Largest admissible scale.
    #[must_use]
    pub fn max_scale(&self) -> f64 {
        self.limits.max()
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale.value()
    }

    /// Current horizontal translation.
    #[must_use]
    pub fn translate_x(&self) -> f64 {
        self.translate_x.value()
    }

    /// Current vertical translation.
    #[must_use]
    pub fn translate_y(&self) -> f64 {
        self.translate_y.value()
    }

    /// Current translation as a vector.
    #[must_use]
    pub fn translate(&self) -> Vec2 {
        Vec2::new(self.translate_x(), self.translate_y())
    }

    /// Returns `true` while the scale is above the minimum.
    ///
    /// Pan and fling input is only honored while zooming.
    #[must_use]
    pub fn zooming(&self) -> bool {
        self.scale() > self.limits.min()
    }

    /// Current translation bounds, or `None` while the content geometry is unknown.
    #[must_use]
    pub fn bounds(&self) -> Option<Vec2> {
        self.bounds
    }

    /// Returns `true` once content geometry is known.
    #[must_use]
    pub fn has_geometry(&self) -> bool {
        self.bounds.is_some()
    }

    /// Returns `true` while any scalar is animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scale.is_running() || self.is_flinging()
    }

    /// Returns `true` while either translation axis is animating.
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        self.translate_x.is_running() || self.translate_y.is_running()
    }

    /// Decay used by [`TransformState::fling`].
    #[must_use]
    pub fn decay_spec(&self) -> DecaySpec {
        self.decay
    }

    /// Replaces the decay used by subsequent flings.
    pub fn set_decay_spec(&mut self, decay: DecaySpec) {
        self.decay = decay;
    }

    /// Instantly sets the scale to `target` clamped into the limits.
    ///
    /// Cancels any in-flight scale animation. Ignored when the clamped target
    /// is not finite, as `f64::INFINITY` is under an unbounded maximum.
    pub fn snap_scale(&mut self, target: f64) {
        let target = self.limits.clamp(target);
        if !target.is_finite() {
            log::trace!("snap_scale({target}) ignored");
            return;
        }
        self.scale.snap_to(target);
        self.refresh_bounds();
    }

    /// Animates the scale toward `target` clamped into the limits.
    ///
    /// Preempts any in-flight scale animation; a later snap, zoom, or animation
    /// preempts this one in turn.
    pub fn animate_scale(&mut self, target: f64, spec: AnimationSpec) -> AnimationId {
        let generation = self.scale.animate_to(self.limits.clamp(target), spec);
        self.refresh_bounds();
        AnimationId {
            channel: AnimationChannel::Scale,
            generation,
        }
    }

    /// Multiplies the scale by `factor`, clamped; translation is only re-clamped.
    ///
    /// Ignored while geometry is unknown or for non-positive/non-finite factors.
    pub fn zoom_by(&mut self, factor: f64) {
        if !self.accepts_gestures() || !is_usable_factor(factor) {
            log::trace!("zoom_by({factor}) ignored");
            return;
        }
        self.snap_scale(self.scale() * factor);
    }

    /// Multiplies the scale by `factor` while keeping `focal` visually stationary.
    ///
    /// `focal` is measured from the viewport center, in the same space as the
    /// translation. Per axis, `translate' = focal - (focal - translate) * (scale' / scale)`,
    /// then clamped into the new bounds. Cancels any fling.
    pub fn zoom_by_about(&mut self, factor: f64, focal: Vec2) {
        if !self.accepts_gestures() || !is_usable_factor(factor) || !focal.is_finite() {
            log::trace!("zoom_by_about({factor}) ignored");
            return;
        }
        let old = self.scale();
        let new = self.limits.clamp(old * factor);
        if !new.is_finite() {
            log::trace!("zoom_by_about({factor}) overflowed the scale");
            return;
        }
        self.scale.snap_to(new);
        if old > 0.0 {
            let ratio = new / old;
            let t = self.translate();
            let next = focal - (focal - t) * ratio;
            self.translate_x.snap_to(next.x);
            self.translate_y.snap_to(next.y);
        }
        self.refresh_bounds();
    }

    /// Records new viewport and fitted content sizes and re-clamps translation.
    ///
    /// An axis left outside its new bound is snapped to the bound, cancelling
    /// its animation.
    pub fn update_bounds(&mut self, viewport: Size, content_fitted: Size) {
        self.viewport = viewport;
        self.content_fitted = Some(content_fitted);
        self.refresh_bounds();
    }

    /// Applies a [`Geometry`] snapshot.
    ///
    /// Unknown content puts the state back into the unknown-geometry state,
    /// where gesture updates are ignored and any fling is stopped.
    pub fn update_geometry(&mut self, geometry: &Geometry) {
        match geometry.fitted_size() {
            Some(fitted) => self.update_bounds(geometry.viewport, fitted),
            None => {
                self.stop_fling();
                self.viewport = geometry.viewport;
                self.content_fitted = None;
                self.bounds = None;
            }
        }
    }

    /// Adds `delta` to the translation without clamping.
    ///
    /// Callers gate this on [`TransformState::zooming`]. Cancels any fling.
    pub fn drag(&mut self, delta: Vec2) {
        if !self.accepts_gestures() || !delta.is_finite() {
            log::trace!("drag({delta:?}) ignored");
            return;
        }
        self.translate_x.snap_to(self.translate_x() + delta.x);
        self.translate_y.snap_to(self.translate_y() + delta.y);
    }

    /// Starts a momentum decay on both translation axes.
    ///
    /// Each axis is seeded with half of its release velocity and decays
    /// independently until it settles or hits its bound. Translation is clamped
    /// first. Returns `None` while geometry is unknown.
    pub fn fling(&mut self, velocity: Vec2) -> Option<FlingHandle> {
        if !self.accepts_gestures() {
            log::trace!("fling({velocity:?}) ignored");
            return None;
        }
        self.clamp_translation();
        let x = self.translate_x.animate_decay(velocity.x / 2.0, self.decay);
        let y = self.translate_y.animate_decay(velocity.y / 2.0, self.decay);
        log::debug!("fling started with velocity {velocity:?}");
        Some(FlingHandle {
            x: AnimationId {
                channel: AnimationChannel::TranslateX,
                generation: x,
            },
            y: AnimationId {
                channel: AnimationChannel::TranslateY,
                generation: y,
            },
        })
    }

    /// Pulls translation back inside the current bounds.
    pub fn clamp_translation(&mut self) {
        self.refresh_bounds();
    }

    /// Cancels both fling axes, leaving translation where it is.
    pub fn stop_fling(&mut self) {
        if self.translate_x.is_running() {
            self.translate_x.stop();
        }
        if self.translate_y.is_running() {
            self.translate_y.stop();
        }
    }

    /// Cancels every running animation.
    pub fn stop_animations(&mut self) {
        if self.scale.is_running() {
            self.scale.stop();
        }
        self.stop_fling();
    }

    /// Advances running animations by `dt` seconds.
    ///
    /// Returns `true` while anything is still animating.
    pub fn advance(&mut self, dt: f64) -> bool {
        if self.scale.is_running() {
            self.scale.step(dt);
            self.refresh_bounds();
        }
        let was_flinging = self.is_flinging();
        let x = self.translate_x.step(dt);
        let y = self.translate_y.step(dt);
        if was_flinging && !x && !y {
            log::debug!("fling settled at {:?}", self.translate());
        }
        if !x && !y && !self.scale.is_running() {
            return false;
        }
        true
    }

    /// Reports the state of an animation started on this transform.
    #[must_use]
    pub fn animation_status(&self, id: AnimationId) -> AnimationStatus {
        let scalar = match id.channel {
            AnimationChannel::Scale => &self.scale,
            AnimationChannel::TranslateX => &self.translate_x,
            AnimationChannel::TranslateY => &self.translate_y,
        };
        scalar.status(id.generation)
    }

    /// Transform for content laid out centered on `center`.
    ///
    /// Scales about `center`, then offsets by the translation.
    #[must_use]
    pub fn render_transform(&self, center: Point) -> Affine {
        let c = center.to_vec2();
        Affine::translate(c + self.translate()) * Affine::scale(self.scale()) * Affine::translate(-c)
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> TransformDebugInfo {
        TransformDebugInfo {
            scale: self.scale(),
            translate: self.translate(),
            bounds: self.bounds,
            viewport: self.viewport,
            content_fitted: self.content_fitted,
            limits: self.limits,
            scale_animating: self.scale.is_running(),
            flinging: self.is_flinging(),
        }
    }

    fn accepts_gestures(&self) -> bool {
        self.bounds.is_some()
    }

    fn refresh_bounds(&mut self) {
        let Some(content) = self.content_fitted else {
            self.bounds = None;
            return;
        };
        let bounds = translation_bounds(self.viewport, content, self.scale());
        self.bounds = Some(bounds);
        clamp_axis(&mut self.translate_x, bounds.x);
        clamp_axis(&mut self.translate_y, bounds.y);
    }
}

/// Debug snapshot of a [`TransformState`].
#[derive(Clone, Copy, Debug)]
pub struct TransformDebugInfo {
    /// Current scale.
    pub scale: f64,
    /// Current translation.
    pub translate: Vec2,
    /// Current translation bounds, if geometry is known.
    pub bounds: Option<Vec2>,
    /// Last known viewport size.
    pub viewport: Size,
    /// Last known fitted content size.
    pub content_fitted: Option<Size>,
    /// Configured scale range.
    pub limits: ScaleLimits,
    /// Whether a scale animation is running.
    pub scale_animating: bool,
    /// Whether either translation axis is decaying.
    pub flinging: bool,
}

fn clamp_axis(axis: &mut AnimatedScalar, bound: f64) {
    axis.set_bounds(-bound, bound);
    let value = axis.value();
    if value.is_nan() {
        axis.snap_to(0.0);
    } else if value.abs() > bound {
        axis.snap_to(value.clamp(-bound, bound));
    }
}

fn is_usable_factor(factor: f64) -> bool {
    factor.is_finite() && factor > 0.0
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{AnimationChannel, TransformState};
    use crate::{AnimationSpec, AnimationStatus, Geometry, ScaleLimits};

    const FRAME: f64 = 1.0 / 60.0;

    fn state(min: f64, max: f64) -> TransformState {
        let mut s = TransformState::new(ScaleLimits::new(min, max).unwrap());
        s.update_bounds(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
        s
    }

    #[test]
    fn starts_at_min_scale_without_geometry() {
        let s = TransformState::new(ScaleLimits::default());
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.translate(), Vec2::ZERO);
        assert!(!s.zooming());
        assert!(!s.has_geometry());
    }

    #[test]
    fn construction_rejects_bad_ranges() {
        assert!(TransformState::with_initial(2.0, 2.0, 2.0, Vec2::ZERO).is_err());
        assert!(TransformState::with_initial(3.0, 1.0, 2.0, Vec2::ZERO).is_err());
        assert!(TransformState::with_initial(-1.0, 1.0, 0.0, Vec2::ZERO).is_err());
    }

    #[test]
    fn initial_scale_is_clamped() {
        let s = TransformState::with_initial(1.0, 4.0, 10.0, Vec2::new(3.0, 4.0)).unwrap();
        assert_eq!(s.scale(), 4.0);
        assert_eq!(s.translate(), Vec2::new(3.0, 4.0));
    }

    #[test]
    fn snap_scale_clamps_exactly() {
        let mut s = state(1.0, 5.0);
        for (target, expected) in [(3.0, 3.0), (0.2, 1.0), (9.0, 5.0), (f64::INFINITY, 5.0)] {
            s.snap_scale(target);
            assert_eq!(s.scale(), expected);
            assert!(!s.is_animating());
        }
    }

    #[test]
    fn zoom_is_idempotent_at_bound() {
        let mut s = state(1.0, 5.0);
        s.zoom_by(3.0);
        assert_eq!(s.scale(), 3.0);
        s.zoom_by(3.0);
        assert_eq!(s.scale(), 5.0);
        s.zoom_by(1.5);
        assert_eq!(s.scale(), 5.0);
    }

    #[test]
    fn gestures_are_ignored_until_geometry_is_known() {
        let mut s = TransformState::new(ScaleLimits::new(1.0, 5.0).unwrap());
        s.zoom_by(2.0);
        s.drag(Vec2::new(10.0, 10.0));
        assert!(s.fling(Vec2::new(1000.0, 0.0)).is_none());
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.translate(), Vec2::ZERO);

        // Programmatic scale changes still apply.
        s.snap_scale(2.0);
        assert_eq!(s.scale(), 2.0);
    }

    #[test]
    fn unknown_content_suspends_gestures_again() {
        let mut s = state(1.0, 5.0);
        s.update_geometry(&Geometry::new(Size::new(100.0, 100.0)));
        assert!(!s.has_geometry());
        s.zoom_by(2.0);
        assert_eq!(s.scale(), 1.0);
    }

    #[test]
    fn zooming_out_recenters() {
        let mut s = state(1.0, 4.0);
        s.snap_scale(3.0);
        s.drag(Vec2::new(80.0, -80.0));
        s.clamp_translation();
        assert_eq!(s.translate(), Vec2::new(80.0, -80.0));
        s.snap_scale(2.0);
        assert_eq!(s.translate(), Vec2::new(50.0, -50.0));
        s.snap_scale(1.0);
        assert_eq!(s.translate(), Vec2::ZERO);
    }

    #[test]
    fn anchored_zoom_keeps_focal_point_fixed() {
        let mut s = state(1.0, 10.0);
        s.snap_scale(2.0);
        let focal = Vec2::new(20.0, -10.0);
        // Content point under the focal before zooming.
        let before = (focal - s.translate()) / s.scale();
        s.zoom_by_about(1.5, focal);
        let after = (focal - s.translate()) / s.scale();
        assert!((before - after).hypot() < 1e-9);
    }

    #[test]
    fn animated_scale_settles_and_reclamps_each_frame() {
        let mut s = state(1.0, 4.0);
        s.snap_scale(4.0);
        s.drag(Vec2::new(150.0, 0.0));
        s.clamp_translation();
        let id = s.animate_scale(1.0, AnimationSpec::default());
        assert_eq!(id.channel, AnimationChannel::Scale);
        while s.advance(FRAME) {
            let b = s.bounds().unwrap();
            assert!(s.translate_x().abs() <= b.x);
        }
        assert_eq!(s.scale(), 1.0);
        assert_eq!(s.translate_x(), 0.0);
        assert_eq!(s.animation_status(id), AnimationStatus::Settled);
    }

    #[test]
    fn snap_preempts_scale_animation() {
        let mut s = state(1.0, 4.0);
        let id = s.animate_scale(4.0, AnimationSpec::default());
        s.advance(FRAME);
        s.snap_scale(2.0);
        assert_eq!(s.animation_status(id), AnimationStatus::Superseded);
        assert!(!s.advance(FRAME));
        assert_eq!(s.scale(), 2.0);
    }

    #[test]
    fn render_transform_scales_about_center() {
        let mut s = state(1.0, 4.0);
        s.snap_scale(2.0);
        s.drag(Vec2::new(10.0, 0.0));
        let center = Point::new(50.0, 50.0);
        let t = s.render_transform(center);
        assert_eq!(t * center, Point::new(60.0, 50.0));
        assert_eq!(t * Point::new(0.0, 0.0), Point::new(-40.0, -50.0));
    }

    #[test]
    fn snapshot_restores_verbatim() {
        let mut s = state(1.0, 4.0);
        s.snap_scale(3.0);
        s.drag(Vec2::new(12.5, -7.25));
        let snap = s.snapshot();
        let restored = TransformState::restore(s.limits(), snap);
        assert_eq!(restored.snapshot(), snap);
        assert_eq!(restored.debug_info().limits, s.limits());
    }
}
