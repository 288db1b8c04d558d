// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Size, Vec2};
use understory_zoom::{AnimationSpec, ConfigError, Geometry, ScaleLimits, TransformState};

use crate::config::GestureConfig;
use crate::interpreter::{DoubleTapScale, GestureInterpreter, Intent, Intents};
use crate::pointer::PointerEvent;

/// One zoomable viewport: a [`TransformState`] driven by a [`GestureInterpreter`].
///
/// The host forwards layout changes and pointer events, calls
/// [`advance`](Self::advance) once per frame while it returns `true`, and
/// renders with [`transform`](Self::transform).
///
/// ```
/// use kurbo::{Point, Size};
/// use understory_gesture::{GestureConfig, PointerEvent, PointerId, ZoomController};
/// use understory_zoom::ScaleLimits;
///
/// let mut viewport = ZoomController::new(ScaleLimits::new(1.0, 4.0).unwrap(), GestureConfig::default());
/// viewport.set_viewport_size(Size::new(200.0, 200.0));
/// viewport.set_content_size(Some(Size::new(400.0, 400.0)));
/// viewport.set_double_tap_scale(Some(Box::new(|s| if s > 1.0 { 1.0 } else { 2.5 })));
///
/// let p = Point::new(100.0, 100.0);
/// for (t, e) in [(0, 0), (60, 1), (160, 0), (220, 1)] {
///     let event = if e == 0 {
///         PointerEvent::down(PointerId(0), t, p)
///     } else {
///         PointerEvent::up(PointerId(0), t, p)
///     };
///     viewport.handle_pointer(&event);
/// }
/// while viewport.advance(1.0 / 60.0) {}
/// assert!((viewport.state().scale() - 2.5).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct ZoomController {
    state: TransformState,
    interpreter: GestureInterpreter,
    geometry: Geometry,
    scale_animation: AnimationSpec,
}

impl ZoomController {
    /// Creates a controller at minimum scale with unknown geometry.
    #[must_use]
    pub fn new(limits: ScaleLimits, config: GestureConfig) -> Self {
        Self::with_state(TransformState::new(limits), config)
    }

    /// Creates a controller with explicit initial values.
    ///
    /// # Errors
    ///
    /// Propagates the [`ConfigError`] from [`TransformState::with_initial`].
    pub fn with_initial(
        min_scale: f64,
        max_scale: f64,
        initial_scale: f64,
        config: GestureConfig,
    ) -> Result<Self, ConfigError> {
        let state = TransformState::with_initial(min_scale, max_scale, initial_scale, Vec2::ZERO)?;
        Ok(Self::with_state(state, config))
    }

    /// Wraps an existing transform, for example one restored from a snapshot.
    #[must_use]
    pub fn with_state(state: TransformState, config: GestureConfig) -> Self {
        Self {
            state,
            interpreter: GestureInterpreter::new(config),
            geometry: Geometry::new(Size::ZERO),
            scale_animation: AnimationSpec::default(),
        }
    }

    /// The transform.
    #[must_use]
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    /// Mutable access to the transform, for programmatic changes.
    pub fn state_mut(&mut self) -> &mut TransformState {
        &mut self.state
    }

    /// The gesture interpreter.
    #[must_use]
    pub fn interpreter(&self) -> &GestureInterpreter {
        &self.interpreter
    }

    /// Mutable access to the gesture interpreter.
    pub fn interpreter_mut(&mut self) -> &mut GestureInterpreter {
        &mut self.interpreter
    }

    /// Sets or clears the double-tap target-scale function.
    pub fn set_double_tap_scale(&mut self, f: Option<DoubleTapScale>) {
        self.interpreter.set_double_tap_scale(f);
    }

    /// Curve used for [`Intent::AnimateToScale`].
    pub fn set_scale_animation(&mut self, spec: AnimationSpec) {
        self.scale_animation = spec;
    }

    /// Last known geometry.
    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Records a new viewport size from layout.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        self.geometry.viewport = viewport;
        self.state.update_geometry(&self.geometry);
    }

    /// Records the content's intrinsic size once known (or `None` while unknown).
    pub fn set_content_size(&mut self, intrinsic: Option<Size>) {
        self.geometry.content_intrinsic = intrinsic;
        self.state.update_geometry(&self.geometry);
    }

    /// Interprets a pointer event and applies the resulting intents.
    ///
    /// The intents are also returned for hosts that want to observe them.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Intents {
        let was_active = self.interpreter.is_active();
        let intents = self.interpreter.handle(event, &self.state);
        let is_active = self.interpreter.is_active();
        if !was_active && is_active && self.state.is_flinging() {
            log::debug!("new gesture stops fling");
            self.state.stop_fling();
        }
        for intent in &intents {
            self.apply(*intent);
        }
        if was_active && !is_active {
            self.state.clamp_translation();
        }
        intents
    }

    /// Applies one intent to the transform.
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::ZoomBy { factor, focal } => {
                let center = self.viewport_center();
                self.state.zoom_by_about(factor, focal - center);
            }
            Intent::PanBy(delta) => self.state.drag(delta),
            Intent::FlingWith(velocity) => {
                self.state.fling(velocity);
            }
            Intent::SnapToScale(scale) => self.state.snap_scale(scale),
            Intent::AnimateToScale(scale) => {
                self.state.animate_scale(scale, self.scale_animation);
            }
        }
    }

    /// Advances animations by `dt` seconds; `true` while anything is moving.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.state.advance(dt)
    }

    /// Render transform for the content, laid out centered in the viewport.
    #[must_use]
    pub fn transform(&self) -> Affine {
        self.state.render_transform(self.viewport_center())
    }

    fn viewport_center(&self) -> Point {
        Point::new(
            self.geometry.viewport.width / 2.0,
            self.geometry.viewport.height / 2.0,
        )
    }
}
