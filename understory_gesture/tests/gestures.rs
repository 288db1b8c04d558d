// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_gesture` crate.
//!
//! These drive a `ZoomController` with synthetic pointer streams and check the
//! emitted intents and the resulting transform.

use kurbo::{Point, Size, Vec2};
use understory_gesture::{
    GestureBindings, GestureConfig, GesturePhase, Intent, PointerEvent, PointerId, ZoomController,
};
use understory_zoom::ScaleLimits;

const FRAME: f64 = 1.0 / 60.0;
const A: PointerId = PointerId(1);
const B: PointerId = PointerId(2);

/// 300x300 viewport showing a 1200x900 image (fitted to 300x225).
fn viewport(config: GestureConfig) -> ZoomController {
    let mut c = ZoomController::new(ScaleLimits::new(1.0, 8.0).unwrap(), config);
    c.set_viewport_size(Size::new(300.0, 300.0));
    c.set_content_size(Some(Size::new(1200.0, 900.0)));
    c
}

fn tap(c: &mut ZoomController, t: u64, p: Point) -> Vec<Intent> {
    let mut out = c.handle_pointer(&PointerEvent::down(A, t, p)).to_vec();
    out.extend(c.handle_pointer(&PointerEvent::up(A, t + 50, p)));
    out
}

/// Drags pointer `A` right by 20 px every 10 ms, ending at `t = 100`.
fn horizontal_drag(c: &mut ZoomController) -> Vec<Intent> {
    let mut out = c
        .handle_pointer(&PointerEvent::down(A, 0, Point::new(150.0, 150.0)))
        .to_vec();
    for i in 1..=5_u64 {
        let p = Point::new(150.0 + 20.0 * i as f64, 150.0);
        out.extend(c.handle_pointer(&PointerEvent::moved(A, i * 10, p)));
    }
    out
}

#[test]
fn no_pan_or_fling_at_minimum_scale() {
    let mut c = viewport(GestureConfig::default());
    let mut intents = horizontal_drag(&mut c);
    intents.extend(c.handle_pointer(&PointerEvent::up(A, 50, Point::new(250.0, 150.0))));
    assert!(
        intents
            .iter()
            .all(|i| !matches!(i, Intent::PanBy(_) | Intent::FlingWith(_))),
        "pan or fling emitted at min scale: {intents:?}"
    );
    assert_eq!(c.state().translate(), Vec2::ZERO);
    assert!(!c.state().is_animating());
}

#[test]
fn drag_pans_by_over_slop_then_deltas() {
    let mut c = viewport(GestureConfig::default());
    c.state_mut().snap_scale(4.0);
    let intents = horizontal_drag(&mut c);
    assert_eq!(intents.first(), Some(&Intent::PanBy(Vec2::new(12.0, 0.0))));
    assert_eq!(intents.len(), 5);
    assert_eq!(c.state().translate(), Vec2::new(92.0, 0.0));
    assert_eq!(c.interpreter().phase(), GesturePhase::Dragging);
}

#[test]
fn release_flings_with_estimated_velocity() {
    let mut c = viewport(GestureConfig::default());
    c.state_mut().snap_scale(4.0);
    horizontal_drag(&mut c);
    let out = c.handle_pointer(&PointerEvent::up(A, 50, Point::new(250.0, 150.0)));
    let [Intent::FlingWith(v)] = out.as_slice() else {
        panic!("expected a single fling, got {out:?}");
    };
    assert!((v.x - 2000.0).abs() < 1e-6);
    assert!(v.y.abs() < 1e-9);
    assert_eq!(c.interpreter().phase(), GesturePhase::Ended);
    assert!(c.state().is_flinging());

    let mut frames = 0;
    while c.advance(FRAME) {
        frames += 1;
        assert!(frames < 1_000, "fling never settled");
    }
    let b = c.state().bounds().unwrap();
    assert!(c.state().translate_x() > 92.0);
    assert!(c.state().translate_x() <= b.x);
}

#[test]
fn fling_velocity_is_capped() {
    let config = GestureConfig {
        max_fling_velocity: 500.0,
        ..GestureConfig::default()
    };
    let mut c = viewport(config);
    c.state_mut().snap_scale(4.0);
    horizontal_drag(&mut c);
    let out = c.handle_pointer(&PointerEvent::up(A, 50, Point::new(250.0, 150.0)));
    assert!(matches!(out.as_slice(), [Intent::FlingWith(v)] if (v.x - 500.0).abs() < 1e-9));
}

#[test]
fn new_gesture_stops_running_fling() {
    let mut c = viewport(GestureConfig::default());
    c.state_mut().snap_scale(4.0);
    horizontal_drag(&mut c);
    c.handle_pointer(&PointerEvent::up(A, 50, Point::new(250.0, 150.0)));
    c.advance(FRAME);
    assert!(c.state().is_flinging());

    c.handle_pointer(&PointerEvent::down(B, 80, Point::new(10.0, 10.0)));
    assert!(!c.state().is_flinging());
    let frozen = c.state().translate();
    assert!(!c.advance(FRAME));
    assert_eq!(c.state().translate(), frozen);
}

#[test]
fn toolkit_cancel_reports_no_fling() {
    let mut c = viewport(GestureConfig::default());
    c.state_mut().snap_scale(4.0);
    horizontal_drag(&mut c);
    let out = c.handle_pointer(&PointerEvent::cancel(A, 60, Point::new(250.0, 150.0)));
    assert!(out.is_empty());
    assert_eq!(c.interpreter().phase(), GesturePhase::Cancelled);
    assert!(!c.state().is_animating());
    // The pointer's later up belongs to no session.
    assert!(c
        .handle_pointer(&PointerEvent::up(A, 70, Point::new(250.0, 150.0)))
        .is_empty());
}

#[test]
fn double_tap_needs_a_target_function() {
    let mut c = viewport(GestureConfig::default());
    let p = Point::new(100.0, 100.0);
    let mut intents = tap(&mut c, 0, p);
    intents.extend(tap(&mut c, 150, p));
    assert!(
        !intents
            .iter()
            .any(|i| matches!(i, Intent::AnimateToScale(_) | Intent::SnapToScale(_))),
        "double tap recognized without a target: {intents:?}"
    );
    assert_eq!(c.state().scale(), 1.0);
}

#[test]
fn double_tap_toggles_between_limits() {
    let mut c = viewport(GestureConfig::default());
    c.set_double_tap_scale(Some(Box::new(|s| if s > 1.0 { 1.0 } else { 8.0 })));
    let p = Point::new(100.0, 100.0);

    assert!(tap(&mut c, 0, p).is_empty());
    assert_eq!(tap(&mut c, 150, p), vec![Intent::AnimateToScale(8.0)]);
    while c.advance(FRAME) {}
    assert_eq!(c.state().scale(), 8.0);

    tap(&mut c, 1_000, p);
    assert_eq!(tap(&mut c, 1_150, p), vec![Intent::AnimateToScale(1.0)]);
    while c.advance(FRAME) {}
    assert_eq!(c.state().scale(), 1.0);
    assert_eq!(c.state().translate(), Vec2::ZERO);
}

#[test]
fn double_tap_only_bindings_snap_and_ignore_drags() {
    let config = GestureConfig::default().with_bindings(GestureBindings::DOUBLE_TAP_ONLY);
    let mut c = viewport(config);
    c.set_double_tap_scale(Some(Box::new(|_| 3.0)));
    let p = Point::new(100.0, 100.0);
    tap(&mut c, 0, p);
    assert_eq!(tap(&mut c, 150, p), vec![Intent::SnapToScale(3.0)]);
    assert_eq!(c.state().scale(), 3.0);
    assert!(!c.state().is_animating());

    // Zoomed in, yet drags and releases do nothing.
    let mut intents = horizontal_drag(&mut c);
    intents.extend(c.handle_pointer(&PointerEvent::up(A, 50, Point::new(250.0, 150.0))));
    assert!(intents.is_empty());
    assert_eq!(c.state().translate(), Vec2::ZERO);
}

#[test]
fn pinch_keeps_content_under_centroid() {
    let mut c = viewport(GestureConfig::default());
    c.state_mut().snap_scale(2.0);
    let centroid = Point::new(150.0, 140.0);
    let anchor = c.transform().inverse() * centroid;

    c.handle_pointer(&PointerEvent::down(A, 0, Point::new(130.0, 140.0)));
    c.handle_pointer(&PointerEvent::down(B, 5, Point::new(170.0, 140.0)));
    assert!(c.interpreter().is_pinching());
    c.handle_pointer(&PointerEvent::moved(A, 16, Point::new(110.0, 140.0)));
    c.handle_pointer(&PointerEvent::moved(B, 32, Point::new(190.0, 140.0)));

    assert!((c.state().scale() - 4.0).abs() < 1e-9);
    assert!((c.interpreter().session_zoom().unwrap() - 2.0).abs() < 1e-9);
    let moved = c.transform() * anchor;
    assert!((moved - centroid).hypot() < 1e-9, "anchor drifted to {moved:?}");
}

#[test]
fn pinch_then_lift_is_not_a_tap() {
    let mut c = viewport(GestureConfig::default());
    c.set_double_tap_scale(Some(Box::new(|_| 4.0)));
    let p = Point::new(100.0, 100.0);
    tap(&mut c, 0, p);
    c.handle_pointer(&PointerEvent::down(A, 150, p));
    c.handle_pointer(&PointerEvent::down(B, 155, Point::new(120.0, 100.0)));
    c.handle_pointer(&PointerEvent::up(B, 170, Point::new(120.0, 100.0)));
    let out = c.handle_pointer(&PointerEvent::up(A, 180, p));
    assert!(!out.iter().any(|i| matches!(i, Intent::AnimateToScale(_))));
}

#[test]
fn gestures_do_nothing_until_content_size_is_known() {
    let mut c = ZoomController::new(ScaleLimits::default(), GestureConfig::default());
    c.set_viewport_size(Size::new(300.0, 300.0));
    c.handle_pointer(&PointerEvent::down(A, 0, Point::new(140.0, 150.0)));
    c.handle_pointer(&PointerEvent::down(B, 5, Point::new(160.0, 150.0)));
    let out = c.handle_pointer(&PointerEvent::moved(B, 16, Point::new(200.0, 150.0)));
    assert!(matches!(out.as_slice(), [Intent::ZoomBy { .. }]));
    assert_eq!(c.state().scale(), 1.0);

    c.set_content_size(Some(Size::new(300.0, 300.0)));
    c.handle_pointer(&PointerEvent::moved(B, 32, Point::new(240.0, 150.0)));
    assert!(c.state().zooming());
}

#[test]
fn disabled_config_keeps_transform_static() {
    let mut c = viewport(GestureConfig::default().with_enabled(false));
    c.state_mut().snap_scale(4.0);
    c.set_double_tap_scale(Some(Box::new(|_| 1.0)));
    let mut intents = horizontal_drag(&mut c);
    intents.extend(c.handle_pointer(&PointerEvent::up(A, 50, Point::new(250.0, 150.0))));
    intents.extend(tap(&mut c, 200, Point::new(10.0, 10.0)));
    intents.extend(tap(&mut c, 350, Point::new(10.0, 10.0)));
    assert!(intents.is_empty());
    assert_eq!(c.state().scale(), 4.0);
    assert_eq!(c.state().translate(), Vec2::ZERO);
    assert!(!c.interpreter().is_active());
}
