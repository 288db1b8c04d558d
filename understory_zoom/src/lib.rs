// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_zoom --heading-base-level=0

//! Understory Zoom: bounded pan/zoom transform state for a single surface.
//!
//! This crate models the transform of one piece of content (typically an image)
//! shown inside a fixed-size viewport. It focuses on:
//! - A scale + translation triple, with scale clamped to a configured range.
//! - Translation bounds derived from viewport size, fitted content size, and scale,
//!   so zoomed content never drifts out of the viewport.
//! - Animated scale changes (spring or eased tween) and exponential fling decay,
//!   advanced by frame time supplied by the host.
//! - A small persistable snapshot of the transform.
//!
//! It does **not** interpret pointer input. Gesture recognition lives in
//! `understory_gesture`, which turns pointer streams into zoom/pan/fling intents
//! and applies them to a [`TransformState`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_zoom::{AnimationSpec, Geometry, ScaleLimits, TransformState};
//!
//! let limits = ScaleLimits::new(1.0, 5.0).unwrap();
//! let mut state = TransformState::new(limits);
//!
//! // A 400x300 image in a 200x200 viewport fits to 200x150.
//! let geometry = Geometry::with_content(Size::new(200.0, 200.0), Size::new(400.0, 300.0));
//! state.update_geometry(&geometry);
//!
//! // Pinch-like zoom, then animate back out.
//! state.zoom_by(2.0);
//! assert!(state.zooming());
//! state.animate_scale(1.0, AnimationSpec::default());
//! while state.advance(1.0 / 60.0) {}
//! assert_eq!(state.scale(), 1.0);
//!
//! // Hand the transform to the renderer.
//! let transform = state.render_transform(Point::new(100.0, 100.0));
//! # let _ = transform;
//! ```
//!
//! ## Design notes
//!
//! - Translation is the offset of the content center from the viewport center.
//! - Each scalar runs at most one animation; anything new on a scalar cancels
//!   what was running (latest caller wins). Handles returned by animation
//!   starts can be polled with [`TransformState::animation_status`].
//! - There is no internal locking or global state. One owner (the viewport)
//!   mutates the transform; renderers only read it.
//!
//! This crate is `no_std`.

#![no_std]

mod animation;
mod geometry;
mod limits;
mod snapshot;
mod transform;

pub use animation::{AnimatedScalar, AnimationSpec, AnimationStatus, DecaySpec, Easing, SpringSpec};
pub use geometry::{Geometry, aspect_fit, axis_bound, translation_bounds};
pub use limits::{ConfigError, ScaleLimits};
pub use snapshot::TransformSnapshot;
pub use transform::{AnimationChannel, AnimationId, FlingHandle, TransformDebugInfo, TransformState};
