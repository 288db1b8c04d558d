// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_gesture --heading-base-level=0

//! Understory Gesture: pointer gestures for zoomable surfaces.
//!
//! This crate turns raw pointer streams into requests for an
//! [`understory_zoom::TransformState`]. It provides:
//!
//! - [`GestureInterpreter`]: a per-session state machine
//!   (`Idle → AwaitingSlop → Dragging → Ended | Cancelled`, with pinching on
//!   top whenever two or more pointers are down) that emits [`Intent`]s.
//! - Building blocks it is made of, usable on their own: [`drag::DragState`]
//!   for slop-aware drags, [`VelocityTracker`] for release velocity,
//!   [`PinchTracker`] for multi-pointer zoom and pan, and
//!   [`DoubleTapDetector`] for double taps.
//! - [`GestureBindings`]: which gestures are wired to which intents, so a
//!   free pan/zoom/fling viewer and a double-tap-only viewer share one transform.
//! - [`ZoomController`]: an interpreter and a transform wired together for one
//!   viewport.
//!
//! Pans and flings are only reported while the transform is zoomed in past its
//! minimum scale.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_gesture::{GestureConfig, Intent, PointerEvent, PointerId, ZoomController};
//! use understory_zoom::ScaleLimits;
//!
//! let mut viewport = ZoomController::new(ScaleLimits::new(1.0, 8.0).unwrap(), GestureConfig::default());
//! viewport.set_viewport_size(Size::new(300.0, 300.0));
//! viewport.set_content_size(Some(Size::new(1200.0, 900.0)));
//!
//! // Two fingers spread apart: zoom in about their centroid.
//! let (a, b) = (PointerId(1), PointerId(2));
//! viewport.handle_pointer(&PointerEvent::down(a, 0, Point::new(140.0, 150.0)));
//! viewport.handle_pointer(&PointerEvent::down(b, 5, Point::new(160.0, 150.0)));
//! let intents = viewport.handle_pointer(&PointerEvent::moved(b, 16, Point::new(180.0, 150.0)));
//! assert!(matches!(intents[0], Intent::ZoomBy { .. }));
//! assert!(viewport.state().zooming());
//!
//! // Render with the current transform.
//! let transform = viewport.transform();
//! # let _ = transform;
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod controller;
pub mod drag;
mod interpreter;
mod pinch;
mod pointer;
mod tap;
mod velocity;

pub use config::{DoubleTapAction, GestureBindings, GestureConfig};
pub use controller::ZoomController;
pub use interpreter::{DoubleTapScale, GestureInterpreter, GesturePhase, Intent, Intents};
pub use pinch::{PinchTracker, PinchUpdate};
pub use pointer::{PointerEvent, PointerId, PointerPhase};
pub use tap::{DoubleTapDetector, TapOutcome};
pub use velocity::VelocityTracker;
