// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport/content geometry and the translation bound formula.

use kurbo::{Size, Vec2};

/// Layout facts the host knows about a zoomable surface.
///
/// The viewport size comes from layout passes; the intrinsic content size comes
/// from whatever decodes the content (for example an image loader) and may not
/// be known yet.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Geometry {
    /// Size of the viewport in device-independent units.
    pub viewport: Size,
    /// Intrinsic size of the content, or `None` while it is still unknown.
    pub content_intrinsic: Option<Size>,
}

impl Geometry {
    /// Creates a snapshot for a viewport whose content size is not yet known.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            content_intrinsic: None,
        }
    }

    /// Creates a snapshot with both sizes known.
    #[must_use]
    pub fn with_content(viewport: Size, content_intrinsic: Size) -> Self {
        Self {
            viewport,
            content_intrinsic: Some(content_intrinsic),
        }
    }

    /// Returns the content size after aspect-fitting it into the viewport at scale 1.
    ///
    /// Returns `None` while the intrinsic size is unknown or degenerate
    /// (non-positive or non-finite on either axis).
    #[must_use]
    pub fn fitted_size(&self) -> Option<Size> {
        let content = self.content_intrinsic?;
        aspect_fit(content, self.viewport)
    }
}

/// Aspect-fits `content` into `viewport`.
///
/// The axis with the tighter ratio fills the viewport exactly; the other axis
/// is scaled by the same ratio. Returns `None` for content that has no usable
/// extent.
#[must_use]
pub fn aspect_fit(content: Size, viewport: Size) -> Option<Size> {
    if !is_positive(content.width) || !is_positive(content.height) {
        return None;
    }
    let width_ratio = viewport.width / content.width;
    let height_ratio = viewport.height / content.height;
    if width_ratio > height_ratio {
        Some(Size::new(content.width * height_ratio, viewport.height))
    } else {
        Some(Size::new(viewport.width, content.height * width_ratio))
    }
}

/// Maximum admissible absolute translation on one axis.
///
/// This is `max(0, content * scale - viewport) / 2`, except that a zero (or
/// otherwise unusable) extent on either side pins the axis to zero.
#[must_use]
pub fn axis_bound(viewport: f64, content: f64, scale: f64) -> f64 {
    if !is_positive(viewport) || !is_positive(content) || !scale.is_finite() {
        return 0.0;
    }
    let bound = (content * scale - viewport).max(0.0) / 2.0;
    if bound.is_finite() { bound } else { 0.0 }
}

/// Translation bounds for both axes; see [`axis_bound`].
#[must_use]
pub fn translation_bounds(viewport: Size, content_fitted: Size, scale: f64) -> Vec2 {
    Vec2::new(
        axis_bound(viewport.width, content_fitted.width, scale),
        axis_bound(viewport.height, content_fitted.height, scale),
    )
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
