// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The persistable part of a [`crate::TransformState`].
///
/// Hosts that tear a viewport down and recreate it (with the same
/// [`crate::ScaleLimits`]) can store this and hand it to
/// [`crate::TransformState::restore`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransformSnapshot {
    /// Uniform scale.
    pub scale: f64,
    /// Horizontal offset of the content center from the viewport center.
    pub translate_x: f64,
    /// Vertical offset of the content center from the viewport center.
    pub translate_y: f64,
}
