// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error returned when a scale range cannot be used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    /// `min` was not strictly less than `max`.
    InvertedScaleRange {
        /// Requested minimum scale.
        min: f64,
        /// Requested maximum scale.
        max: f64,
    },
    /// One of the bounds was negative.
    NegativeScale(f64),
    /// A bound was NaN, or the minimum was infinite.
    NonFiniteScale(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedScaleRange { min, max } => {
                write!(f, "minimum scale {min} must be less than maximum scale {max}")
            }
            Self::NegativeScale(v) => write!(f, "scale bound {v} is negative"),
            Self::NonFiniteScale(v) => write!(f, "scale bound {v} is not usable"),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Validated `[min, max]` range for the zoom scale.
///
/// `max` may be `f64::INFINITY` for unbounded zoom-in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLimits {
    min: f64,
    max: f64,
}

impl ScaleLimits {
    /// Minimum `1.0`, no maximum.
    pub const DEFAULT: Self = Self {
        min: 1.0,
        max: f64::INFINITY,
    };

    /// Validates a scale range.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NonFiniteScale`] if either bound is NaN or `min` is infinite.
    /// - [`ConfigError::NegativeScale`] if either bound is negative.
    /// - [`ConfigError::InvertedScaleRange`] if `min >= max`.
    pub fn new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if min.is_nan() || min.is_infinite() {
            return Err(ConfigError::NonFiniteScale(min));
        }
        if max.is_nan() {
            return Err(ConfigError::NonFiniteScale(max));
        }
        if min < 0.0 {
            return Err(ConfigError::NegativeScale(min));
        }
        if max < 0.0 {
            return Err(ConfigError::NegativeScale(max));
        }
        if min >= max {
            return Err(ConfigError::InvertedScaleRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Smallest admissible scale.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Largest admissible scale; may be infinite.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamps `scale` into the range. NaN clamps to the minimum.
    #[must_use]
    pub fn clamp(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.min;
        }
        scale.clamp(self.min, self.max)
    }
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}
