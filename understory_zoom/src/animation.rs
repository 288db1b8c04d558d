// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animatable scalars driven by frame time.
//!
//! An [`AnimatedScalar`] is either static or running exactly one animation.
//! Starting anything new on the scalar (a snap, another animation, or an explicit
//! stop) cancels the running animation synchronously and leaves the value where
//! it was. Every start bumps a generation counter; callers keep the generation
//! returned by [`AnimatedScalar::animate_to`] / [`AnimatedScalar::animate_decay`]
//! and ask [`AnimatedScalar::status`] later, which is how stale completions are
//! told apart from the current one.
//!
//! Time only advances when the host calls [`AnimatedScalar::step`] with the
//! elapsed frame time in seconds.
//!
//! ```rust
//! use understory_zoom::{AnimatedScalar, AnimationSpec, AnimationStatus};
//!
//! let mut scalar = AnimatedScalar::new(1.0);
//! let generation = scalar.animate_to(3.0, AnimationSpec::default());
//! while scalar.step(1.0 / 60.0) {}
//! assert_eq!(scalar.value(), 3.0);
//! assert_eq!(scalar.status(generation), AnimationStatus::Settled);
//! ```

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Parameters of a damped spring animating toward a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringSpec {
    /// `1.0` is critically damped, below that bounces, above that creeps.
    pub damping_ratio: f64,
    /// Spring stiffness; the undamped angular frequency is its square root.
    pub stiffness: f64,
    /// Displacement and velocity below which the spring is considered settled.
    pub visibility_threshold: f64,
}

impl SpringSpec {
    /// Critically damped spring with medium stiffness.
    pub const DEFAULT: Self = Self {
        damping_ratio: 1.0,
        stiffness: 1500.0,
        visibility_threshold: 0.01,
    };
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Easing curves for duration-based animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Starts slow, ends fast.
    EaseInCubic,
    /// Starts fast, ends slow.
    EaseOutCubic,
    /// Slow at both ends.
    #[default]
    EaseInOutCubic,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress in `[0, 1]`.
    #[must_use]
    pub fn ease(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInCubic => t * t * t,
            Self::EaseOutCubic => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// How a scalar travels to an explicit target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationSpec {
    /// Physically modelled spring; duration follows from the spring parameters.
    Spring(SpringSpec),
    /// Fixed-duration interpolation along an easing curve.
    Tween {
        /// Total duration in milliseconds.
        duration_ms: u32,
        /// Progress curve.
        easing: Easing,
    },
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::Spring(SpringSpec::DEFAULT)
    }
}

/// Exponential velocity decay used for flings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecaySpec {
    /// Scales the base friction; larger values stop sooner.
    pub friction_multiplier: f64,
    /// Speed (units per second) below which the decay is considered settled.
    pub abs_velocity_threshold: f64,
}

impl DecaySpec {
    /// Base decay rate, per second, before the friction multiplier.
    pub const BASE_FRICTION: f64 = -4.2;

    /// Friction multiplier `1.0`, threshold `0.1` units per second.
    pub const DEFAULT: Self = Self {
        friction_multiplier: 1.0,
        abs_velocity_threshold: 0.1,
    };

    fn rate(&self) -> f64 {
        if self.friction_multiplier.is_finite() && self.friction_multiplier > 0.0 {
            Self::BASE_FRICTION * self.friction_multiplier
        } else {
            Self::BASE_FRICTION
        }
    }

    fn threshold(&self) -> f64 {
        if self.abs_velocity_threshold.is_finite() && self.abs_velocity_threshold > 0.0 {
            self.abs_velocity_threshold
        } else {
            Self::DEFAULT.abs_velocity_threshold
        }
    }
}

impl Default for DecaySpec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// What an animation generation is doing, or how it ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Still advancing on every step.
    Running,
    /// Reached its target (or ran out of velocity) on its own.
    Settled,
    /// Hit the scalar's bounds and was stopped there.
    BoundReached,
    /// Cancelled by a later snap, animation, or stop on the same scalar.
    Superseded,
}

#[derive(Clone, Copy, Debug)]
enum Motion {
    Spring {
        spec: SpringSpec,
        target: f64,
    },
    Tween {
        start: f64,
        target: f64,
        duration: f64,
        elapsed: f64,
        easing: Easing,
    },
    Decay {
        rate: f64,
        threshold: f64,
    },
}

/// A scalar that can be snapped or animated, with at most one animation at a time.
#[derive(Clone, Debug)]
pub struct AnimatedScalar {
    value: f64,
    velocity: f64,
    motion: Option<Motion>,
    generation: u64,
    ended: Option<AnimationStatus>,
    lower: f64,
    upper: f64,
}

impl AnimatedScalar {
    /// Creates a static scalar with no bounds.
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            motion: None,
            generation: 0,
            ended: None,
            lower: f64::NEG_INFINITY,
            upper: f64::INFINITY,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity in units per second; zero while static.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Returns `true` while an animation is in flight.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.motion.is_some()
    }

    /// Generation of the most recent snap, animation, or stop.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the `(lower, upper)` bounds enforced while animating.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.lower, self.upper)
    }

    /// Sets the range a running animation is kept inside.
    ///
    /// Snaps are not clamped; only animation steps are. Inverted input is
    /// normalized.
    pub fn set_bounds(&mut self, lower: f64, upper: f64) {
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        self.lower = lower;
        self.upper = upper;
    }

    /// Instantly sets the value, cancelling any running animation.
    pub fn snap_to(&mut self, value: f64) {
        self.cancel();
        self.value = value;
    }

    /// Cancels any running animation, leaving the value where it is.
    pub fn stop(&mut self) {
        self.cancel();
    }

    /// Starts animating toward `target`, returning the new generation.
    ///
    /// A spring picks up the velocity of whatever animation it preempts.
    pub fn animate_to(&mut self, target: f64, spec: AnimationSpec) -> u64 {
        let velocity = self.velocity;
        self.cancel();
        if !target.is_finite() {
            self.ended = Some(AnimationStatus::Settled);
            return self.generation;
        }
        match spec {
            AnimationSpec::Spring(spec) => {
                self.velocity = if velocity.is_finite() { velocity } else { 0.0 };
                let threshold = spring_threshold(&spec);
                if (self.value - target).abs() < threshold && self.velocity.abs() < threshold {
                    self.value = target;
                    self.finish(AnimationStatus::Settled);
                } else {
                    self.motion = Some(Motion::Spring { spec, target });
                }
            }
            AnimationSpec::Tween {
                duration_ms,
                easing,
            } => {
                if duration_ms == 0 || self.value == target {
                    self.value = target;
                    self.finish(AnimationStatus::Settled);
                } else {
                    self.motion = Some(Motion::Tween {
                        start: self.value,
                        target,
                        duration: f64::from(duration_ms) / 1000.0,
                        elapsed: 0.0,
                        easing,
                    });
                }
            }
        }
        self.generation
    }

    /// Starts an exponential decay from `initial_velocity`, returning the new generation.
    ///
    /// A velocity at or below the settle threshold (or a non-finite one) ends
    /// immediately without moving the value.
    pub fn animate_decay(&mut self, initial_velocity: f64, spec: DecaySpec) -> u64 {
        self.cancel();
        let threshold = spec.threshold();
        if !initial_velocity.is_finite() || initial_velocity.abs() <= threshold {
            self.finish(AnimationStatus::Settled);
            return self.generation;
        }
        self.velocity = initial_velocity;
        self.motion = Some(Motion::Decay {
            rate: spec.rate(),
            threshold,
        });
        self.generation
    }

    /// Advances the running animation by `dt` seconds.
    ///
    /// Returns `true` if an animation is still running afterwards.
    pub fn step(&mut self, dt: f64) -> bool {
        let Some(motion) = self.motion else {
            return false;
        };
        if !(dt.is_finite() && dt > 0.0) {
            return true;
        }
        match motion {
            Motion::Spring { spec, target } => {
                let (x, v) = spring_step(&spec, self.value - target, self.velocity, dt);
                let threshold = spring_threshold(&spec);
                if x.abs() < threshold && v.abs() < threshold {
                    self.value = target;
                    self.finish(AnimationStatus::Settled);
                    return false;
                }
                self.value = target + x;
                self.velocity = v;
            }
            Motion::Tween {
                start,
                target,
                duration,
                elapsed,
                easing,
            } => {
                let elapsed = elapsed + dt;
                let fraction = (elapsed / duration).min(1.0);
                let next = start + (target - start) * easing.ease(fraction);
                self.velocity = (next - self.value) / dt;
                self.value = next;
                if fraction >= 1.0 {
                    self.value = target;
                    self.finish(AnimationStatus::Settled);
                    return false;
                }
                self.motion = Some(Motion::Tween {
                    start,
                    target,
                    duration,
                    elapsed,
                    easing,
                });
            }
            Motion::Decay { rate, threshold } => {
                let decay = libm::exp(rate * dt);
                let delta = self.velocity / rate * (decay - 1.0);
                self.value += delta;
                self.velocity *= decay;
                if self.value < self.lower || self.value > self.upper {
                    self.value = self.value.clamp(self.lower, self.upper);
                    self.finish(AnimationStatus::BoundReached);
                    return false;
                }
                if self.velocity.abs() <= threshold {
                    self.finish(AnimationStatus::Settled);
                    return false;
                }
            }
        }
        if self.value < self.lower || self.value > self.upper {
            self.value = self.value.clamp(self.lower, self.upper);
            self.finish(AnimationStatus::BoundReached);
            return false;
        }
        true
    }

    /// Reports what the animation started as `generation` is doing.
    #[must_use]
    pub fn status(&self, generation: u64) -> AnimationStatus {
        if generation != self.generation {
            return AnimationStatus::Superseded;
        }
        if self.motion.is_some() {
            return AnimationStatus::Running;
        }
        self.ended.unwrap_or(AnimationStatus::Superseded)
    }

    fn cancel(&mut self) {
        if self.motion.take().is_some() {
            log::debug!(
                "animation generation {} preempted at {}",
                self.generation,
                self.value
            );
        }
        self.velocity = 0.0;
        self.ended = None;
        self.generation = self.generation.wrapping_add(1);
    }

    fn finish(&mut self, status: AnimationStatus) {
        self.motion = None;
        self.velocity = 0.0;
        self.ended = Some(status);
    }
}

fn spring_threshold(spec: &SpringSpec) -> f64 {
    if spec.visibility_threshold.is_finite() && spec.visibility_threshold > 0.0 {
        spec.visibility_threshold
    } else {
        SpringSpec::DEFAULT.visibility_threshold
    }
}

/// Closed-form damped harmonic oscillator: advances displacement `x0` and
/// velocity `v0` by `t` seconds.
fn spring_step(spec: &SpringSpec, x0: f64, v0: f64, t: f64) -> (f64, f64) {
    let stiffness = if spec.stiffness.is_finite() && spec.stiffness > 0.0 {
        spec.stiffness
    } else {
        SpringSpec::DEFAULT.stiffness
    };
    let zeta = if spec.damping_ratio.is_finite() && spec.damping_ratio >= 0.0 {
        spec.damping_ratio
    } else {
        SpringSpec::DEFAULT.damping_ratio
    };
    let omega = stiffness.sqrt();

    if (zeta - 1.0).abs() < 1e-9 {
        let b = v0 + omega * x0;
        let e = libm::exp(-omega * t);
        let x = (x0 + b * t) * e;
        let v = (b - omega * (x0 + b * t)) * e;
        (x, v)
    } else if zeta > 1.0 {
        let root = omega * (zeta * zeta - 1.0).sqrt();
        let r1 = -zeta * omega - root;
        let r2 = -zeta * omega + root;
        let c2 = (v0 - r1 * x0) / (r2 - r1);
        let c1 = x0 - c2;
        let e1 = libm::exp(r1 * t);
        let e2 = libm::exp(r2 * t);
        (c1 * e1 + c2 * e2, c1 * r1 * e1 + c2 * r2 * e2)
    } else {
        let damped = omega * (1.0 - zeta * zeta).sqrt();
        let s = (v0 + zeta * omega * x0) / damped;
        let e = libm::exp(-zeta * omega * t);
        let (sin, cos) = (damped * t).sin_cos();
        let x = e * (x0 * cos + s * sin);
        let v = e * (-zeta * omega * (x0 * cos + s * sin) + damped * (s * cos - x0 * sin));
        (x, v)
    }
}
