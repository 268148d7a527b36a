// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Enter/exit animation descriptions.
//!
//! This crate does not own a clock. An [`Animation`] describes how a host
//! should move between two [`PopoverLayout`](crate::PopoverLayout)s (or two
//! opacities) and can sample normalized progress for a given elapsed time.

use core::f64::consts::{E, TAU};

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Progress within this distance of `1.0` counts as settled.
const SETTLE_EPSILON: f64 = 1e-3;

/// How an overlay transitions between its dismissed and presented states.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Animation {
    /// A damped spring with unit mass.
    Spring {
        /// Period of the undamped oscillation, in seconds.
        response: f64,
        /// Damping ratio; `1.0` is critically damped, below that overshoots.
        damping_fraction: f64,
        /// Seconds over which a retargeted spring blends its response.
        ///
        /// Carried for hosts that retarget mid-flight; [`Animation::progress`]
        /// samples a single transition and ignores it.
        blend_duration: f64,
    },
    /// Constant-speed interpolation.
    Linear {
        /// Duration in seconds.
        duration: f64,
    },
    /// Smoothstep easing in and out.
    EaseInOut {
        /// Duration in seconds.
        duration: f64,
    },
    /// Jump straight to the end state.
    None,
}

impl Default for Animation {
    fn default() -> Self {
        Self::spring(0.3, 0.7, 1.0)
    }
}

impl Animation {
    /// Creates a spring animation.
    #[must_use]
    pub const fn spring(response: f64, damping_fraction: f64, blend_duration: f64) -> Self {
        Self::Spring {
            response,
            damping_fraction,
            blend_duration,
        }
    }

    /// Normalized progress `elapsed` seconds into a transition.
    ///
    /// Starts at `0.0` and ends at `1.0`. Under-damped springs overshoot and
    /// may briefly exceed `1.0`.
    #[must_use]
    pub fn progress(&self, elapsed: f64) -> f64 {
        if elapsed.is_nan() || elapsed <= 0.0 {
            return if matches!(self, Self::None) { 1.0 } else { 0.0 };
        }
        match *self {
            Self::Spring {
                response,
                damping_fraction,
                ..
            } => spring_step(response, damping_fraction, elapsed),
            Self::Linear { duration } => linear(duration, elapsed),
            Self::EaseInOut { duration } => {
                let t = linear(duration, elapsed);
                t * t * (3.0 - 2.0 * t)
            }
            Self::None => 1.0,
        }
    }

    /// Time after which [`Animation::progress`] stays within a small band of `1.0`.
    #[must_use]
    pub fn settle_time(&self) -> f64 {
        match *self {
            Self::Spring {
                response,
                damping_fraction,
                ..
            } => {
                if response.is_nan() || response <= 0.0 {
                    return 0.0;
                }
                let omega = TAU / response;
                // The envelope decays with the slowest real pole.
                let zeta = damping_fraction.max(1e-3);
                let decay = if zeta < 1.0 {
                    zeta * omega
                } else {
                    omega * (zeta - (zeta * zeta - 1.0).sqrt())
                };
                // Solve e^(-decay * t) = SETTLE_EPSILON; the critically and
                // over-damped envelopes carry an extra polynomial factor, so
                // leave some headroom.
                let base = -SETTLE_EPSILON.ln() / decay;
                if zeta < 1.0 { base } else { base * 1.5 }
            }
            Self::Linear { duration } | Self::EaseInOut { duration } => duration.max(0.0),
            Self::None => 0.0,
        }
    }

    /// Returns `true` once the transition has settled.
    #[must_use]
    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.settle_time()
    }
}

fn linear(duration: f64, elapsed: f64) -> f64 {
    if duration > 0.0 {
        (elapsed / duration).min(1.0)
    } else {
        1.0
    }
}

fn exp(x: f64) -> f64 {
    E.powf(x)
}

/// Unit step response of a damped harmonic oscillator.
///
/// Stiffness is `(2pi / response)^2` and damping `4pi * zeta / response`,
/// so `response` is the undamped period.
fn spring_step(response: f64, damping_fraction: f64, t: f64) -> f64 {
    if response.is_nan() || response <= 0.0 {
        return 1.0;
    }
    let omega = TAU / response;
    let zeta = damping_fraction.max(0.0);
    if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let envelope = exp(-zeta * omega * t);
        1.0 - envelope * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
    } else if zeta == 1.0 {
        1.0 - exp(-omega * t) * (1.0 + omega * t)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        1.0 - (r2 * exp(r1 * t) - r1 * exp(r2 * t)) / (r2 - r1)
    }
}
