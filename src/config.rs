//! Configuration types for deformable bodies.
//!
//! A body runs in one of two modes, picked once at construction:
//!
//! - [`DeformMode::Pressure`]: a damped spring pulls every vertex back to
//!   rest, integrated with the tick's `dt`. Contacts dent the surface.
//! - [`DeformMode::Oscillation`]: a frame-based "shake" that overshoots and
//!   wobbles, blended per vertex by its height in the mesh.
//!
//! # Builder Pattern
//! ```
//! use wobble::config::{BodyConfig, PressureParams};
//!
//! let config: BodyConfig<f32> = BodyConfig::pressure(
//!     PressureParams::new()
//!         .with_spring_rate(40.0)
//!         .with_damping(8.0)
//!         .with_force_range(2.0, 30.0),
//! )
//! .with_activity_culling(true);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::DeformError;
use crate::float::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squared-magnitude threshold below which an oscillating vertex snaps to rest.
///
/// Tuned separately from [`PressureParams::tolerance`]; the two modes test
/// different quantities against it.
pub const SHAKE_SETTLE_THRESHOLD: f32 = 1e-4;

/// Parameters for the oscillation ("jelly") mode.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OscillationParams<F: Float> {
    /// Fraction of velocity kept each tick, in (0, 1]. Default: 0.75.
    pub damping: F,
    /// Pull toward rest per unit of displacement. Default: 1.0.
    pub stiffness: F,
    /// Vertex mass; divides the restoring force. Default: 1.0.
    pub mass: F,
    /// Global blend weight between rest and simulated position, in [0, 1].
    /// Default: 1.0.
    pub intensity: F,
}

impl<F: Float> OscillationParams<F> {
    pub fn new() -> Self {
        OscillationParams {
            damping: F::from_f32(0.75),
            stiffness: F::one(),
            mass: F::one(),
            intensity: F::one(),
        }
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_mass(mut self, mass: F) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_intensity(mut self, intensity: F) -> Self {
        self.intensity = intensity;
        self
    }

    pub fn validate(&self) -> Result<(), DeformError> {
        if !(self.mass.is_finite() && self.mass > F::zero()) {
            return Err(DeformError::InvalidMass(self.mass.to_f64()));
        }
        if !(self.stiffness.is_finite() && self.stiffness > F::zero()) {
            return Err(DeformError::InvalidStiffness(self.stiffness.to_f64()));
        }
        if !(self.damping > F::zero() && self.damping <= F::one()) {
            return Err(DeformError::InvalidDamping {
                value: self.damping.to_f64(),
                range: "(0, 1]",
            });
        }
        if !(self.intensity >= F::zero() && self.intensity <= F::one()) {
            return Err(DeformError::InvalidIntensity(self.intensity.to_f64()));
        }
        Ok(())
    }
}

impl<F: Float> Default for OscillationParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters for the pressure mode.
///
/// `spring_rate` scales the restoring acceleration per unit of displacement
/// and `damping` is the fraction of velocity removed per second.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PressureParams<F: Float> {
    /// Restoring acceleration per unit of displacement. Default: 50.0.
    pub spring_rate: F,
    /// Velocity decay rate per second. Default: 10.0.
    pub damping: F,
    /// Lower bound for contact pressure. Default: 5.0.
    pub min_force: F,
    /// Upper bound for contact pressure. Default: 25.0.
    pub max_force: F,
    /// Squared displacement/velocity below which a vertex settles. Default: 0.001.
    pub tolerance: F,
    /// Scales incoming contact force before clamping. Default: 1.0.
    pub pressure_multiplier: F,
}

impl<F: Float> PressureParams<F> {
    pub fn new() -> Self {
        PressureParams {
            spring_rate: F::from_f32(50.0),
            damping: F::from_f32(10.0),
            min_force: F::from_f32(5.0),
            max_force: F::from_f32(25.0),
            tolerance: F::from_f32(0.001),
            pressure_multiplier: F::one(),
        }
    }

    pub fn with_spring_rate(mut self, spring_rate: F) -> Self {
        self.spring_rate = spring_rate;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_force_range(mut self, min_force: F, max_force: F) -> Self {
        self.min_force = min_force;
        self.max_force = max_force;
        self
    }

    pub fn with_tolerance(mut self, tolerance: F) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_pressure_multiplier(mut self, multiplier: F) -> Self {
        self.pressure_multiplier = multiplier;
        self
    }

    /// Scale a raw contact force and clamp it to `[min_force, max_force]`.
    ///
    /// Negative, NaN and huge inputs all land inside the range.
    pub fn clamp_pressure(&self, force: F) -> F {
        (force * self.pressure_multiplier).clamp(self.min_force, self.max_force)
    }

    pub fn validate(&self) -> Result<(), DeformError> {
        if !(self.spring_rate.is_finite() && self.spring_rate > F::zero()) {
            return Err(DeformError::InvalidSpringRate(self.spring_rate.to_f64()));
        }
        if !(self.damping.is_finite() && self.damping > F::zero()) {
            return Err(DeformError::InvalidDamping {
                value: self.damping.to_f64(),
                range: "(0, inf)",
            });
        }
        if !(self.min_force.is_finite()
            && self.max_force.is_finite()
            && self.min_force >= F::zero()
            && self.max_force >= self.min_force)
        {
            return Err(DeformError::InvalidForceRange {
                min: self.min_force.to_f64(),
                max: self.max_force.to_f64(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > F::zero()) {
            return Err(DeformError::InvalidTolerance(self.tolerance.to_f64()));
        }
        if !(self.pressure_multiplier.is_finite() && self.pressure_multiplier > F::zero()) {
            return Err(DeformError::InvalidPressureMultiplier(
                self.pressure_multiplier.to_f64(),
            ));
        }
        Ok(())
    }
}

impl<F: Float> Default for PressureParams<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Which update rule a body runs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeformMode<F: Float> {
    Oscillation(OscillationParams<F>),
    Pressure(PressureParams<F>),
}

impl<F: Float> DeformMode<F> {
    /// Settle tolerance handed to every vertex spring of a body in this mode.
    pub fn tolerance(&self) -> F {
        match self {
            DeformMode::Oscillation(_) => F::from_f32(SHAKE_SETTLE_THRESHOLD),
            DeformMode::Pressure(p) => p.tolerance,
        }
    }

    pub fn validate(&self) -> Result<(), DeformError> {
        match self {
            DeformMode::Oscillation(p) => p.validate(),
            DeformMode::Pressure(p) => p.validate(),
        }
    }
}

/// Full configuration for a [`DeformableBody`](crate::body::DeformableBody).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyConfig<F: Float> {
    pub mode: DeformMode<F>,
    /// Skip whole ticks while the host reports a static transform.
    /// Default: false.
    pub activity_culling: bool,
}

impl<F: Float> BodyConfig<F> {
    pub fn oscillation(params: OscillationParams<F>) -> Self {
        BodyConfig { mode: DeformMode::Oscillation(params), activity_culling: false }
    }

    pub fn pressure(params: PressureParams<F>) -> Self {
        BodyConfig { mode: DeformMode::Pressure(params), activity_culling: false }
    }

    pub fn with_activity_culling(mut self, enabled: bool) -> Self {
        self.activity_culling = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), DeformError> {
        self.mode.validate()
    }
}

impl<F: Float> Default for BodyConfig<F> {
    fn default() -> Self {
        Self::pressure(PressureParams::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(BodyConfig::<f32>::default().validate().is_ok());
        assert!(BodyConfig::<f64>::oscillation(OscillationParams::new()).validate().is_ok());
    }

    #[test]
    fn clamp_pressure_applies_multiplier_first() {
        let p = PressureParams::<f32>::new()
            .with_force_range(5.0, 25.0)
            .with_pressure_multiplier(2.0);
        assert_eq!(p.clamp_pressure(10.0), 20.0);
        assert_eq!(p.clamp_pressure(20.0), 25.0);
        assert_eq!(p.clamp_pressure(1.0), 5.0);
    }

    #[test]
    fn oscillation_tolerance_is_shake_threshold() {
        let mode = DeformMode::<f32>::Oscillation(OscillationParams::new());
        assert_eq!(mode.tolerance(), SHAKE_SETTLE_THRESHOLD);
    }
}
