//! Error types for deformation setup and buffer exchange.
//!
//! Configuration problems are reported once, when a body is built. Steady-state
//! ticks never fail; numerical trouble inside a tick is recovered per vertex.

use thiserror::Error;

/// Errors that can occur while building a body or exchanging buffers with a host.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeformError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite (got {0})")]
    InvalidMass(f64),
    /// Stiffness must be positive and finite.
    #[error("stiffness must be positive and finite (got {0})")]
    InvalidStiffness(f64),
    /// Damping is outside the range its mode accepts.
    #[error("damping {value} is outside {range}")]
    InvalidDamping { value: f64, range: &'static str },
    /// Oscillation intensity must be in [0, 1].
    #[error("intensity must be in [0, 1] (got {0})")]
    InvalidIntensity(f64),
    /// Spring rate must be positive and finite.
    #[error("spring rate must be positive and finite (got {0})")]
    InvalidSpringRate(f64),
    /// Force bounds must satisfy 0 <= min <= max.
    #[error("force range [{min}, {max}] is invalid (need 0 <= min <= max)")]
    InvalidForceRange { min: f64, max: f64 },
    /// Displacement tolerance must be positive.
    #[error("displacement tolerance must be positive (got {0})")]
    InvalidTolerance(f64),
    /// Pressure multiplier must be positive and finite.
    #[error("pressure multiplier must be positive and finite (got {0})")]
    InvalidPressureMultiplier(f64),
    /// A position buffer does not match the body's vertex count.
    #[error("position buffer holds {actual} vertices, body has {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}
