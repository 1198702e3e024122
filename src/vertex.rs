//! Per-vertex spring state: one point mass anchored to its rest position.

use crate::config::SHAKE_SETTLE_THRESHOLD;
use crate::float::Float;
use crate::vec::{Vec, Vec2, Vec3};

/// A mesh vertex simulated as a point mass on a spring to its rest position.
///
/// Vertices never interact with each other; a body is just an array of these.
/// Two update rules share this state:
///
/// - [`update`](Self::update) + [`advance`](Self::advance): damped spring
///   integrated with `dt` (pressure mode).
/// - [`shake`](Self::shake): frame-based overshooting wobble (oscillation mode).
#[derive(Clone, Debug, PartialEq)]
pub struct VertexSpring<V: Vec> {
    index: usize,
    rest: V,
    position: V,
    velocity: V,
    tolerance: V::Scalar,
}

impl<V: Vec> VertexSpring<V> {
    /// A spring at rest with zero velocity.
    pub fn new(index: usize, rest: V, tolerance: V::Scalar) -> Self {
        Self::with_state(index, rest, rest, V::zero(), tolerance)
    }

    pub fn with_state(
        index: usize,
        rest: V,
        position: V,
        velocity: V,
        tolerance: V::Scalar,
    ) -> Self {
        VertexSpring { index, rest, position, velocity, tolerance }
    }

    /// Apply the damped spring force for one tick.
    ///
    /// `spring_rate` scales displacement into acceleration, `damping` removes
    /// that fraction of velocity per second. When both squared displacement and
    /// squared velocity are inside the tolerance the vertex snaps exactly to
    /// rest and `true` is returned. A tick long enough to remove all velocity
    /// (`damping * dt >= 1`) also snaps to rest.
    pub fn update(&mut self, spring_rate: V::Scalar, dt: V::Scalar, damping: V::Scalar) -> bool {
        let displacement = self.displacement();

        if self.within_tolerance(self.velocity.length_sq())
            && self.within_tolerance(displacement.length_sq())
        {
            self.snap_to_rest();
            return true;
        }

        let keep = V::Scalar::one() - damping * dt;
        if keep <= V::Scalar::zero() {
            self.snap_to_rest();
            return true;
        }

        self.velocity = self.velocity - displacement.scale(spring_rate * dt);
        self.velocity = self.velocity.scale(keep);
        false
    }

    /// Integrate position with the current velocity. Call after [`update`](Self::update).
    pub fn advance(&mut self, dt: V::Scalar) {
        self.position = self.position + self.velocity.scale(dt);
    }

    /// One frame of the oscillation rule. Returns `lerp(rest, position, intensity)`.
    ///
    /// Unlike [`update`](Self::update) this ignores `dt`: velocity is measured
    /// per tick. Settling is tested against [`SHAKE_SETTLE_THRESHOLD`], not the
    /// vertex tolerance. A non-positive mass leaves the vertex untouched.
    pub fn shake(
        &mut self,
        mass: V::Scalar,
        stiffness: V::Scalar,
        damping: V::Scalar,
        intensity: V::Scalar,
    ) -> V {
        if mass > V::Scalar::zero() {
            let force = (self.rest - self.position).scale(stiffness);
            let accel = force.scale(V::Scalar::one() / mass);
            self.velocity = (self.velocity + accel).scale(damping);
            self.position = self.position + self.velocity;

            let threshold = V::Scalar::from_f32(SHAKE_SETTLE_THRESHOLD);
            if (self.velocity + force + accel).length_sq() < threshold {
                self.snap_to_rest();
            }
        }
        self.rest.lerp(self.position, intensity)
    }

    /// Add `direction * magnitude` to the velocity.
    pub fn apply_impulse(&mut self, direction: V, magnitude: V::Scalar) {
        self.velocity = self.velocity + direction.scale(magnitude);
    }

    /// Shift the simulated position without touching velocity.
    pub fn offset(&mut self, delta: V) {
        self.position = self.position + delta;
    }

    /// Freeze the vertex at rest if integration produced NaN or infinity.
    /// Returns `true` if it had to.
    pub fn recover_non_finite(&mut self) -> bool {
        if self.position.is_finite() && self.velocity.is_finite() {
            return false;
        }
        self.snap_to_rest();
        true
    }

    pub fn reset(&mut self) {
        self.snap_to_rest();
    }

    fn snap_to_rest(&mut self) {
        self.position = self.rest;
        self.velocity = V::zero();
    }

    fn within_tolerance(&self, sq: V::Scalar) -> bool {
        sq < self.tolerance && sq > -self.tolerance
    }

    pub fn index(&self) -> usize { self.index }
    pub fn rest(&self) -> V { self.rest }
    pub fn position(&self) -> V { self.position }
    pub fn velocity(&self) -> V { self.velocity }
    pub fn tolerance(&self) -> V::Scalar { self.tolerance }

    pub fn displacement(&self) -> V {
        self.position - self.rest
    }

    /// Exactly at rest with zero velocity.
    pub fn is_settled(&self) -> bool {
        self.position == self.rest && self.velocity == V::zero()
    }

    /// Any nonzero displacement from rest, however small.
    pub fn is_displaced(&self) -> bool {
        self.displacement().length_sq() > V::Scalar::zero()
    }
}

pub type VertexSpring2D<F> = VertexSpring<Vec2<F>>;
pub type VertexSpring3D<F> = VertexSpring<Vec3<F>>;
