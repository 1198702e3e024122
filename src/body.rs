//! A whole mesh of independent vertex springs.

use crate::config::{BodyConfig, DeformMode};
use crate::error::DeformError;
use crate::float::Float;
use crate::observer::{NoOpTickObserver, TickObserver};
use crate::pressure::{self, ContactEvent};
use crate::sink::{check_len, MeshSink};
use crate::vec::Vec;
use crate::vertex::VertexSpring;
use alloc::vec::Vec as AllocVec;

/// Result of one tick: the deformed positions and whether they are worth uploading.
#[derive(Copy, Clone, Debug)]
pub struct Tick<'a, V: Vec> {
    /// One position per vertex, in mesh order.
    pub positions: &'a [V],
    /// True iff some vertex was off its rest position going into the tick.
    /// When false the host can skip normal/bounds recomputation.
    pub changed: bool,
}

/// A deformable mesh: one [`VertexSpring`] per vertex plus the output buffer.
///
/// ```
/// use wobble::{BodyConfig, ContactEvent, DeformableBody, PressureParams, Vec3};
///
/// let rest = [Vec3::new(0.0f32, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0)];
/// let mut body = DeformableBody::new(&rest, BodyConfig::pressure(PressureParams::new()))?;
///
/// body.inject_pressure(&ContactEvent::radial(Vec3::new(0.0, 0.5, 0.0), 100.0), 0.016);
/// body.advance_tick(0.016);
/// let tick = body.advance_tick(0.016);
/// assert!(tick.changed);
/// # Ok::<(), wobble::DeformError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DeformableBody<V: Vec> {
    springs: AllocVec<VertexSpring<V>>,
    rest: AllocVec<V>,
    /// Per-vertex blend weights; empty outside oscillation mode.
    weights: AllocVec<V::Scalar>,
    output: AllocVec<V>,
    config: BodyConfig<V::Scalar>,
    changed: bool,
}

impl<V: Vec> DeformableBody<V> {
    /// Build a body from the mesh's rest positions (local space).
    ///
    /// Every vertex starts at rest with zero velocity. Invalid parameters are
    /// rejected here; ticks never fail afterwards.
    pub fn new(rest: &[V], config: BodyConfig<V::Scalar>) -> Result<Self, DeformError> {
        config.validate()?;

        let tolerance = config.mode.tolerance();
        let springs = rest
            .iter()
            .enumerate()
            .map(|(i, &p)| VertexSpring::new(i, p, tolerance))
            .collect();

        let weights = match config.mode {
            DeformMode::Oscillation(params) => height_weights(rest, params.intensity),
            DeformMode::Pressure(_) => AllocVec::new(),
        };

        tracing::debug!(
            vertices = rest.len(),
            mode = mode_name(&config.mode),
            activity_culling = config.activity_culling,
            "deformable body created"
        );

        Ok(DeformableBody {
            springs,
            rest: rest.to_vec(),
            weights,
            output: rest.to_vec(),
            config,
            changed: false,
        })
    }

    /// Advance every vertex by one tick.
    pub fn advance_tick(&mut self, dt: V::Scalar) -> Tick<'_, V> {
        self.advance_tick_with(dt, &mut NoOpTickObserver)
    }

    /// Advance one tick unless activity culling is on and the host reports
    /// that the owning transform did not move. A skipped tick leaves every
    /// vertex untouched and reports `changed == false`.
    pub fn advance_tick_gated(&mut self, dt: V::Scalar, transform_moved: bool) -> Tick<'_, V> {
        if self.config.activity_culling && !transform_moved {
            self.changed = false;
            return Tick { positions: &self.output, changed: false };
        }
        self.advance_tick(dt)
    }

    pub fn advance_tick_with<O: TickObserver>(
        &mut self,
        dt: V::Scalar,
        observer: &mut O,
    ) -> Tick<'_, V> {
        let mut changed = false;

        match self.config.mode {
            DeformMode::Pressure(params) => {
                for (spring, out) in self.springs.iter_mut().zip(self.output.iter_mut()) {
                    changed |= spring.is_displaced();
                    let was_settled = spring.is_settled();

                    spring.update(params.spring_rate, dt, params.damping);
                    spring.advance(dt);

                    if spring.recover_non_finite() {
                        report_recovered(spring.index(), observer);
                    } else if !was_settled && spring.is_settled() {
                        observer.on_vertex_settled(spring.index());
                    }
                    *out = spring.position();
                }
            }
            DeformMode::Oscillation(params) => {
                let vertices = self
                    .springs
                    .iter_mut()
                    .zip(self.output.iter_mut())
                    .zip(self.weights.iter());
                for ((spring, out), &weight) in vertices {
                    changed |= spring.is_displaced();
                    let was_settled = spring.is_settled();

                    let mut blended =
                        spring.shake(params.mass, params.stiffness, params.damping, weight);

                    if spring.recover_non_finite() {
                        blended = spring.rest();
                        report_recovered(spring.index(), observer);
                    } else if !was_settled && spring.is_settled() {
                        observer.on_vertex_settled(spring.index());
                    }
                    *out = blended;
                }
            }
        }

        self.changed = changed;
        observer.on_tick_complete(changed);
        tracing::trace!(changed, vertices = self.springs.len(), "tick");

        Tick { positions: &self.output, changed }
    }

    /// Apply a contact to every vertex. The velocity change shows up on the
    /// next tick. Returns the pressure that was used.
    ///
    /// In pressure mode the force is scaled by the multiplier and clamped to
    /// the configured range; oscillation mode uses it as given.
    pub fn inject_pressure(&mut self, contact: &ContactEvent<V>, dt: V::Scalar) -> V::Scalar {
        self.inject_pressure_with(contact, dt, &mut NoOpTickObserver)
    }

    pub fn inject_pressure_with<O: TickObserver>(
        &mut self,
        contact: &ContactEvent<V>,
        dt: V::Scalar,
        observer: &mut O,
    ) -> V::Scalar {
        let pressure = match self.config.mode {
            DeformMode::Pressure(params) => params.clamp_pressure(contact.force),
            DeformMode::Oscillation(_) => contact.force,
        };

        if !(pressure.is_finite() && dt.is_finite()) {
            tracing::warn!(
                force = contact.force.to_f64(),
                dt = dt.to_f64(),
                "ignoring non-finite contact"
            );
            return V::Scalar::zero();
        }

        pressure::inject(&mut self.springs, contact, pressure, dt);

        tracing::debug!(
            force = contact.force.to_f64(),
            pressure = pressure.to_f64(),
            directed = contact.direction.is_some(),
            "contact injected"
        );
        observer.on_pressure_injected(pressure.to_f64());
        pressure
    }

    /// The owning object moved by `delta` (local space). Vertices lag behind
    /// and spring back, which is what makes a moving body wobble.
    pub fn follow_motion(&mut self, delta: V) {
        for spring in self.springs.iter_mut() {
            spring.offset(-delta);
        }
    }

    /// Copy the last tick's positions into a host buffer of the same length.
    pub fn write_positions(&self, out: &mut [V]) -> Result<(), DeformError> {
        check_len(self.output.len(), out.len())?;
        out.copy_from_slice(&self.output);
        Ok(())
    }

    /// Push the last tick's positions into `sink` and run its recompute hooks,
    /// but only if that tick changed anything. Returns whether it wrote.
    pub fn present<S: MeshSink<V>>(&self, sink: &mut S) -> Result<bool, DeformError> {
        check_len(self.output.len(), sink.vertex_count())?;
        if !self.changed {
            return Ok(false);
        }
        sink.write_positions(&self.output);
        sink.recalculate_bounds();
        sink.recalculate_normals();
        sink.recalculate_tangents();
        Ok(true)
    }

    /// Snap every vertex to rest and restore the output buffer.
    pub fn reset(&mut self) {
        for spring in self.springs.iter_mut() {
            spring.reset();
        }
        self.output.copy_from_slice(&self.rest);
        self.changed = false;
    }

    /// Every vertex exactly at rest with zero velocity.
    pub fn is_settled(&self) -> bool {
        self.springs.iter().all(|s| s.is_settled())
    }

    pub fn positions(&self) -> &[V] { &self.output }
    pub fn rest_positions(&self) -> &[V] { &self.rest }
    pub fn vertex(&self, index: usize) -> Option<&VertexSpring<V>> { self.springs.get(index) }
    pub fn vertices(&self) -> &[VertexSpring<V>] { &self.springs }
    /// Per-vertex oscillation weights; empty in pressure mode.
    pub fn weights(&self) -> &[V::Scalar] { &self.weights }
    pub fn config(&self) -> &BodyConfig<V::Scalar> { &self.config }
    pub fn mode(&self) -> &DeformMode<V::Scalar> { &self.config.mode }
    /// The `changed` flag of the last tick.
    pub fn changed(&self) -> bool { self.changed }
    pub fn len(&self) -> usize { self.springs.len() }
    pub fn is_empty(&self) -> bool { self.springs.is_empty() }
}

fn report_recovered<O: TickObserver>(index: usize, observer: &mut O) {
    tracing::warn!(index, "vertex went non-finite, frozen at rest");
    observer.on_vertex_recovered(index);
}

fn mode_name<F: Float>(mode: &DeformMode<F>) -> &'static str {
    match mode {
        DeformMode::Oscillation(_) => "oscillation",
        DeformMode::Pressure(_) => "pressure",
    }
}

/// Blend weight per vertex from its height in the rest bounds: full
/// `intensity` at the top, zero at the bottom. A flat mesh gets `intensity`
/// everywhere.
fn height_weights<V: Vec>(rest: &[V], intensity: V::Scalar) -> AllocVec<V::Scalar> {
    let Some(first) = rest.first() else {
        return AllocVec::new();
    };
    let (min_y, max_y) = rest.iter().fold((first.up(), first.up()), |(lo, hi), p| {
        (lo.min(p.up()), hi.max(p.up()))
    });
    let height = max_y - min_y;
    let one = V::Scalar::one();

    if height.is_near_zero(V::Scalar::from_f32(1e-10)) {
        return rest.iter().map(|_| intensity).collect();
    }
    rest.iter()
        .map(|p| (one - (max_y - p.up()) / height) * intensity)
        .collect()
}
