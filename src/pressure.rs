//! Contact pressure: turning an impact into per-vertex velocity impulses.
//!
//! Every vertex receives `direction * pressure * distance² * dt`, where the
//! distance is measured from the contact point. The impulse scales with the
//! squared distance, so two vertices at distances `d1` and `d2` receive
//! impulses in the ratio `(d1 / d2)²`.

use crate::vec::Vec;
use crate::vertex::VertexSpring;

/// A contact reported by the host, in the body's local space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ContactEvent<V: Vec> {
    /// Contact point.
    pub point: V,
    /// Raw force magnitude, before any multiplier or clamp.
    pub force: V::Scalar,
    /// Push direction for every vertex. `None` pushes each vertex away from
    /// the contact point.
    pub direction: Option<V>,
}

impl<V: Vec> ContactEvent<V> {
    /// A contact that pushes each vertex radially away from `point`.
    pub fn radial(point: V, force: V::Scalar) -> Self {
        ContactEvent { point, force, direction: None }
    }

    /// A contact that pushes every vertex along `direction`.
    pub fn directed(point: V, force: V::Scalar, direction: V) -> Self {
        ContactEvent { point, force, direction: Some(direction) }
    }

    /// Build a contact the way collision callbacks report one: the force is the
    /// squared relative speed, and vertices are pushed against the contact normal.
    pub fn from_collision(point: V, normal: V, relative_velocity: V) -> Self {
        ContactEvent {
            point,
            force: relative_velocity.length_sq(),
            direction: Some(-normal),
        }
    }
}

/// Apply `contact` to every spring with an already-clamped `pressure`.
///
/// No clamping happens here. A vertex sitting exactly on a radial contact
/// point has no direction and receives nothing.
pub fn inject<V: Vec>(
    springs: &mut [VertexSpring<V>],
    contact: &ContactEvent<V>,
    pressure: V::Scalar,
    dt: V::Scalar,
) {
    for spring in springs.iter_mut() {
        let offset = spring.position() - contact.point;
        let direction = match contact.direction {
            Some(direction) => direction,
            None => offset.normalize(),
        };
        spring.apply_impulse(direction, pressure * offset.length_sq() * dt);
    }
}
