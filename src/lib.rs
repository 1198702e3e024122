//! Per-vertex spring-damper mesh deformation for games.
//!
//! `wobble` perturbs a mesh's vertex positions every tick and pulls them back
//! toward a rest shape, for jelly-like wobble and pressure dents. Each vertex
//! is an independent point mass on a spring to its rest position; there is no
//! coupling between vertices.
//!
//! # Features
//!
//! - **Two modes, one body**: damped pressure springs or frame-based
//!   oscillation, picked with [`DeformMode`]
//! - **Contact pressure**: impacts become per-vertex impulses via [`ContactEvent`]
//! - **Height falloff**: oscillation intensity fades from the top of the mesh
//!   to the bottom, no per-vertex pinning needed
//! - **Change detection**: every tick reports whether anything moved, so hosts
//!   can skip normal and bounds recomputation
//! - **Observable**: monitor ticks via the [`TickObserver`] trait
//! - **`no_std` compatible**: works in embedded and WASM environments

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod vertex;
pub mod pressure;
pub mod body;
pub mod sink;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::{Vec, Vec2, Vec3};
pub use vertex::{VertexSpring, VertexSpring2D, VertexSpring3D};
pub use pressure::ContactEvent;
pub use body::{DeformableBody, Tick};
pub use sink::MeshSink;
pub use config::{BodyConfig, DeformMode, OscillationParams, PressureParams, SHAKE_SETTLE_THRESHOLD};
pub use observer::{TickObserver, NoOpTickObserver};
pub use error::DeformError;
