//! Host-side mesh that receives deformed positions.

use crate::error::DeformError;
use crate::vec::Vec;
use alloc::vec::Vec as AllocVec;

/// A renderable mesh the host lets a body write into.
///
/// Only [`vertex_count`](Self::vertex_count) and
/// [`write_positions`](Self::write_positions) are required. The recompute
/// hooks run after every write, in declaration order, and default to nothing.
pub trait MeshSink<V: Vec> {
    /// Number of vertex slots in the host mesh.
    fn vertex_count(&self) -> usize;

    /// Overwrite every vertex position. `positions.len() == self.vertex_count()`.
    fn write_positions(&mut self, positions: &[V]);

    fn recalculate_bounds(&mut self) {}

    fn recalculate_normals(&mut self) {}

    fn recalculate_tangents(&mut self) {}
}

/// A plain position buffer is the simplest sink.
impl<V: Vec> MeshSink<V> for AllocVec<V> {
    fn vertex_count(&self) -> usize {
        self.len()
    }

    fn write_positions(&mut self, positions: &[V]) {
        self.copy_from_slice(positions);
    }
}

/// Check a host buffer length against the body's vertex count.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), DeformError> {
    if expected == actual {
        Ok(())
    } else {
        Err(DeformError::SizeMismatch { expected, actual })
    }
}
