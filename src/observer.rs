//! Tick observer trait for monitoring deformation progress.

/// Trait for observing a body's ticks and contacts.
///
/// Implement this trait to monitor a body (e.g., for debugging overlays or
/// profiling). All methods have default no-op implementations.
pub trait TickObserver {
    /// Called when a vertex snapped to rest during this tick.
    fn on_vertex_settled(&mut self, _index: usize) {}

    /// Called when a vertex produced NaN or infinity and was frozen at rest.
    fn on_vertex_recovered(&mut self, _index: usize) {}

    /// Called after a tick, with whether any vertex was displaced going into it.
    fn on_tick_complete(&mut self, _changed: bool) {}

    /// Called after a contact was applied, with the pressure actually used.
    fn on_pressure_injected(&mut self, _pressure: f64) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpTickObserver;

impl TickObserver for NoOpTickObserver {}
