use wobble::Vec as _;
use wobble::{
    BodyConfig, ContactEvent, DeformError, DeformableBody, MeshSink, OscillationParams,
    PressureParams, TickObserver, Vec2, Vec3,
};

fn column() -> Vec<Vec3<f32>> {
    (0..5).map(|i| Vec3::new(0.0, i as f32 * 0.5 - 1.0, 0.0)).collect()
}

fn pressure_body() -> DeformableBody<Vec3<f32>> {
    DeformableBody::new(&column(), BodyConfig::pressure(PressureParams::new())).unwrap()
}

fn jelly_body(intensity: f32) -> DeformableBody<Vec3<f32>> {
    let params = OscillationParams::new().with_intensity(intensity);
    DeformableBody::new(&column(), BodyConfig::oscillation(params)).unwrap()
}

#[test]
fn fresh_body_is_at_rest_and_unchanged() {
    let mut body = pressure_body();
    assert_eq!(body.len(), 5);
    assert!(body.is_settled());
    let tick = body.advance_tick(0.016);
    assert!(!tick.changed);
    assert_eq!(tick.positions, &column()[..]);
}

#[test]
fn changed_flag_uses_pre_tick_displacement() {
    let mut body = pressure_body();
    body.inject_pressure(&ContactEvent::radial(Vec3::new(0.0, 2.0, 0.0), 20.0), 0.016);

    // Velocity only: nothing is displaced yet going into this tick.
    assert!(!body.advance_tick(0.016).changed);
    assert!(body.advance_tick(0.016).changed);
    assert!(body.changed());
}

#[test]
fn changed_flag_clears_once_settled() {
    let mut body = pressure_body();
    body.follow_motion(Vec3::new(0.3, 0.0, 0.0));
    assert!(body.advance_tick(0.016).changed);
    for _ in 0..500 {
        body.advance_tick(0.016);
    }
    assert!(body.is_settled());
    assert!(!body.advance_tick(0.016).changed);
    assert_eq!(body.positions(), body.rest_positions());
}

#[test]
fn positions_keep_vertex_order() {
    let mut body = pressure_body();
    body.follow_motion(Vec3::new(0.0, 0.0, 1.0));
    let tick = body.advance_tick(0.016);
    for (i, p) in tick.positions.iter().enumerate() {
        let rest = column()[i];
        assert_eq!(p.y, rest.y, "vertex {} moved off its own column slot", i);
        assert!(p.z < 0.0);
    }
    for (i, v) in body.vertices().iter().enumerate() {
        assert_eq!(v.index(), i);
    }
}

#[test]
fn oscillation_weights_follow_height() {
    let body = jelly_body(0.5);
    let w = body.weights();
    assert_eq!(w.len(), 5);
    assert!((w[0] - 0.0).abs() < 1e-6);
    assert!((w[2] - 0.25).abs() < 1e-6);
    assert!((w[4] - 0.5).abs() < 1e-6);
    assert!(pressure_body().weights().is_empty());
}

#[test]
fn oscillation_bottom_stays_put_top_wobbles() {
    let mut body = jelly_body(1.0);
    body.follow_motion(Vec3::new(1.0, 0.0, 0.0));
    let tick = body.advance_tick(0.016);
    assert!(tick.changed);
    assert_eq!(tick.positions[0], column()[0]);
    assert!(tick.positions[4].x < 0.0);

    let mut crossed = false;
    for _ in 0..300 {
        let tick = body.advance_tick(0.016);
        crossed |= tick.positions[4].x > 0.0;
    }
    assert!(crossed, "jelly should overshoot rest");
    assert!(body.is_settled());
    assert_eq!(body.positions(), body.rest_positions());
}

#[test]
fn gated_tick_skips_static_transform() {
    let config = BodyConfig::pressure(PressureParams::new()).with_activity_culling(true);
    let mut body = DeformableBody::new(&column(), config).unwrap();
    body.follow_motion(Vec3::new(0.5, 0.0, 0.0));

    let before: Vec<_> = body.vertices().iter().map(|v| v.position()).collect();
    let tick = body.advance_tick_gated(0.016, false);
    assert!(!tick.changed);
    let after: Vec<_> = body.vertices().iter().map(|v| v.position()).collect();
    assert_eq!(before, after);

    assert!(body.advance_tick_gated(0.016, true).changed);
}

#[test]
fn gate_is_ignored_without_culling() {
    let mut body = pressure_body();
    body.follow_motion(Vec3::new(0.5, 0.0, 0.0));
    assert!(body.advance_tick_gated(0.016, false).changed);
}

#[test]
fn reset_restores_rest_shape() {
    let mut body = jelly_body(1.0);
    body.follow_motion(Vec3::new(0.0, 0.0, 2.0));
    body.advance_tick(0.016);
    body.reset();
    assert!(body.is_settled());
    assert!(!body.changed());
    assert_eq!(body.positions(), body.rest_positions());
}

#[test]
fn write_positions_checks_length() {
    let body = pressure_body();
    let mut exact = vec![Vec3::zero(); 5];
    body.write_positions(&mut exact).unwrap();
    assert_eq!(exact, column());

    let mut short = vec![Vec3::zero(); 3];
    assert_eq!(
        body.write_positions(&mut short),
        Err(DeformError::SizeMismatch { expected: 5, actual: 3 })
    );
}

#[derive(Default)]
struct RecordingMesh {
    positions: Vec<Vec3<f32>>,
    writes: usize,
    normals: usize,
}

impl MeshSink<Vec3<f32>> for RecordingMesh {
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn write_positions(&mut self, positions: &[Vec3<f32>]) {
        self.positions.copy_from_slice(positions);
        self.writes += 1;
    }

    fn recalculate_normals(&mut self) {
        self.normals += 1;
    }
}

#[test]
fn present_only_writes_changed_ticks() {
    let mut body = pressure_body();
    let mut mesh = RecordingMesh { positions: column(), ..Default::default() };

    body.advance_tick(0.016);
    assert_eq!(body.present(&mut mesh), Ok(false));
    assert_eq!(mesh.writes, 0);

    body.follow_motion(Vec3::new(0.0, 0.2, 0.0));
    body.advance_tick(0.016);
    assert_eq!(body.present(&mut mesh), Ok(true));
    assert_eq!(mesh.writes, 1);
    assert_eq!(mesh.normals, 1);
    assert_eq!(mesh.positions, body.positions());
}

#[test]
fn present_rejects_mismatched_mesh() {
    let body = pressure_body();
    let mut mesh: Vec<Vec3<f32>> = vec![Vec3::zero(); 4];
    assert_eq!(
        body.present(&mut mesh),
        Err(DeformError::SizeMismatch { expected: 5, actual: 4 })
    );
}

#[test]
fn present_into_plain_buffer() {
    let mut body = pressure_body();
    let mut buffer: Vec<Vec3<f32>> = vec![Vec3::zero(); 5];
    body.follow_motion(Vec3::new(0.1, 0.0, 0.0));
    body.advance_tick(0.016);
    assert_eq!(body.present(&mut buffer), Ok(true));
    assert_eq!(buffer, body.positions());
}

#[derive(Default)]
struct CountingObserver {
    settled: usize,
    recovered: usize,
    ticks: usize,
    changed_ticks: usize,
    pressures: Vec<f64>,
}

impl TickObserver for CountingObserver {
    fn on_vertex_settled(&mut self, _index: usize) {
        self.settled += 1;
    }

    fn on_vertex_recovered(&mut self, _index: usize) {
        self.recovered += 1;
    }

    fn on_tick_complete(&mut self, changed: bool) {
        self.ticks += 1;
        if changed {
            self.changed_ticks += 1;
        }
    }

    fn on_pressure_injected(&mut self, pressure: f64) {
        self.pressures.push(pressure);
    }
}

#[test]
fn observer_sees_settling_and_contacts() {
    let mut body = pressure_body();
    let mut observer = CountingObserver::default();

    body.inject_pressure_with(&ContactEvent::radial(Vec3::zero(), 100.0), 0.016, &mut observer);
    assert_eq!(observer.pressures, vec![25.0]);

    for _ in 0..500 {
        body.advance_tick_with(0.016, &mut observer);
    }
    assert_eq!(observer.ticks, 500);
    assert!(observer.changed_ticks > 0);
    // The middle vertex sits on the contact point and never moves.
    assert_eq!(observer.settled, 4);
    assert_eq!(observer.recovered, 0);
}

#[test]
fn non_finite_vertices_are_frozen_at_rest() {
    for config in [
        BodyConfig::oscillation(OscillationParams::new()),
        BodyConfig::pressure(PressureParams::new()),
    ] {
        let mut body = DeformableBody::new(&column(), config).unwrap();
        let mut observer = CountingObserver::default();
        body.follow_motion(Vec3::new(f32::INFINITY, 0.0, 0.0));
        body.advance_tick_with(0.016, &mut observer);

        assert_eq!(observer.recovered, 5);
        assert!(body.positions().iter().all(|p| p.is_finite()));
        assert!(body.is_settled());
    }
}

#[test]
fn non_finite_contact_in_oscillation_mode_is_ignored() {
    let mut body = jelly_body(1.0);
    let used = body.inject_pressure(&ContactEvent::radial(Vec3::zero(), f32::INFINITY), 0.016);
    assert_eq!(used, 0.0);
    assert!(body.is_settled());
}

#[test]
fn invalid_configs_fail_at_construction() {
    let rest = column();
    let zero_mass = BodyConfig::oscillation(OscillationParams::new().with_mass(0.0));
    assert!(matches!(
        DeformableBody::new(&rest, zero_mass),
        Err(DeformError::InvalidMass(_))
    ));

    let inverted = BodyConfig::pressure(PressureParams::new().with_force_range(30.0, 10.0));
    assert!(matches!(
        DeformableBody::new(&rest, inverted),
        Err(DeformError::InvalidForceRange { .. })
    ));

    let no_tolerance = BodyConfig::pressure(PressureParams::new().with_tolerance(0.0));
    assert!(matches!(
        DeformableBody::new(&rest, no_tolerance),
        Err(DeformError::InvalidTolerance(_))
    ));
}

#[test]
fn empty_mesh_is_allowed() {
    let mut body: DeformableBody<Vec3<f32>> =
        DeformableBody::new(&[], BodyConfig::oscillation(OscillationParams::new())).unwrap();
    assert!(body.is_empty());
    let tick = body.advance_tick(0.016);
    assert!(tick.positions.is_empty());
    assert!(!tick.changed);
}

#[test]
fn works_in_2d_and_f64() {
    let rest = [Vec2::new(0.0f64, 0.0), Vec2::new(1.0, 1.0)];
    let mut body = DeformableBody::new(&rest, BodyConfig::default()).unwrap();
    body.follow_motion(Vec2::new(0.25, 0.0));
    for _ in 0..300 {
        body.advance_tick(1.0 / 60.0);
    }
    assert!(body.is_settled());
}

#[test]
fn long_ticks_still_settle_a_dented_vertex() {
    for dt in [0.1f32, 0.5] {
        let rest = [Vec3::new(0.0f32, 1.0, 0.0)];
        let mut body = DeformableBody::new(&rest, BodyConfig::pressure(PressureParams::new())).unwrap();
        body.follow_motion(Vec3::new(0.0, 0.5, 0.0));

        let mut settled_at = None;
        for i in 0..10 {
            body.advance_tick(dt);
            if body.is_settled() {
                settled_at = Some(i);
                break;
            }
        }
        assert!(settled_at.is_some(), "dt = {}: stuck at {:?}", dt, body.positions());
        assert_eq!(body.positions(), &rest[..]);
        assert!(!body.advance_tick(dt).changed);
    }
}
