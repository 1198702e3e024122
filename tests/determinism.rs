use wobble::{BodyConfig, ContactEvent, DeformableBody, OscillationParams, PressureParams, Vec3};

fn sphere_ish() -> Vec<Vec3<f32>> {
    let mut points = Vec::new();
    for i in 0..8 {
        for j in 0..8 {
            let y = i as f32 / 7.0 * 2.0 - 1.0;
            let x = (j as f32 * 0.785).sin() * (1.0 - y * y).sqrt();
            let z = (j as f32 * 0.785).cos() * (1.0 - y * y).sqrt();
            points.push(Vec3::new(x, y, z));
        }
    }
    points
}

fn run(config: BodyConfig<f32>) -> Vec<Vec3<f32>> {
    let mut body = DeformableBody::new(&sphere_ish(), config).unwrap();
    for frame in 0..120 {
        if frame % 30 == 0 {
            let contact = ContactEvent::radial(Vec3::new(0.0, 1.0, 0.0), 18.0);
            body.inject_pressure(&contact, 1.0 / 60.0);
            body.follow_motion(Vec3::new(0.05, 0.0, 0.0));
        }
        body.advance_tick(1.0 / 60.0);
    }
    body.positions().to_vec()
}

#[test]
fn pressure_mode_deterministic() {
    let results: Vec<_> = (0..5).map(|_| run(BodyConfig::pressure(PressureParams::new()))).collect();
    for r in &results[1..] {
        for (a, b) in results[0].iter().zip(r.iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert_eq!(a.z, b.z);
        }
    }
}

#[test]
fn oscillation_mode_deterministic() {
    let config = BodyConfig::oscillation(OscillationParams::new().with_intensity(0.7));
    let results: Vec<_> = (0..5).map(|_| run(config)).collect();
    for r in &results[1..] {
        assert_eq!(&results[0], r);
    }
}
