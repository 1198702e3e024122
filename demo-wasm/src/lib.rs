use wobble::{
    BodyConfig, ContactEvent, DeformableBody, OscillationParams, PressureParams, Vec2,
};
use wasm_bindgen::prelude::*;

fn ring(cx: f32, cy: f32, radius: f32, segments: usize) -> Vec<Vec2<f32>> {
    let mut points = Vec::with_capacity(segments + 1);
    points.push(Vec2::new(cx, cy));
    for i in 0..segments {
        let angle = i as f32 / segments as f32 * std::f32::consts::TAU;
        points.push(Vec2::new(cx + radius * angle.cos(), cy + radius * angle.sin()));
    }
    points
}

fn flatten(points: &[Vec2<f32>]) -> Vec<f32> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for p in points {
        out.push(p.x);
        out.push(p.y);
    }
    out
}

// ---- Jelly Demo ----

#[wasm_bindgen]
pub struct JellyDemo {
    body: DeformableBody<Vec2<f32>>,
    last_x: f32,
    last_y: f32,
}

#[wasm_bindgen]
impl JellyDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(segments: usize, intensity: f32) -> Result<JellyDemo, JsError> {
        let params = OscillationParams::new()
            .with_damping(0.85)
            .with_stiffness(0.2)
            .with_intensity(intensity.clamp(0.0, 1.0));
        let body = DeformableBody::new(
            &ring(0.0, 0.0, 60.0, segments.max(3)),
            BodyConfig::oscillation(params),
        )?;
        Ok(JellyDemo { body, last_x: 0.0, last_y: 0.0 })
    }

    /// Move the jelly's anchor; vertices lag behind and wobble back.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.body.follow_motion(Vec2::new(x - self.last_x, y - self.last_y));
        self.last_x = x;
        self.last_y = y;
    }

    /// Returns whether any vertex moved this frame.
    pub fn update(&mut self, dt: f32) -> bool {
        self.body.advance_tick(dt).changed
    }

    /// Returns flat [x0, y0, x1, y1, ...] local positions; vertex 0 is the center.
    pub fn positions(&self) -> Vec<f32> {
        flatten(self.body.positions())
    }
}

// ---- Pressure Demo ----

#[wasm_bindgen]
pub struct PressureDemo {
    body: DeformableBody<Vec2<f32>>,
    poke_strength: f32,
}

#[wasm_bindgen]
impl PressureDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(segments: usize) -> Result<PressureDemo, JsError> {
        let params = PressureParams::new()
            .with_spring_rate(40.0)
            .with_damping(6.0)
            .with_force_range(0.0, 0.05)
            .with_tolerance(0.01);
        let body = DeformableBody::new(
            &ring(0.0, 0.0, 60.0, segments.max(3)),
            BodyConfig::pressure(params).with_activity_culling(true),
        )?;
        Ok(PressureDemo { body, poke_strength: 0.05 })
    }

    pub fn set_poke_strength(&mut self, strength: f32) {
        self.poke_strength = strength;
    }

    /// Poke at a local point; the pressure spreads radially from it.
    pub fn poke(&mut self, x: f32, y: f32, dt: f32) -> f32 {
        let contact = ContactEvent::radial(Vec2::new(x, y), self.poke_strength);
        self.body.inject_pressure(&contact, dt)
    }

    pub fn update(&mut self, dt: f32, moved: bool) -> bool {
        self.body.advance_tick_gated(dt, moved).changed
    }

    pub fn positions(&self) -> Vec<f32> {
        flatten(self.body.positions())
    }

    pub fn vertex_count(&self) -> usize {
        self.body.len()
    }
}
