use glam::Vec3;

// Choreography tuning constants shared by the web and native hosts.
// Defaults for `ChoreographyConfig`; hosts may override them via config.

// Approach (crashing asteroid)
pub const APPROACH_DURATION_SEC: f64 = 5.0;
pub const APPROACH_ACTIVATION_DELAY_SEC: f64 = 1.5; // measured from scene mount
pub const APPROACH_START_POSITION: [f32; 3] = [25.0, 15.0, -5.0]; // top right
pub const APPROACH_TARGET_POSITION: [f32; 3] = [0.0, -2.0, 5.0]; // centre, in front of the planet
pub const APPROACH_START_SCALE: f32 = 0.0;
pub const APPROACH_TARGET_SCALE: f32 = 0.008;

// Ease-in blend: eased = CUBIC * r^3 + LINEAR * r
pub const EASE_CUBIC_WEIGHT: f32 = 0.125;
pub const EASE_LINEAR_WEIGHT: f32 = 0.875;

// Spin rates (rad/s) about x, y, z
pub const IDLE_SPIN: [f32; 3] = [0.2, 0.15, 0.1];
pub const APPROACH_SPIN_BASE: [f32; 3] = [0.5, 0.3, 0.4];
pub const APPROACH_SPIN_GAIN: [f32; 3] = [3.0, 2.0, 2.5]; // scaled by eased progress

// Impact (explosion)
pub const IMPACT_DURATION_SEC: f64 = 3.0;
pub const IMPACT_POSITION: [f32; 3] = [0.0, -2.0, 5.0];
pub const IMPACT_SCALE_MULTIPLIER: f32 = 15.0; // visual scale at progress 1
pub const IMPACT_SPIN_Z: f32 = 4.0;
pub const IMPACT_MIDPOINT_PROGRESS: f32 = 0.5;
pub const IMPACT_NEAR_END_LEAD_SEC: f64 = 0.5; // near-end fires this long before completion

// Debris particles
pub const PARTICLE_COUNT: usize = 50;
pub const PARTICLE_SPEED_RANGE: [f32; 2] = [2.0, 6.0];
pub const PARTICLE_SIZE_RANGE: [f32; 2] = [0.1, 0.4];
pub const PARTICLE_ELEVATION_RANGE: [f32; 2] = [-1.0, 1.0];
pub const PARTICLE_DISTANCE_SCALE: f32 = 5.0; // distance = speed * progress * scale
pub const PARTICLE_ELEVATION_SCALE: f32 = 3.0;
pub const PARTICLE_JITTER_SCALE: f32 = 0.5; // depth jitter span as a fraction of distance

// Debris palette
pub const DEBRIS_ORANGE: [f32; 3] = [1.0, 0.533, 0.0]; // #ff8800
pub const DEBRIS_YELLOW: [f32; 3] = [1.0, 1.0, 0.0]; // #ffff00

// Background planet
pub const PLANET_POSITION: [f32; 3] = [0.0, -17.0, -2.0];
pub const PLANET_SPIN_X: f32 = 0.2;

#[inline]
pub fn vec3_of(v: [f32; 3]) -> Vec3 {
    Vec3::new(v[0], v[1], v[2])
}
