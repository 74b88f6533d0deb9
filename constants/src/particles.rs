/// Particle swarm tuning. Counts and radii are fixed for the room's
/// lifetime; the per-frame step never allocates.
pub struct ParticleConfig {
    pub count: usize,
    /// Spawn sphere radius.
    pub radius: f32,
    /// Half-range of the random initial velocity per axis.
    pub speed: f32,
    /// Central gravity coefficient: force magnitude `gravity / (d^2 + 1)`.
    pub gravity: f32,
    /// Pointer attraction coefficient: force magnitude `attraction / (d^2 + 2)`.
    pub attraction: f32,
    /// Velocity multiplier applied every frame, strictly below 1.
    pub damping: f32,
    pub size_min: f32,
    pub size_range: f32,
}

pub const PARTICLES: ParticleConfig = ParticleConfig {
    count: 2000,
    radius: 10.0,
    speed: 0.02,
    gravity: 0.005,
    attraction: 0.15,
    damping: 0.98,
    size_min: 0.05,
    size_range: 0.05,
};

/// Distance floor for both force denominators; keeps coincident points from
/// producing NaN or infinite forces.
pub const DISTANCE_EPSILON: f32 = 0.001;

/// Depth along the cursor ray at which the pointer's world position is taken.
pub const POINTER_DEPTH: f32 = 10.0;

/// Index-gradient bands: first third cyan, middle third magenta, last third
/// yellow, each band blending from the previous band's colour.
pub const BAND_COLORS: [[f32; 3]; 3] = [
    [0.0, 1.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 1.0, 0.0],
];

pub const AMBIENT_BRIGHTNESS: f32 = 60.0;
pub const KEY_LIGHT_POSITION: [f32; 3] = [0.0, 0.0, 5.0];
pub const KEY_LIGHT_INTENSITY: f32 = 2_000_000.0;
pub const FILL_LIGHT_POSITION: [f32; 3] = [-5.0, 5.0, -5.0];
pub const FILL_LIGHT_INTENSITY: f32 = 1_500_000.0;
pub const FILL_LIGHT_COLOR: [f32; 3] = [1.0, 0.0, 1.0];
