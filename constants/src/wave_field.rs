/// Wave-field lattice and wave function coefficients.
///
/// The surface is `y = sin(frequency * (x^3 + z^2 + t)) * amplitude` sampled
/// on a `count x count` lattice with `step` spacing, centred at the origin.
pub struct WaveFieldConfig {
    /// Samples per lattice axis; the grid holds `count * count` points.
    pub count: usize,
    /// Lattice spacing between neighbouring samples.
    pub step: f32,
    pub frequency: f32,
    pub amplitude: f32,
    /// Elapsed seconds are scaled by this before entering the wave function.
    pub time_multiplier: f32,
    /// Rigid yaw of the whole field, radians per second.
    pub rotation_speed: f32,
    pub point_color: [f32; 3],
}

pub const WAVE_FIELD: WaveFieldConfig = WaveFieldConfig {
    count: 100,
    step: 0.2,
    frequency: 0.01,
    amplitude: 0.5,
    time_multiplier: 20.0,
    rotation_speed: 0.01,
    point_color: [0.0, 0.667, 1.0],
};

pub const AMBIENT_BRIGHTNESS: f32 = 80.0;
pub const POINT_LIGHT_POSITION: [f32; 3] = [10.0, 10.0, 10.0];
pub const POINT_LIGHT_INTENSITY: f32 = 1_000_000.0;
