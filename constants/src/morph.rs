/// Full duration of one A->B->C->A cross-fade cycle, in seconds. Each of the
/// three phases spans exactly a third of this.
pub const CYCLE_DURATION: f32 = 9.0;

/// Scale envelope for a primitive while it fades in: eases from `SCALE_MIN`
/// at zero opacity to `SCALE_MAX` at full opacity.
pub const SCALE_MIN: f32 = 0.7;
pub const SCALE_MAX: f32 = 1.0;

/// Per-primitive appearance and continuous spin. The spin runs regardless of
/// the cross-fade so primitives never enter a phase at rest.
pub struct MorphPrimitiveConfig {
    pub color: [f32; 3],
    /// Angular rates, radians per second, about x/y/z.
    pub spin: [f32; 3],
}

/// Cube, sphere, torus, in cycle order.
pub const PRIMITIVES: [MorphPrimitiveConfig; 3] = [
    MorphPrimitiveConfig {
        color: [1.0, 0.42, 0.42],
        spin: [0.35, 0.5, 0.0],
    },
    MorphPrimitiveConfig {
        color: [0.42, 0.65, 1.0],
        spin: [0.0, 0.6, 0.25],
    },
    MorphPrimitiveConfig {
        color: [0.55, 1.0, 0.55],
        spin: [0.45, 0.0, 0.4],
    },
];

pub const AMBIENT_BRIGHTNESS: f32 = 90.0;
pub const POINT_LIGHT_POSITION: [f32; 3] = [0.0, 5.0, 0.0];
pub const POINT_LIGHT_INTENSITY: f32 = 1_000_000.0;
