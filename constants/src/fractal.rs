/// Recursive installation tuning. Depth and fanout fix the tree size at
/// build time: `sum(FANOUT^i)` nodes for `i` in `0..=MAX_LEVEL`.
pub const MAX_LEVEL: u32 = 3;

/// Children per interior node, arranged on a ring around the parent.
pub const FANOUT: usize = 12;

/// Child scale relative to its parent.
pub const SHRINK_FACTOR: f32 = 0.5;

/// Root icosahedron circumradius.
pub const BASE_SCALE: f32 = 1.2;

/// Child ring radius as a multiple of the parent scale.
pub const RING_RADIUS_FACTOR: f32 = 1.5;

/// Base angular rate; a node at `level` spins at
/// `BASE_ROTATION_SPEED * (MAX_LEVEL - level + 1)`, so the root turns
/// fastest and the leaves settle to the base rate.
pub const BASE_ROTATION_SPEED: f32 = 0.3;

/// Per-axis multipliers for the outer group spin of each node.
pub const GROUP_SPIN: [f32; 3] = [0.5, 1.0, 0.3];

/// Per-axis multipliers for the inner mesh counter-spin (x axis negated).
pub const MESH_SPIN: [f32; 2] = [-0.7, 0.5];

/// Whole-installation sway: slow yaw plus a sine pitch wobble.
pub const SCENE_YAW_SPEED: f32 = 0.1;
pub const SCENE_PITCH_SPEED: f32 = 0.3;
pub const SCENE_PITCH_AMPLITUDE: f32 = 0.1;

/// Emissive hue ramp for levels below the mirrored root:
/// `hue = fract(level / MAX_LEVEL * HUE_SPAN + HUE_OFFSET)`.
pub const HUE_SPAN: f32 = 0.7;
pub const HUE_OFFSET: f32 = 0.5;
pub const EMISSIVE_INTENSITY: f32 = 0.8;

pub const FLOOR_SIZE: f32 = 20.0;
pub const FLOOR_HEIGHT: f32 = -3.0;
pub const FLOOR_COLOR: [f32; 3] = [0.53, 0.53, 0.53];

/// Decorative octahedra orbiting the installation.
pub const ORNAMENT_COUNT: usize = 6;
pub const ORNAMENT_RING_RADIUS: f32 = 3.0;
pub const ORNAMENT_SIZE: f32 = 0.3;

pub const AMBIENT_BRIGHTNESS: f32 = 50.0;

/// Directional light rig: position (aimed at the origin), colour, illuminance.
pub struct RigLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    pub illuminance: f32,
}

pub const LIGHT_RIG: [RigLight; 3] = [
    RigLight {
        position: [5.0, 5.0, 5.0],
        color: [1.0, 0.0, 1.0],
        illuminance: 8_000.0,
    },
    RigLight {
        position: [-5.0, -5.0, 5.0],
        color: [0.0, 1.0, 1.0],
        illuminance: 8_000.0,
    },
    RigLight {
        position: [0.0, 10.0, 0.0],
        color: [1.0, 1.0, 1.0],
        illuminance: 4_000.0,
    },
];
