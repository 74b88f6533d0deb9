use bevy::math::Vec3;

/// Enclosing shell of the navigation scene: floor, ceiling and three walls
/// (the near side stays open for the camera).
pub struct ShellConfig {
    pub size: f32,
    pub wall_thickness: f32,
    pub wall_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
}

pub const SHELL: ShellConfig = ShellConfig {
    size: 15.0,
    wall_thickness: 0.3,
    wall_color: [0.753, 0.753, 0.753],
    metalness: 0.1,
    roughness: 0.5,
};

/// One floating navigation panel: rest position and slab dimensions.
pub struct BlockConfig {
    pub base_position: Vec3,
    pub size: Vec3,
}

/// The four clickable panels, one per room, in room order.
pub const BLOCKS: &[BlockConfig] = &[
    BlockConfig {
        base_position: Vec3::new(-3.0, 3.0, -5.0),
        size: Vec3::new(5.0, 5.0, 0.3),
    },
    BlockConfig {
        base_position: Vec3::new(3.0, 3.0, -6.0),
        size: Vec3::new(6.0, 6.0, 0.3),
    },
    BlockConfig {
        base_position: Vec3::new(-3.0, -3.0, -4.0),
        size: Vec3::new(4.5, 4.5, 0.3),
    },
    BlockConfig {
        base_position: Vec3::new(3.0, -3.0, -5.0),
        size: Vec3::new(5.0, 5.0, 0.3),
    },
];

/// Idle animation for the panel group. All panels share the horizontal sway;
/// the vertical bob and tilt are phase-shifted per panel index.
pub struct BlockAnimationConfig {
    pub horizontal_speed: f32,
    pub vertical_speed: f32,
    pub rotation_speed: f32,
    pub horizontal_amplitude: f32,
    pub vertical_amplitude: f32,
    pub rotation_amplitude: f32,
    pub vertical_offset: f32,
    pub phase_offset: f32,
}

pub const BLOCK_ANIMATION: BlockAnimationConfig = BlockAnimationConfig {
    horizontal_speed: 0.3,
    vertical_speed: 0.5,
    rotation_speed: 0.2,
    horizontal_amplitude: 0.5,
    vertical_amplitude: 0.5,
    rotation_amplitude: 0.1,
    vertical_offset: 2.0,
    phase_offset: 1.0,
};

/// Panels sit in front of the shell's back wall, pushed toward the camera.
pub const BLOCK_GROUP_POSITION: Vec3 = Vec3::new(0.0, 0.0, 6.0);

/// Pulsing emissive backdrop sphere behind the panels.
pub struct BackdropConfig {
    pub radius: f32,
    pub scale: f32,
    pub position: Vec3,
    pub color_a: [f32; 3],
    pub color_b: [f32; 3],
    pub pulse_speed: f32,
    pub pulse_amplitude: f32,
    pub y_spin_speed: f32,
    pub z_spin_speed: f32,
    pub emissive_intensity: f32,
}

pub const BACKDROP: BackdropConfig = BackdropConfig {
    radius: 1.0,
    scale: 5.0,
    position: Vec3::new(0.0, 0.0, -2.0),
    // Cyan-green to violet.
    color_a: [0.133, 0.902, 0.725],
    color_b: [0.459, 0.145, 0.725],
    pulse_speed: 0.5,
    pulse_amplitude: 0.5,
    y_spin_speed: 0.1,
    z_spin_speed: -0.1,
    emissive_intensity: 1.2,
};
