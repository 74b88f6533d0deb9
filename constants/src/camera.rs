use bevy::math::Vec3;

/// A named destination for the camera rig: where to sit and how wide to look.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTarget {
    pub position: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
}

pub const MAIN: CameraTarget = CameraTarget {
    position: Vec3::new(0.0, 0.0, 15.0),
    fov_degrees: 49.0,
};

/// Wave field: close in for a good view of the point lattice.
pub const ROOM_WAVE_FIELD: CameraTarget = CameraTarget {
    position: Vec3::new(0.0, 0.0, 6.0),
    fov_degrees: 60.0,
};

/// Morph sequence: closer still, the primitives are small.
pub const ROOM_MORPH: CameraTarget = CameraTarget {
    position: Vec3::new(0.0, 0.0, 5.0),
    fov_degrees: 65.0,
};

/// Particle swarm: wide angle to keep the whole cloud in frame.
pub const ROOM_PARTICLES: CameraTarget = CameraTarget {
    position: Vec3::new(0.0, 0.0, 8.0),
    fov_degrees: 75.0,
};

/// Recursive installation: slightly elevated vantage point.
pub const ROOM_FRACTAL: CameraTarget = CameraTarget {
    position: Vec3::new(0.0, 2.0, 7.0),
    fov_degrees: 70.0,
};

/// Duration of a camera flight between targets, in seconds. The field of
/// view track runs over the same span with its own easing.
pub const FLIGHT_DURATION: f32 = 1.5;

pub const NEAR_PLANE: f32 = 0.9;
pub const FAR_PLANE: f32 = 50.0;
