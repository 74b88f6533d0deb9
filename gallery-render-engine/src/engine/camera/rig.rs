use bevy::prelude::*;
use constants::camera::{self, CameraTarget};

use crate::engine::core::scene_state::RoomId;

/// Named camera destination; resolves through the constants table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraTargetId {
    Main,
    Room(RoomId),
}

impl CameraTargetId {
    pub fn resolve(self) -> CameraTarget {
        match self {
            CameraTargetId::Main => camera::MAIN,
            CameraTargetId::Room(RoomId::WaveField) => camera::ROOM_WAVE_FIELD,
            CameraTargetId::Room(RoomId::Morph) => camera::ROOM_MORPH,
            CameraTargetId::Room(RoomId::Particles) => camera::ROOM_PARTICLES,
            CameraTargetId::Room(RoomId::Fractal) => camera::ROOM_FRACTAL,
        }
    }
}

/// Command to begin flying the camera toward a named target.
#[derive(Event)]
pub struct CameraRetargetEvent {
    pub target: CameraTargetId,
}

struct Flight {
    from_position: Vec3,
    from_fov_degrees: f32,
    target: CameraTarget,
    elapsed: f32,
}

/// Resource owning the camera interpolation. A retarget mid-flight restarts
/// from the camera's live pose; stale targets are never queued.
#[derive(Resource, Default)]
pub struct CameraRig {
    flight: Option<Flight>,
}

/// One interpolated camera pose: world position plus fov in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub fov_degrees: f32,
}

impl CameraRig {
    pub fn retarget(&mut self, live_position: Vec3, live_fov_degrees: f32, target: CameraTarget) {
        self.flight = Some(Flight {
            from_position: live_position,
            from_fov_degrees: live_fov_degrees,
            target,
            elapsed: 0.0,
        });
    }

    pub fn in_flight(&self) -> bool {
        self.flight.is_some()
    }

    /// Advance the flight by `dt` seconds. Returns the pose to apply this
    /// frame, or `None` when no flight is active. On completion the returned
    /// pose equals the target exactly, with no residual drift.
    pub fn advance(&mut self, dt: f32) -> Option<CameraPose> {
        let flight = self.flight.as_mut()?;
        flight.elapsed += dt;
        let t = (flight.elapsed / camera::FLIGHT_DURATION).min(1.0);

        let pose = if t >= 1.0 {
            CameraPose {
                position: flight.target.position,
                fov_degrees: flight.target.fov_degrees,
            }
        } else {
            CameraPose {
                position: flight
                    .from_position
                    .lerp(flight.target.position, ease_in_out_cubic(t)),
                // The fov runs its own parallel track with a softer curve.
                fov_degrees: flight.from_fov_degrees
                    + (flight.target.fov_degrees - flight.from_fov_degrees) * ease_out_quad(t),
            }
        };

        if t >= 1.0 {
            self.flight = None;
        }
        Some(pose)
    }
}

/// Slow-fast-slow cubic, `f(0) = 0`, `f(1) = 1`, zero slope at both ends.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Fast start, decelerating finish.
pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Restart the flight toward the most recent retarget, reading the camera's
/// live transform and projection so a mid-flight retarget never snaps.
pub fn camera_retarget_system(
    mut retargets: EventReader<CameraRetargetEvent>,
    mut rig: ResMut<CameraRig>,
    camera_query: Query<(&Transform, &Projection), With<Camera3d>>,
) {
    let Some(event) = retargets.read().last() else {
        return;
    };
    let Ok((transform, projection)) = camera_query.single() else {
        return;
    };
    let live_fov = match projection {
        Projection::Perspective(perspective) => perspective.fov.to_degrees(),
        _ => event.target.resolve().fov_degrees,
    };
    rig.retarget(transform.translation, live_fov, event.target.resolve());
}

/// Apply the current flight pose to the camera. Writing the perspective fov
/// re-derives the projection matrix on the same frame.
pub fn camera_flight_system(
    time: Res<Time>,
    mut rig: ResMut<CameraRig>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<Camera3d>>,
) {
    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };
    let Some(pose) = rig.advance(time.delta_secs()) else {
        return;
    };
    transform.translation = pose.position;
    if let Projection::Perspective(perspective) = projection.as_mut() {
        perspective.fov = pose.fov_degrees.to_radians();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 60.0;

    fn fly_to_completion(rig: &mut CameraRig) -> CameraPose {
        let mut last = None;
        for _ in 0..400 {
            match rig.advance(STEP) {
                Some(pose) => last = Some(pose),
                None => break,
            }
        }
        last.expect("flight should have produced at least one pose")
    }

    #[test]
    fn easing_curves_hit_their_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        assert_eq!(ease_out_quad(0.0), 0.0);
        assert_eq!(ease_out_quad(1.0), 1.0);
    }

    #[test]
    fn completed_flight_lands_exactly_on_target() {
        let mut rig = CameraRig::default();
        rig.retarget(Vec3::new(0.0, 0.0, 15.0), 49.0, camera::ROOM_PARTICLES);
        let final_pose = fly_to_completion(&mut rig);
        assert_eq!(final_pose.position, camera::ROOM_PARTICLES.position);
        assert_eq!(final_pose.fov_degrees, camera::ROOM_PARTICLES.fov_degrees);
        assert!(!rig.in_flight());
    }

    #[test]
    fn retarget_mid_flight_restarts_from_live_pose() {
        let mut rig = CameraRig::default();
        rig.retarget(Vec3::new(0.0, 0.0, 15.0), 49.0, camera::ROOM_MORPH);

        // Partway through the first flight.
        let mut mid = CameraPose {
            position: Vec3::ZERO,
            fov_degrees: 0.0,
        };
        for _ in 0..20 {
            mid = rig.advance(STEP).expect("flight still active");
        }

        rig.retarget(mid.position, mid.fov_degrees, camera::MAIN);
        let first = rig.advance(STEP).expect("new flight active");

        // The first pose of the new flight stays near the live pose rather
        // than snapping toward either endpoint.
        assert!(first.position.distance(mid.position) < 0.5);
        assert!((first.fov_degrees - mid.fov_degrees).abs() < 2.0);

        let final_pose = fly_to_completion(&mut rig);
        assert_eq!(final_pose.position, camera::MAIN.position);
        assert_eq!(final_pose.fov_degrees, camera::MAIN.fov_degrees);
    }

    #[test]
    fn flight_moves_monotonically_between_endpoints() {
        let mut rig = CameraRig::default();
        let start = Vec3::new(0.0, 0.0, 15.0);
        rig.retarget(start, 49.0, camera::ROOM_WAVE_FIELD);

        let total = start.distance(camera::ROOM_WAVE_FIELD.position);
        let mut previous_remaining = total;
        while let Some(pose) = rig.advance(STEP) {
            let remaining = pose.position.distance(camera::ROOM_WAVE_FIELD.position);
            assert!(remaining <= previous_remaining + 1e-4);
            previous_remaining = remaining;
        }
        assert!(previous_remaining < 1e-6);
    }

    #[test]
    fn every_target_id_resolves() {
        assert_eq!(CameraTargetId::Main.resolve(), camera::MAIN);
        assert_eq!(
            CameraTargetId::Room(RoomId::WaveField).resolve(),
            camera::ROOM_WAVE_FIELD
        );
        assert_eq!(
            CameraTargetId::Room(RoomId::Fractal).resolve(),
            camera::ROOM_FRACTAL
        );
    }
}
