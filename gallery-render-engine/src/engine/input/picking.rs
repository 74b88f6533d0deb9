use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;
use constants::particles::POINTER_DEPTH;

use crate::engine::core::scene_state::{SurfaceAction, SurfaceClicked};

/// Analytic hit shape for a pick surface, in the entity's local space.
#[derive(Debug, Clone, Copy)]
pub enum PickShape {
    /// Full extents of a box centred on the entity.
    Cuboid(Vec3),
    Sphere(f32),
}

/// Tags an entity as clickable and names what the click means. The shape is
/// tested analytically; the entity needs no mesh and may be invisible.
#[derive(Component)]
pub struct PickSurface {
    pub action: SurfaceAction,
    pub shape: PickShape,
}

/// Cursor position projected into world space at a fixed depth along the
/// view ray. Written here once per frame, read by the particle room.
#[derive(Resource, Default)]
pub struct PointerWorld {
    pub position: Vec3,
}

/// Slab-method ray-OBB intersection through the entity transform.
/// Returns the entry distance along the ray, or `None` on a miss.
pub fn ray_hits_obb(origin: Vec3, dir: Vec3, xf: &GlobalTransform, size: Vec3) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o_local = inv.transform_point3(origin);
    let d_local = inv.transform_vector3(dir);
    let he = size * 0.5;
    ray_aabb_hit_t(o_local, d_local, -he, he)
}

/// Slab-method ray-AABB intersection, returns Some(t) or None.
pub fn ray_aabb_hit_t(ray_origin: Vec3, ray_direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let inv = Vec3::new(
        if ray_direction.x != 0.0 { 1.0 / ray_direction.x } else { f32::INFINITY },
        if ray_direction.y != 0.0 { 1.0 / ray_direction.y } else { f32::INFINITY },
        if ray_direction.z != 0.0 { 1.0 / ray_direction.z } else { f32::INFINITY },
    );

    let (mut tmin, mut tmax) = ((min.x - ray_origin.x) * inv.x, (max.x - ray_origin.x) * inv.x);
    if tmin > tmax { std::mem::swap(&mut tmin, &mut tmax); }

    let (mut tymin, mut tymax) = ((min.y - ray_origin.y) * inv.y, (max.y - ray_origin.y) * inv.y);
    if tymin > tymax { std::mem::swap(&mut tymin, &mut tymax); }

    if (tmin > tymax) || (tymin > tmax) { return None; }
    if tymin > tmin { tmin = tymin; }
    if tymax < tmax { tmax = tymax; }

    let (mut tzmin, mut tzmax) = ((min.z - ray_origin.z) * inv.z, (max.z - ray_origin.z) * inv.z);
    if tzmin > tzmax { std::mem::swap(&mut tzmin, &mut tzmax); }

    if (tmin > tzmax) || (tzmin > tmax) { return None; }
    if tzmin > tmin { tmin = tzmin; }
    if tzmax < tmax { tmax = tzmax; }

    if tmax < 0.0 { return None; }
    Some(if tmin >= 0.0 { tmin } else { tmax })
}

/// Ray-sphere intersection in the entity's local space (so a scaled entity
/// picks as an ellipsoid). Returns the nearest non-negative hit distance.
pub fn ray_hits_sphere(origin: Vec3, dir: Vec3, xf: &GlobalTransform, radius: f32) -> Option<f32> {
    let inv = xf.compute_matrix().inverse();
    let o = inv.transform_point3(origin);
    let d = inv.transform_vector3(dir);

    let a = d.dot(d);
    if a <= f32::EPSILON {
        return None;
    }
    let b = 2.0 * o.dot(d);
    let c = o.dot(o) - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let t0 = (-b - sqrt_d) / (2.0 * a);
    let t1 = (-b + sqrt_d) / (2.0 * a);
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}

fn hit_surface(origin: Vec3, dir: Vec3, xf: &GlobalTransform, shape: PickShape) -> Option<f32> {
    match shape {
        PickShape::Cuboid(size) => ray_hits_obb(origin, dir, xf, size),
        PickShape::Sphere(radius) => ray_hits_sphere(origin, dir, xf, radius),
    }
}

fn cursor_ray(
    windows: &Query<&Window, With<PrimaryWindow>>,
    camera_query: &Query<(&Camera, &GlobalTransform), With<Camera3d>>,
) -> Option<Ray3d> {
    let cursor_pos = windows.single().ok()?.cursor_position()?;
    let (camera, camera_transform) = camera_query.single().ok()?;
    camera.viewport_to_world(camera_transform, cursor_pos).ok()
}

/// Project the cursor to a fixed depth along the view ray. Single writer of
/// [`PointerWorld`]; when the cursor leaves the window the last position holds.
pub fn pointer_world_system(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    mut pointer: ResMut<PointerWorld>,
) {
    let Some(ray) = cursor_ray(&windows, &camera_query) else {
        return;
    };
    pointer.position = ray.origin + ray.direction * POINTER_DEPTH;
}

/// On left click, cast the cursor ray against every pick surface and emit
/// the semantic action of the nearest hit.
pub fn surface_click_system(
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    surfaces: Query<(&GlobalTransform, &PickSurface)>,
    mut clicks: EventWriter<SurfaceClicked>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    let Some(ray) = cursor_ray(&windows, &camera_query) else {
        return;
    };

    let mut nearest: Option<(f32, SurfaceAction)> = None;
    for (xf, surface) in &surfaces {
        if let Some(t) = hit_surface(ray.origin, *ray.direction, xf, surface.shape) {
            if nearest.map_or(true, |(best, _)| t < best) {
                nearest = Some((t, surface.action));
            }
        }
    }

    if let Some((_, action)) = nearest {
        clicks.write(SurfaceClicked { action });
    }
}

/// Swap the window cursor to a pointer while hovering any pick surface.
pub fn hover_cursor_system(
    mut commands: Commands,
    windows: Query<(Entity, &Window), With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera3d>>,
    surfaces: Query<(&GlobalTransform, &PickSurface)>,
    mut was_hovering: Local<bool>,
) {
    let Ok((window_entity, window)) = windows.single() else {
        return;
    };
    let hovering = window
        .cursor_position()
        .and_then(|cursor_pos| {
            let (camera, camera_transform) = camera_query.single().ok()?;
            camera.viewport_to_world(camera_transform, cursor_pos).ok()
        })
        .map(|ray| {
            surfaces
                .iter()
                .any(|(xf, surface)| hit_surface(ray.origin, *ray.direction, xf, surface.shape).is_some())
        })
        .unwrap_or(false);

    if hovering != *was_hovering {
        *was_hovering = hovering;
        let icon = if hovering {
            SystemCursorIcon::Pointer
        } else {
            SystemCursorIcon::Default
        };
        commands.entity(window_entity).insert(CursorIcon::from(icon));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_axis_aligned_box_head_on() {
        let xf = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -5.0));
        let t = ray_hits_obb(Vec3::ZERO, Vec3::NEG_Z, &xf, Vec3::new(2.0, 2.0, 2.0))
            .expect("ray aimed at box centre must hit");
        assert!((t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn ray_misses_box_to_the_side() {
        let xf = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -5.0));
        assert!(ray_hits_obb(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z, &xf, Vec3::ONE).is_none());
    }

    #[test]
    fn rotated_box_is_tested_in_its_own_frame() {
        // A thin slab rotated 90 degrees about Y presents its broad face.
        let xf = GlobalTransform::from(
            Transform::from_xyz(0.0, 0.0, -5.0)
                .with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2)),
        );
        let size = Vec3::new(4.0, 4.0, 0.2);
        assert!(ray_hits_obb(Vec3::new(1.5, 0.0, 0.0), Vec3::NEG_Z, &xf, size).is_none());
        assert!(ray_hits_obb(Vec3::ZERO, Vec3::NEG_Z, &xf, size).is_some());
    }

    #[test]
    fn ray_hits_sphere_and_reports_entry_distance() {
        let xf = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, -10.0));
        let t = ray_hits_sphere(Vec3::ZERO, Vec3::NEG_Z, &xf, 2.0)
            .expect("ray through sphere centre must hit");
        assert!((t - 8.0).abs() < 1e-3);
    }

    #[test]
    fn ray_behind_origin_does_not_hit() {
        let xf = GlobalTransform::from(Transform::from_xyz(0.0, 0.0, 5.0));
        assert!(ray_hits_sphere(Vec3::ZERO, Vec3::NEG_Z, &xf, 1.0).is_none());
        assert!(ray_hits_obb(Vec3::ZERO, Vec3::NEG_Z, &xf, Vec3::ONE).is_none());
    }
}
