use bevy::prelude::*;
use constants::main_scene::BACKDROP;

use super::MainSceneEntity;

#[derive(Component)]
pub struct Backdrop;

/// Spawn the emissive backdrop sphere behind the panel group.
pub fn spawn_backdrop(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::BLACK,
        emissive: pulse_color(0.0),
        unlit: true,
        ..default()
    });

    commands.spawn((
        MainSceneEntity,
        Backdrop,
        Mesh3d(meshes.add(Sphere::new(BACKDROP.radius).mesh().uv(64, 32))),
        MeshMaterial3d(material),
        Transform::from_translation(BACKDROP.position).with_scale(Vec3::splat(BACKDROP.scale)),
    ));
}

/// Blend of the two backdrop colours at elapsed time `t`, scaled to the
/// configured emissive intensity.
pub fn pulse_color(t: f32) -> LinearRgba {
    let pulse = (t * BACKDROP.pulse_speed).sin() * BACKDROP.pulse_amplitude + 0.5;
    let a = Vec3::from_array(BACKDROP.color_a);
    let b = Vec3::from_array(BACKDROP.color_b);
    let mixed = a.lerp(b, pulse.clamp(0.0, 1.0)) * BACKDROP.emissive_intensity;
    LinearRgba::rgb(mixed.x, mixed.y, mixed.z)
}

/// Pulse the emissive colour and counter-rotate the sphere.
pub fn animate_backdrop(
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut backdrop: Query<(&MeshMaterial3d<StandardMaterial>, &mut Transform), With<Backdrop>>,
) {
    let Ok((material_handle, mut transform)) = backdrop.single_mut() else {
        return;
    };
    let t = time.elapsed_secs();

    transform.rotation = Quat::from_euler(
        EulerRot::YXZ,
        t * BACKDROP.y_spin_speed,
        0.0,
        t * BACKDROP.z_spin_speed,
    );

    if let Some(material) = materials.get_mut(&material_handle.0) {
        material.emissive = pulse_color(t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_stays_within_the_two_colour_gamut() {
        let lo = Vec3::from_array(BACKDROP.color_a).min(Vec3::from_array(BACKDROP.color_b));
        let hi = Vec3::from_array(BACKDROP.color_a).max(Vec3::from_array(BACKDROP.color_b));
        for i in 0..200 {
            let c = pulse_color(i as f32 * 0.1);
            let v = Vec3::new(c.red, c.green, c.blue) / BACKDROP.emissive_intensity;
            assert!(v.cmpge(lo - Vec3::splat(1e-4)).all());
            assert!(v.cmple(hi + Vec3::splat(1e-4)).all());
        }
    }

    #[test]
    fn pulse_is_pure_in_time() {
        assert_eq!(pulse_color(3.7), pulse_color(3.7));
    }
}
