use bevy::prelude::*;
use constants::main_scene::SHELL;

use super::MainSceneEntity;

/// Spawn the enclosing shell: floor, ceiling, back wall and both side walls.
/// The near side stays open so the camera looks into the box.
pub fn spawn_room_shell(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<AmbientLight>,
) {
    ambient.brightness = 120.0;

    let half = SHELL.size / 2.0;
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(
            SHELL.wall_color[0],
            SHELL.wall_color[1],
            SHELL.wall_color[2],
        ),
        metallic: SHELL.metalness,
        perceptual_roughness: SHELL.roughness,
        ..default()
    });

    // Horizontal slabs are thin on Y, the back wall on Z, side walls on X.
    let horizontal = meshes.add(Cuboid::new(SHELL.size, SHELL.wall_thickness, SHELL.size));
    let back = meshes.add(Cuboid::new(SHELL.size, SHELL.size, SHELL.wall_thickness));
    let side = meshes.add(Cuboid::new(SHELL.wall_thickness, SHELL.size, SHELL.size));

    let panels = [
        (horizontal.clone(), Vec3::new(0.0, -half, 0.0)),
        (horizontal, Vec3::new(0.0, half, 0.0)),
        (back, Vec3::new(0.0, 0.0, -half)),
        (side.clone(), Vec3::new(half, 0.0, 0.0)),
        (side, Vec3::new(-half, 0.0, 0.0)),
    ];

    for (mesh, position) in panels {
        commands.spawn((
            MainSceneEntity,
            Mesh3d(mesh),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(position),
        ));
    }

    commands.spawn((
        MainSceneEntity,
        PointLight {
            intensity: 1_500_000.0,
            range: 40.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, half - 1.0, 4.0),
    ));
}
