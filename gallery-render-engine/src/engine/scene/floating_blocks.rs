use bevy::prelude::*;
use constants::main_scene::{BLOCK_ANIMATION, BLOCK_GROUP_POSITION, BLOCKS};

use super::MainSceneEntity;
use crate::engine::core::scene_state::{RoomId, SurfaceAction};
use crate::engine::input::picking::{PickShape, PickSurface};

/// One navigation panel; `index` selects its tuning row and phase offset.
#[derive(Component)]
pub struct FloatingBlock {
    pub index: usize,
}

/// Spawn the four glass navigation panels as children of a shared group
/// anchor, each tagged with the room it opens.
pub fn spawn_floating_blocks(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let glass = materials.add(StandardMaterial {
        base_color: Color::srgba(0.85, 0.92, 1.0, 0.35),
        alpha_mode: AlphaMode::Blend,
        specular_transmission: 0.97,
        thickness: 1.2,
        perceptual_roughness: 0.2,
        clearcoat: 1.0,
        double_sided: true,
        cull_mode: None,
        ..default()
    });

    commands
        .spawn((
            MainSceneEntity,
            Transform::from_translation(BLOCK_GROUP_POSITION),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for (index, block) in BLOCKS.iter().enumerate() {
                let Some(room) = RoomId::from_index(index) else {
                    continue;
                };
                parent.spawn((
                    FloatingBlock { index },
                    Mesh3d(meshes.add(Cuboid::new(block.size.x, block.size.y, block.size.z))),
                    MeshMaterial3d(glass.clone()),
                    Transform::from_translation(block.base_position),
                    PickSurface {
                        action: SurfaceAction::OpenRoom(room),
                        shape: PickShape::Cuboid(block.size),
                    },
                ));
            }
        });
}

/// Idle animation: shared horizontal sway, per-panel bob and tilt. Panels
/// never drift from their rest position; every offset is recomputed from
/// elapsed time each frame.
pub fn animate_floating_blocks(
    time: Res<Time>,
    mut blocks: Query<(&FloatingBlock, &mut Transform)>,
) {
    let t = time.elapsed_secs();
    let anim = &BLOCK_ANIMATION;
    let sway = (t * anim.horizontal_speed).sin() * anim.horizontal_amplitude;

    for (block, mut transform) in &mut blocks {
        let Some(config) = BLOCKS.get(block.index) else {
            continue;
        };
        let phase = block.index as f32;

        let bob =
            (t * anim.vertical_speed + phase * anim.vertical_offset).sin() * anim.vertical_amplitude;
        let tilt_x =
            (t * anim.rotation_speed + phase * anim.phase_offset).sin() * anim.rotation_amplitude;
        let tilt_z =
            (t * anim.horizontal_speed + phase * anim.phase_offset).cos() * anim.rotation_amplitude;

        transform.translation.x = config.base_position.x + sway;
        transform.translation.y = config.base_position.y + bob;
        transform.rotation = Quat::from_euler(EulerRot::XYZ, tilt_x, 0.0, tilt_z);
    }
}
