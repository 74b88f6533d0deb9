use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_asset::RenderAssetUsages;
use constants::wave_field::{
    AMBIENT_BRIGHTNESS, POINT_LIGHT_INTENSITY, POINT_LIGHT_POSITION, WAVE_FIELD, WaveFieldConfig,
};

use crate::engine::core::scene_state::{RoomState, SurfaceAction, despawn_room};
use crate::engine::input::picking::{PickShape, PickSurface};

/// Marker for everything spawned by this room.
#[derive(Component)]
pub struct WaveFieldRoom;

/// The animated point lattice entity.
#[derive(Component)]
pub struct WaveFieldPoints;

/// Height of the wave surface at `(x, z)` and scaled time `t`. Pure; this is
/// the only place the wave function is defined.
pub fn wave_height(cfg: &WaveFieldConfig, x: f32, z: f32, t: f32) -> f32 {
    (cfg.frequency * (x.powi(3) + z * z + t)).sin() * cfg.amplitude
}

/// Lattice coordinate of sample `i`, centred so the field straddles the
/// origin. Generation and update both go through here so the x/z lattice
/// never drifts between the two paths.
pub fn lattice_coord(cfg: &WaveFieldConfig, i: usize) -> f32 {
    cfg.step * (i as f32 - cfg.count as f32 / 2.0)
}

/// Build the full lattice at scaled time `t`: `count * count` points in
/// row-major (x outer, z inner) order.
pub fn generate_positions(cfg: &WaveFieldConfig, t: f32) -> Vec<[f32; 3]> {
    let mut positions = Vec::with_capacity(cfg.count * cfg.count);
    for xi in 0..cfg.count {
        for zi in 0..cfg.count {
            let x = lattice_coord(cfg, xi);
            let z = lattice_coord(cfg, zi);
            positions.push([x, wave_height(cfg, x, z, t), z]);
        }
    }
    positions
}

/// Recompute every sample height in place for scaled time `t`. The x/z
/// lattice is rederived identically to generation; only y is written.
pub fn update_heights(cfg: &WaveFieldConfig, t: f32, positions: &mut [[f32; 3]]) {
    let mut i = 0;
    for xi in 0..cfg.count {
        for zi in 0..cfg.count {
            let x = lattice_coord(cfg, xi);
            let z = lattice_coord(cfg, zi);
            positions[i][1] = wave_height(cfg, x, z, t);
            i += 1;
        }
    }
}

/// Rigid yaw of the whole field; applied to the entity transform, never
/// baked into the point buffer.
pub fn rotation_angle(cfg: &WaveFieldConfig, elapsed: f32) -> f32 {
    elapsed * cfg.rotation_speed
}

pub struct WaveFieldRoomPlugin;

impl Plugin for WaveFieldRoomPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(RoomState::WaveField), spawn_wave_field)
            .add_systems(OnExit(RoomState::WaveField), despawn_room::<WaveFieldRoom>)
            .add_systems(
                Update,
                animate_wave_field.run_if(in_state(RoomState::WaveField)),
            );
    }
}

fn spawn_wave_field(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<AmbientLight>,
) {
    ambient.brightness = AMBIENT_BRIGHTNESS;

    let cfg = &WAVE_FIELD;
    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, generate_positions(cfg, 0.0));

    commands.spawn((
        WaveFieldRoom,
        WaveFieldPoints,
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(
                cfg.point_color[0],
                cfg.point_color[1],
                cfg.point_color[2],
            ),
            unlit: true,
            ..default()
        })),
        Transform::default(),
    ));

    // Invisible click surface covering the field footprint; any click inside
    // the room returns to the main scene.
    let extent = cfg.count as f32 * cfg.step;
    commands.spawn((
        WaveFieldRoom,
        Transform::default(),
        PickSurface {
            action: SurfaceAction::LeaveRoom,
            shape: PickShape::Cuboid(Vec3::new(extent, extent, 0.1)),
        },
    ));

    commands.spawn((
        WaveFieldRoom,
        PointLight {
            intensity: POINT_LIGHT_INTENSITY,
            range: 50.0,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(POINT_LIGHT_POSITION)),
    ));
}

/// Per-frame wave update: rewrite sample heights in the mesh position buffer
/// and yaw the field. Skips the frame if the mesh asset is not ready yet.
fn animate_wave_field(
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut points: Query<(&Mesh3d, &mut Transform), With<WaveFieldPoints>>,
) {
    let Ok((mesh_handle, mut transform)) = points.single_mut() else {
        return;
    };
    let Some(mesh) = meshes.get_mut(&mesh_handle.0) else {
        return;
    };
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    else {
        return;
    };

    let cfg = &WAVE_FIELD;
    let elapsed = time.elapsed_secs();
    update_heights(cfg, elapsed * cfg.time_multiplier, positions);
    transform.rotation = Quat::from_rotation_y(rotation_angle(cfg, elapsed));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> WaveFieldConfig {
        WaveFieldConfig {
            count: 8,
            ..WAVE_FIELD
        }
    }

    #[test]
    fn wave_is_pure() {
        let cfg = test_config();
        assert_eq!(
            wave_height(&cfg, 1.3, -0.7, 42.0).to_bits(),
            wave_height(&cfg, 1.3, -0.7, 42.0).to_bits()
        );
    }

    #[test]
    fn update_is_idempotent_at_fixed_time() {
        let cfg = test_config();
        let mut first = generate_positions(&cfg, 0.0);
        let mut second = first.clone();
        update_heights(&cfg, 37.5, &mut first);
        update_heights(&cfg, 37.5, &mut second);
        update_heights(&cfg, 37.5, &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn update_matches_generation_at_the_same_time() {
        let cfg = test_config();
        let generated = generate_positions(&cfg, 12.0);
        let mut updated = generate_positions(&cfg, 0.0);
        update_heights(&cfg, 12.0, &mut updated);
        assert_eq!(generated, updated);
    }

    #[test]
    fn lattice_never_drifts() {
        let cfg = test_config();
        let before = generate_positions(&cfg, 0.0);
        let mut after = before.clone();
        update_heights(&cfg, 99.0, &mut after);
        for (a, b) in before.iter().zip(after.iter()) {
            assert_eq!(a[0], b[0]);
            assert_eq!(a[2], b[2]);
        }
    }

    #[test]
    fn lattice_is_centred_on_the_origin() {
        let cfg = test_config();
        let first = lattice_coord(&cfg, 0);
        let last = lattice_coord(&cfg, cfg.count - 1);
        // Symmetric up to one step (even counts have no exact centre sample).
        assert!((first + last).abs() <= cfg.step + 1e-6);
    }

    #[test]
    fn heights_stay_within_amplitude() {
        let cfg = test_config();
        for point in generate_positions(&cfg, 55.0) {
            assert!(point[1].abs() <= cfg.amplitude + 1e-6);
        }
    }

    #[test]
    fn rotation_is_linear_in_time() {
        let cfg = test_config();
        assert_eq!(rotation_angle(&cfg, 0.0), 0.0);
        assert!(
            (rotation_angle(&cfg, 10.0) - 10.0 * cfg.rotation_speed).abs() < 1e-6
        );
    }
}
