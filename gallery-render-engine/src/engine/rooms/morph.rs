use bevy::prelude::*;
use constants::morph::{
    AMBIENT_BRIGHTNESS, CYCLE_DURATION, POINT_LIGHT_INTENSITY, POINT_LIGHT_POSITION, PRIMITIVES,
    SCALE_MAX, SCALE_MIN,
};

use crate::engine::core::scene_state::{RoomState, SurfaceAction, despawn_room};
use crate::engine::input::picking::{PickShape, PickSurface};

#[derive(Component)]
pub struct MorphRoom;

/// One of the three cross-fading primitives, in cycle order.
#[derive(Component)]
pub struct MorphPrimitive {
    pub index: usize,
}

/// Cross-fade phase at `elapsed` seconds: which third of the cycle we are in
/// (0 = A->B, 1 = B->C, 2 = C->A) and the position inside it.
pub fn phase_at(elapsed: f32, cycle_duration: f32) -> (usize, f32) {
    let cycle_pos = elapsed.rem_euclid(cycle_duration) / cycle_duration;
    let scaled = cycle_pos * 3.0;
    let phase = (scaled as usize).min(2);
    (phase, scaled - phase as f32)
}

/// Hermite smoothstep; zero slope at both ends, so opacity and scale have no
/// velocity discontinuity at phase boundaries.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Visual state of the three primitives at one instant. Derived entirely
/// from elapsed time; replaying a time replays the exact same frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphFrame {
    pub opacities: [f32; 3],
    pub scales: [f32; 3],
}

pub fn frame_at(elapsed: f32, cycle_duration: f32) -> MorphFrame {
    let (phase, local) = phase_at(elapsed, cycle_duration);
    let smooth = smoothstep(local);

    let outgoing = phase;
    let incoming = (phase + 1) % 3;

    let mut opacities = [0.0; 3];
    opacities[outgoing] = 1.0 - smooth;
    opacities[incoming] = smooth;

    // Scale shadows opacity: invisible primitives rest at the small end.
    let scales = opacities.map(|o| SCALE_MIN + (SCALE_MAX - SCALE_MIN) * o);

    MorphFrame { opacities, scales }
}

pub struct MorphRoomPlugin;

impl Plugin for MorphRoomPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(RoomState::Morph), spawn_morph_room)
            .add_systems(OnExit(RoomState::Morph), despawn_room::<MorphRoom>)
            .add_systems(Update, animate_morph.run_if(in_state(RoomState::Morph)));
    }
}

fn spawn_morph_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<AmbientLight>,
) {
    ambient.brightness = AMBIENT_BRIGHTNESS;

    let primitive_meshes = [
        meshes.add(Cuboid::new(1.2, 1.2, 1.2)),
        meshes.add(Sphere::new(0.8).mesh().uv(32, 18)),
        meshes.add(Torus::new(0.3, 0.8)),
    ];

    for (index, mesh) in primitive_meshes.into_iter().enumerate() {
        let color = PRIMITIVES[index].color;
        commands.spawn((
            MorphRoom,
            MorphPrimitive { index },
            Mesh3d(mesh),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgba(color[0], color[1], color[2], 0.0),
                alpha_mode: AlphaMode::Blend,
                perceptual_roughness: 0.1,
                clearcoat: 1.0,
                ..default()
            })),
            Transform::default(),
        ));
    }

    // The whole room body is the back surface.
    commands.spawn((
        MorphRoom,
        Transform::default(),
        PickSurface {
            action: SurfaceAction::LeaveRoom,
            shape: PickShape::Sphere(2.5),
        },
    ));

    commands.spawn((
        MorphRoom,
        PointLight {
            intensity: POINT_LIGHT_INTENSITY,
            range: 30.0,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(POINT_LIGHT_POSITION)),
    ));
}

/// Drive opacity, scale and the continuous per-primitive spin from elapsed
/// time. Stateless across frames; the frame is a function of the clock.
fn animate_morph(
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut primitives: Query<(
        &MorphPrimitive,
        &MeshMaterial3d<StandardMaterial>,
        &mut Transform,
    )>,
) {
    let elapsed = time.elapsed_secs();
    let frame = frame_at(elapsed, CYCLE_DURATION);

    for (primitive, material_handle, mut transform) in &mut primitives {
        let index = primitive.index;
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = material.base_color.with_alpha(frame.opacities[index]);
        }

        transform.scale = Vec3::splat(frame.scales[index]);
        let spin = PRIMITIVES[index].spin;
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            elapsed * spin[0],
            elapsed * spin[1],
            elapsed * spin[2],
        );
    }
}
