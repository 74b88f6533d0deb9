use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_asset::RenderAssetUsages;
use constants::particles::{
    AMBIENT_BRIGHTNESS, BAND_COLORS, DISTANCE_EPSILON, FILL_LIGHT_COLOR, FILL_LIGHT_INTENSITY,
    FILL_LIGHT_POSITION, KEY_LIGHT_INTENSITY, KEY_LIGHT_POSITION, PARTICLES, ParticleConfig,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::core::scene_state::{RoomState, SurfaceAction, despawn_room};
use crate::engine::input::picking::{PickShape, PickSurface, PointerWorld};

#[derive(Component)]
pub struct ParticleRoom;

/// Per-particle state that lives outside the mesh: velocities are integrated
/// every frame, colours and sizes are fixed at spawn. Buffer lengths never
/// change for the room's lifetime and the per-frame path never allocates.
#[derive(Component)]
pub struct ParticleMotion {
    pub velocities: Vec<Vec3>,
    pub sizes: Vec<f32>,
}

/// Freshly sampled swarm: positions uniform in a sphere (inverse-transform
/// sampling), small random velocities, index-gradient colours.
pub struct ParticleSpawn {
    pub positions: Vec<[f32; 3]>,
    pub velocities: Vec<Vec3>,
    pub colors: Vec<[f32; 4]>,
    pub sizes: Vec<f32>,
}

pub fn spawn_particles(cfg: &ParticleConfig, rng: &mut impl Rng) -> ParticleSpawn {
    let mut positions = Vec::with_capacity(cfg.count);
    let mut velocities = Vec::with_capacity(cfg.count);
    let mut colors = Vec::with_capacity(cfg.count);
    let mut sizes = Vec::with_capacity(cfg.count);

    for i in 0..cfg.count {
        let theta = rng.gen_range(0.0..std::f32::consts::TAU);
        let phi = rng.gen_range(-1.0f32..1.0).acos();
        let r = rng.gen_range(0.0..cfg.radius);
        positions.push([
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        ]);

        velocities.push(Vec3::new(
            rng.gen_range(-0.5..0.5) * cfg.speed,
            rng.gen_range(-0.5..0.5) * cfg.speed,
            rng.gen_range(-0.5..0.5) * cfg.speed,
        ));

        let [red, green, blue] = band_color(i, cfg.count);
        colors.push([red, green, blue, 1.0]);

        sizes.push(rng.gen_range(cfg.size_min..cfg.size_min + cfg.size_range));
    }

    ParticleSpawn {
        positions,
        velocities,
        colors,
        sizes,
    }
}

/// Index-gradient colour: three bands over the particle range, each blending
/// from the previous band's colour into its own.
pub fn band_color(index: usize, count: usize) -> [f32; 3] {
    let t = index as f32 / count.max(1) as f32;
    let band = ((t * 3.0) as usize).min(2);
    let local = (t * 3.0 - band as f32).clamp(0.0, 1.0);

    let from = Vec3::from_array(BAND_COLORS[(band + 2) % 3]);
    let into = Vec3::from_array(BAND_COLORS[band]);
    from.lerp(into, local).to_array()
}

/// One integration step: central gravity, pointer attraction, damping, Euler
/// integrate. Both force denominators are floored so coincident points never
/// produce NaN or infinite velocities.
pub fn step_particles(
    cfg: &ParticleConfig,
    positions: &mut [[f32; 3]],
    velocities: &mut [Vec3],
    pointer: Vec3,
) {
    for (position, velocity) in positions.iter_mut().zip(velocities.iter_mut()) {
        let p = Vec3::from_array(*position);

        // Gravity toward the origin, falling off with squared distance.
        let to_centre = -p;
        let dist = to_centre.length().max(DISTANCE_EPSILON);
        *velocity += to_centre * (cfg.gravity / (dist * dist + 1.0));

        // Attraction toward the pointer's world position.
        let to_pointer = pointer - p;
        let pointer_dist = to_pointer.length().max(DISTANCE_EPSILON);
        *velocity += to_pointer * (cfg.attraction / (pointer_dist * pointer_dist + 2.0));

        *velocity *= cfg.damping;
        *position = (p + *velocity).to_array();
    }
}

pub struct ParticleRoomPlugin;

impl Plugin for ParticleRoomPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(RoomState::Particles), spawn_particle_room)
            .add_systems(OnExit(RoomState::Particles), despawn_room::<ParticleRoom>)
            .add_systems(
                Update,
                animate_particles.run_if(in_state(RoomState::Particles)),
            );
    }
}

fn spawn_particle_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<AmbientLight>,
) {
    ambient.brightness = AMBIENT_BRIGHTNESS;

    let cfg = &PARTICLES;
    let mut rng = StdRng::from_entropy();
    let spawn = spawn_particles(cfg, &mut rng);

    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, spawn.positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, spawn.colors);

    commands.spawn((
        ParticleRoom,
        ParticleMotion {
            velocities: spawn.velocities,
            sizes: spawn.sizes,
        },
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, 0.9),
            alpha_mode: AlphaMode::Add,
            unlit: true,
            ..default()
        })),
        Transform::default(),
    ));

    // Clicking anywhere inside the swarm volume leaves the room.
    commands.spawn((
        ParticleRoom,
        Transform::default(),
        PickSurface {
            action: SurfaceAction::LeaveRoom,
            shape: PickShape::Sphere(cfg.radius),
        },
    ));

    commands.spawn((
        ParticleRoom,
        PointLight {
            intensity: KEY_LIGHT_INTENSITY,
            range: 40.0,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(KEY_LIGHT_POSITION)),
    ));
    commands.spawn((
        ParticleRoom,
        PointLight {
            intensity: FILL_LIGHT_INTENSITY,
            range: 40.0,
            color: Color::srgb(
                FILL_LIGHT_COLOR[0],
                FILL_LIGHT_COLOR[1],
                FILL_LIGHT_COLOR[2],
            ),
            ..default()
        },
        Transform::from_translation(Vec3::from_array(FILL_LIGHT_POSITION)),
    ));
}

/// Integrate the swarm against the pointer's current world position. The
/// mesh position buffer is the canonical particle position store; it is
/// mutated in place and never reallocated.
fn animate_particles(
    pointer: Res<PointerWorld>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut swarm: Query<(&Mesh3d, &mut ParticleMotion), With<ParticleRoom>>,
) {
    let Ok((mesh_handle, mut motion)) = swarm.single_mut() else {
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

    step_particles(
        &PARTICLES,
        positions,
        &mut motion.velocities,
        pointer.position,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idle_config() -> ParticleConfig {
        ParticleConfig {
            count: 64,
            gravity: 0.0,
            attraction: 0.0,
            ..PARTICLES
        }
    }

    #[test]
    fn spawn_respects_count_and_radius() {
        let cfg = ParticleConfig {
            count: 500,
            ..PARTICLES
        };
        let mut rng = StdRng::seed_from_u64(7);
        let spawn = spawn_particles(&cfg, &mut rng);
        assert_eq!(spawn.positions.len(), cfg.count);
        assert_eq!(spawn.velocities.len(), cfg.count);
        assert_eq!(spawn.colors.len(), cfg.count);
        assert_eq!(spawn.sizes.len(), cfg.count);
        for p in &spawn.positions {
            assert!(Vec3::from_array(*p).length() <= cfg.radius + 1e-4);
        }
        for s in &spawn.sizes {
            assert!(*s >= cfg.size_min && *s <= cfg.size_min + cfg.size_range + 1e-6);
        }
    }

    #[test]
    fn spawn_velocities_stay_within_the_half_speed_range() {
        let cfg = ParticleConfig {
            count: 400,
            ..PARTICLES
        };
        let mut rng = StdRng::seed_from_u64(19);
        let spawn = spawn_particles(&cfg, &mut rng);
        for velocity in &spawn.velocities {
            assert!(velocity.x.abs() <= cfg.speed * 0.5);
            assert!(velocity.y.abs() <= cfg.speed * 0.5);
            assert!(velocity.z.abs() <= cfg.speed * 0.5);
        }
    }

    #[test]
    fn idle_velocities_decay_toward_zero() {
        let cfg = idle_config();
        let mut rng = StdRng::seed_from_u64(11);
        let mut spawn = spawn_particles(&cfg, &mut rng);

        let mut previous: Vec<f32> = spawn.velocities.iter().map(|v| v.length()).collect();
        for _ in 0..200 {
            step_particles(&cfg, &mut spawn.positions, &mut spawn.velocities, Vec3::ZERO);
            for (velocity, last) in spawn.velocities.iter().zip(previous.iter_mut()) {
                let speed = velocity.length();
                if *last > 0.0 {
                    assert!(speed < *last, "damping below 1 must shrink speed");
                }
                *last = speed;
            }
        }
        // After many idle frames the swarm is essentially at rest.
        assert!(spawn.velocities.iter().all(|v| v.length() < cfg.speed * 0.1));
    }

    #[test]
    fn buffers_never_change_length() {
        let cfg = ParticleConfig {
            count: 128,
            ..PARTICLES
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut spawn = spawn_particles(&cfg, &mut rng);
        for _ in 0..50 {
            step_particles(
                &cfg,
                &mut spawn.positions,
                &mut spawn.velocities,
                Vec3::new(1.0, 2.0, 3.0),
            );
        }
        assert_eq!(spawn.positions.len(), cfg.count);
        assert_eq!(spawn.velocities.len(), cfg.count);
    }

    #[test]
    fn coincident_points_stay_finite() {
        let cfg = ParticleConfig {
            count: 1,
            ..PARTICLES
        };
        // Particle exactly at the origin with the pointer on top of it: both
        // force denominators bottom out at the epsilon floor.
        let mut positions = vec![[0.0, 0.0, 0.0]];
        let mut velocities = vec![Vec3::ZERO];
        for _ in 0..10 {
            step_particles(&cfg, &mut positions, &mut velocities, Vec3::ZERO);
            assert!(velocities[0].is_finite());
            assert!(Vec3::from_array(positions[0]).is_finite());
        }
    }

    #[test]
    fn pointer_attraction_pulls_particles_in() {
        let cfg = ParticleConfig {
            count: 1,
            gravity: 0.0,
            ..PARTICLES
        };
        let pointer = Vec3::new(5.0, 0.0, 0.0);
        let mut positions = vec![[0.0, 0.0, 0.0]];
        let mut velocities = vec![Vec3::ZERO];
        let start = pointer.distance(Vec3::from_array(positions[0]));
        for _ in 0..100 {
            step_particles(&cfg, &mut positions, &mut velocities, pointer);
        }
        assert!(pointer.distance(Vec3::from_array(positions[0])) < start);
    }

    #[test]
    fn band_colors_land_on_their_band_at_band_end() {
        let count = 300;
        // Final index of each band sits at the band's own colour.
        for band in 0..3 {
            let last_in_band = (count / 3) * (band + 1) - 1;
            let color = Vec3::from_array(band_color(last_in_band, count));
            let target = Vec3::from_array(BAND_COLORS[band]);
            assert!(color.distance(target) < 0.05, "band {band}");
        }
    }

    #[test]
    fn band_color_components_stay_in_unit_range() {
        for i in 0..100 {
            for channel in band_color(i, 100) {
                assert!((0.0..=1.0).contains(&channel));
            }
        }
    }
}
