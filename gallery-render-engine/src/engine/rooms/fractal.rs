use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use constants::fractal::{
    AMBIENT_BRIGHTNESS, BASE_ROTATION_SPEED, BASE_SCALE, EMISSIVE_INTENSITY, FANOUT, FLOOR_COLOR,
    FLOOR_HEIGHT, FLOOR_SIZE, GROUP_SPIN, HUE_OFFSET, HUE_SPAN, LIGHT_RIG, MAX_LEVEL, MESH_SPIN,
    ORNAMENT_COUNT, ORNAMENT_RING_RADIUS, ORNAMENT_SIZE, RING_RADIUS_FACTOR, SCENE_PITCH_AMPLITUDE,
    SCENE_PITCH_SPEED, SCENE_YAW_SPEED, SHRINK_FACTOR,
};

use crate::engine::core::scene_state::{RoomState, SurfaceAction, despawn_room};
use crate::engine::input::picking::{PickShape, PickSurface};

#[derive(Component)]
pub struct FractalRoom;

/// Root anchor of the installation; carries the slow whole-scene sway.
#[derive(Component)]
pub struct FractalSceneRoot;

/// Outer spin frame of one node.
#[derive(Component)]
pub struct FractalGroup {
    pub level: u32,
}

/// Inner counter-spin frame of one node; the render mesh and the child
/// groups hang off this, so children inherit both spins of their parent.
#[derive(Component)]
pub struct FractalSpinner {
    pub level: u32,
}

/// Rendering treatment of a node, fixed at build time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualRole {
    /// Root level: fully reflective finish.
    Mirror,
    /// Deeper levels: emissive, hue derived from the level.
    Emissive { hue: f32 },
}

/// One node of the recursive installation. Topology is fixed after build;
/// only transforms mutate per frame.
pub struct FractalNode {
    pub level: u32,
    /// Offset from the parent node, on the parametrized ring.
    pub position: Vec3,
    /// Euler angles the node is seeded with at build time.
    pub base_rotation: Vec3,
    pub scale: f32,
    pub role: VisualRole,
    pub children: Vec<usize>,
}

/// Flat arena of nodes, parent-before-children. Built once at room mount,
/// traversed once by the renderer to spawn the entity hierarchy.
pub struct FractalArena {
    pub nodes: Vec<FractalNode>,
}

/// Total node count for a tree of the given depth: `sum(FANOUT^l)` over
/// `l in 0..=max_level`.
pub fn node_count(max_level: u32) -> usize {
    (0..=max_level).map(|level| FANOUT.pow(level)).sum()
}

/// Angular speed of a node's spin. The root turns fastest; each level down
/// sheds one multiple of the base rate until the leaves sit at exactly
/// `BASE_ROTATION_SPEED`.
pub fn spin_speed(level: u32, max_level: u32) -> f32 {
    BASE_ROTATION_SPEED * (max_level - level + 1) as f32
}

/// Hue for an emissive node, wrapped into [0, 1).
pub fn emissive_hue(level: u32, max_level: u32) -> f32 {
    (level as f32 / max_level.max(1) as f32 * HUE_SPAN + HUE_OFFSET).fract()
}

fn visual_role(level: u32, max_level: u32) -> VisualRole {
    if level == 0 {
        VisualRole::Mirror
    } else {
        VisualRole::Emissive {
            hue: emissive_hue(level, max_level),
        }
    }
}

/// Ring placement of child `i` of `FANOUT`, in the parent's local space.
pub fn ring_position(i: usize, parent_scale: f32) -> Vec3 {
    let angle = i as f32 / FANOUT as f32 * std::f32::consts::TAU;
    let radius = parent_scale * RING_RADIUS_FACTOR;
    Vec3::new(
        angle.cos() * radius,
        (angle * 2.0).sin() * radius * 0.5,
        angle.sin() * radius,
    )
}

/// Build the full tree. Recursion bottoms out on the exact level equality,
/// so the node count is always `node_count(max_level)` regardless of scale.
pub fn build(max_level: u32, base_scale: f32) -> FractalArena {
    let mut arena = FractalArena {
        nodes: Vec::with_capacity(node_count(max_level)),
    };
    build_node(&mut arena, 0, max_level, Vec3::ZERO, Vec3::ZERO, base_scale);
    arena
}

fn build_node(
    arena: &mut FractalArena,
    level: u32,
    max_level: u32,
    position: Vec3,
    base_rotation: Vec3,
    scale: f32,
) -> usize {
    let index = arena.nodes.len();
    arena.nodes.push(FractalNode {
        level,
        position,
        base_rotation,
        scale,
        role: visual_role(level, max_level),
        children: Vec::new(),
    });

    if level == max_level {
        return index;
    }

    let mut children = Vec::with_capacity(FANOUT);
    for i in 0..FANOUT {
        let angle = i as f32 / FANOUT as f32 * std::f32::consts::TAU;
        children.push(build_node(
            arena,
            level + 1,
            max_level,
            ring_position(i, scale),
            Vec3::new(angle, angle * 0.5, angle * 0.3),
            scale * SHRINK_FACTOR,
        ));
    }
    arena.nodes[index].children = children;
    index
}

pub struct FractalRoomPlugin;

impl Plugin for FractalRoomPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(RoomState::Fractal), spawn_fractal_room)
            .add_systems(OnExit(RoomState::Fractal), despawn_room::<FractalRoom>)
            .add_systems(
                Update,
                (animate_fractal_sway, animate_fractal_groups, animate_fractal_spinners)
                    .run_if(in_state(RoomState::Fractal)),
            );
    }
}

fn spawn_fractal_room(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut ambient: ResMut<AmbientLight>,
) {
    ambient.brightness = AMBIENT_BRIGHTNESS;

    let arena = build(MAX_LEVEL, BASE_SCALE);

    // One unit icosahedron shared by every node; per-node size comes from
    // the render entity's scale.
    let node_mesh = meshes.add(
        Sphere::new(1.0)
            .mesh()
            .ico(0)
            .unwrap_or_else(|_| Sphere::new(1.0).mesh().uv(8, 6)),
    );

    // One material per level.
    let level_materials: Vec<Handle<StandardMaterial>> = (0..=MAX_LEVEL)
        .map(|level| materials.add(node_material(visual_role(level, MAX_LEVEL))))
        .collect();

    let root = commands
        .spawn((
            FractalRoom,
            FractalSceneRoot,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    spawn_node(
        &mut commands,
        &arena,
        0,
        root,
        &node_mesh,
        &level_materials,
    );

    spawn_floor(&mut commands, &mut meshes, &mut materials);
    spawn_ornaments(&mut commands, &mut meshes, &mut materials);
    spawn_light_rig(&mut commands);
}

/// Spawn one arena node under `parent`: spin group, counter-spin frame,
/// render mesh, then the node's children inside the counter-spin frame.
fn spawn_node(
    commands: &mut Commands,
    arena: &FractalArena,
    index: usize,
    parent: Entity,
    node_mesh: &Handle<Mesh>,
    level_materials: &[Handle<StandardMaterial>],
) {
    let node = &arena.nodes[index];
    let base = Quat::from_euler(
        EulerRot::XYZ,
        node.base_rotation.x,
        node.base_rotation.y,
        node.base_rotation.z,
    );

    let group = commands
        .spawn((
            FractalGroup { level: node.level },
            Transform::from_translation(node.position).with_rotation(base),
            Visibility::default(),
            ChildOf(parent),
        ))
        .id();

    let spinner = commands
        .spawn((
            FractalSpinner { level: node.level },
            Transform::default(),
            Visibility::default(),
            ChildOf(group),
        ))
        .id();

    let material = level_materials
        .get(node.level as usize)
        .cloned()
        .unwrap_or_default();
    commands.spawn((
        Mesh3d(node_mesh.clone()),
        MeshMaterial3d(material),
        Transform::from_scale(Vec3::splat(node.scale)),
        ChildOf(spinner),
    ));

    for &child in &node.children {
        spawn_node(commands, arena, child, spinner, node_mesh, level_materials);
    }
}

fn node_material(role: VisualRole) -> StandardMaterial {
    match role {
        VisualRole::Mirror => StandardMaterial {
            base_color: Color::WHITE,
            metallic: 1.0,
            perceptual_roughness: 0.0,
            ..default()
        },
        VisualRole::Emissive { hue } => {
            let color = Color::hsl(hue * 360.0, 1.0, 0.5);
            StandardMaterial {
                base_color: color,
                emissive: color.to_linear() * EMISSIVE_INTENSITY,
                metallic: 0.8,
                perceptual_roughness: 0.2,
                ..default()
            }
        }
    }
}

fn spawn_floor(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        FractalRoom,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(FLOOR_SIZE, FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(FLOOR_COLOR[0], FLOOR_COLOR[1], FLOOR_COLOR[2]),
            metallic: 1.0,
            perceptual_roughness: 0.0,
            ..default()
        })),
        Transform::from_xyz(0.0, FLOOR_HEIGHT, 0.0),
        // The mirror floor is the room's back surface.
        PickSurface {
            action: SurfaceAction::LeaveRoom,
            shape: PickShape::Cuboid(Vec3::new(FLOOR_SIZE, 0.2, FLOOR_SIZE)),
        },
    ));
}

fn spawn_ornaments(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
) {
    let ornament_mesh = meshes.add(octahedron_mesh(ORNAMENT_SIZE));
    for i in 0..ORNAMENT_COUNT {
        let angle = i as f32 / ORNAMENT_COUNT as f32 * std::f32::consts::TAU;
        let hue = i as f32 / ORNAMENT_COUNT as f32 * 360.0;
        let color = Color::hsl(hue, 1.0, 0.6);
        commands.spawn((
            FractalRoom,
            Mesh3d(ornament_mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: color,
                emissive: Color::hsl(hue, 1.0, 0.3).to_linear() * 0.5,
                metallic: 0.9,
                perceptual_roughness: 0.1,
                ..default()
            })),
            Transform::from_xyz(
                angle.cos() * ORNAMENT_RING_RADIUS,
                (angle * 2.0).sin() * 0.5,
                angle.sin() * ORNAMENT_RING_RADIUS,
            )
            .with_rotation(Quat::from_euler(EulerRot::XYZ, angle, angle * 0.5, 0.0)),
        ));
    }
}

/// Regular octahedron with flat-shaded faces.
fn octahedron_mesh(size: f32) -> Mesh {
    let apex = [
        Vec3::X * size,
        Vec3::NEG_X * size,
        Vec3::Y * size,
        Vec3::NEG_Y * size,
        Vec3::Z * size,
        Vec3::NEG_Z * size,
    ];
    // Eight faces, wound counter-clockwise seen from outside.
    let faces: [[usize; 3]; 8] = [
        [2, 4, 0],
        [2, 0, 5],
        [2, 5, 1],
        [2, 1, 4],
        [3, 0, 4],
        [3, 5, 0],
        [3, 1, 5],
        [3, 4, 1],
    ];

    let mut positions = Vec::with_capacity(faces.len() * 3);
    for face in faces {
        for vertex in face {
            positions.push(apex[vertex].to_array());
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.compute_flat_normals();
    mesh
}

fn spawn_light_rig(commands: &mut Commands) {
    for light in &LIGHT_RIG {
        commands.spawn((
            FractalRoom,
            DirectionalLight {
                color: Color::srgb(light.color[0], light.color[1], light.color[2]),
                illuminance: light.illuminance,
                ..default()
            },
            Transform::from_translation(Vec3::from_array(light.position))
                .looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
}

/// Slow yaw plus sine pitch wobble on the whole installation.
fn animate_fractal_sway(
    time: Res<Time>,
    mut root: Query<&mut Transform, With<FractalSceneRoot>>,
) {
    let Ok(mut transform) = root.single_mut() else {
        return;
    };
    let t = time.elapsed_secs();
    transform.rotation = Quat::from_euler(
        EulerRot::YXZ,
        t * SCENE_YAW_SPEED,
        (t * SCENE_PITCH_SPEED).sin() * SCENE_PITCH_AMPLITUDE,
        0.0,
    );
}

/// Outer spin of every node; preserves the node's ring translation.
fn animate_fractal_groups(time: Res<Time>, mut groups: Query<(&FractalGroup, &mut Transform)>) {
    let t = time.elapsed_secs();
    for (group, mut transform) in &mut groups {
        let speed = spin_speed(group.level, MAX_LEVEL);
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            t * speed * GROUP_SPIN[0],
            t * speed * GROUP_SPIN[1],
            t * speed * GROUP_SPIN[2],
        );
    }
}

/// Inner counter-spin; the differing per-axis multipliers against the group
/// spin create the layered parallax between shells.
fn animate_fractal_spinners(
    time: Res<Time>,
    mut spinners: Query<(&FractalSpinner, &mut Transform)>,
) {
    let t = time.elapsed_secs();
    for (spinner, mut transform) in &mut spinners {
        let speed = spin_speed(spinner.level, MAX_LEVEL);
        transform.rotation = Quat::from_euler(
            EulerRot::XYZ,
            t * speed * MESH_SPIN[0],
            t * speed * MESH_SPIN[1],
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_follows_the_power_sum() {
        assert_eq!(node_count(0), 1);
        assert_eq!(node_count(1), 1 + 12);
        assert_eq!(node_count(2), 1 + 12 + 144);
        assert_eq!(node_count(3), 1 + 12 + 144 + 1728);
    }

    #[test]
    fn depth_zero_build_is_a_single_leaf_root() {
        let arena = build(0, BASE_SCALE);
        assert_eq!(arena.nodes.len(), 1);
        assert_eq!(arena.nodes[0].level, 0);
        assert!(arena.nodes[0].children.is_empty());
    }

    #[test]
    fn depth_three_build_has_the_exact_node_count() {
        let arena = build(3, BASE_SCALE);
        assert_eq!(arena.nodes.len(), node_count(3));
    }

    #[test]
    fn leaves_are_exactly_the_max_level_nodes() {
        let arena = build(2, BASE_SCALE);
        for node in &arena.nodes {
            if node.level == 2 {
                assert!(node.children.is_empty());
            } else {
                assert_eq!(node.children.len(), FANOUT);
            }
        }
    }

    #[test]
    fn children_shrink_by_the_fixed_factor() {
        let arena = build(2, BASE_SCALE);
        for node in &arena.nodes {
            for &child in &node.children {
                let child_scale = arena.nodes[child].scale;
                assert!((child_scale - node.scale * SHRINK_FACTOR).abs() < 1e-6);
                assert_eq!(arena.nodes[child].level, node.level + 1);
            }
        }
    }

    #[test]
    fn ring_children_sit_at_the_ring_radius() {
        let scale = 1.2;
        let radius = scale * RING_RADIUS_FACTOR;
        for i in 0..FANOUT {
            let p = ring_position(i, scale);
            // x/z stay on the circle; y is the modulated ripple.
            let planar = (p.x * p.x + p.z * p.z).sqrt();
            assert!((planar - radius).abs() < 1e-4);
            assert!(p.y.abs() <= radius * 0.5 + 1e-6);
        }
    }

    #[test]
    fn spin_slows_with_depth_down_to_the_base_rate() {
        for level in 0..MAX_LEVEL {
            assert!(spin_speed(level, MAX_LEVEL) > spin_speed(level + 1, MAX_LEVEL));
        }
        assert_eq!(spin_speed(MAX_LEVEL, MAX_LEVEL), BASE_ROTATION_SPEED);
    }

    #[test]
    fn only_the_root_is_mirrored() {
        let arena = build(3, BASE_SCALE);
        for node in &arena.nodes {
            match node.role {
                VisualRole::Mirror => assert_eq!(node.level, 0),
                VisualRole::Emissive { hue } => {
                    assert!(node.level > 0);
                    assert!((0.0..1.0).contains(&hue));
                }
            }
        }
    }
}
