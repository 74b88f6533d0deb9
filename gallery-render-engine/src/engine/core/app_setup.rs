use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;

use constants::camera::{FAR_PLANE, MAIN, NEAR_PLANE};

use crate::engine::camera::rig::{
    CameraRetargetEvent, CameraRig, camera_flight_system, camera_retarget_system,
};
use crate::engine::core::scene_state::{
    RoomState, SceneController, SurfaceClicked, scene_transition_system,
};
use crate::engine::core::window_config::create_window_config;
use crate::engine::input::picking::{
    PointerWorld, hover_cursor_system, pointer_world_system, surface_click_system,
};
use crate::engine::rooms::fractal::FractalRoomPlugin;
use crate::engine::rooms::morph::MorphRoomPlugin;
use crate::engine::rooms::particles::ParticleRoomPlugin;
use crate::engine::rooms::wave_field::WaveFieldRoomPlugin;
use crate::engine::scene::MainScenePlugin;
use crate::engine::systems::fps_overlay::{fps_text_update_system, spawn_ui};

/// Assemble the full application: plugin stack, room state machine, input
/// and camera plumbing, and the per-frame system chain.
pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(MainScenePlugin)
        .add_plugins(WaveFieldRoomPlugin)
        .add_plugins(MorphRoomPlugin)
        .add_plugins(ParticleRoomPlugin)
        .add_plugins(FractalRoomPlugin);

    app.init_state::<RoomState>()
        .init_resource::<SceneController>()
        .init_resource::<CameraRig>()
        .init_resource::<PointerWorld>()
        .add_event::<SurfaceClicked>()
        .add_event::<CameraRetargetEvent>()
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (
                // Click handling feeds the state machine, which feeds the
                // camera rig, all inside one frame.
                (
                    pointer_world_system,
                    hover_cursor_system,
                    surface_click_system,
                    scene_transition_system,
                    camera_retarget_system,
                    camera_flight_system,
                )
                    .chain(),
                fps_text_update_system,
            ),
        );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

/// Spawn the single camera at the main-scene vantage plus the FPS overlay.
/// Rooms never spawn cameras; the rig flies this one everywhere.
fn setup(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: MAIN.fov_degrees.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Transform::from_translation(MAIN.position),
    ));

    spawn_ui(&mut commands);
}
