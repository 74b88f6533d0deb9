//! Main navigation scene: enclosing shell, floating panels, backdrop.

use bevy::prelude::*;

use crate::engine::core::scene_state::{RoomState, despawn_room};

/// Pulsing emissive backdrop sphere behind the navigation panels.
pub mod background;

/// The four clickable glass panels and their idle float animation.
pub mod floating_blocks;

/// Floor, ceiling and walls enclosing the navigation scene.
pub mod room_shell;

/// Marker for every entity belonging to the main scene; all of them are
/// despawned when a room takes over.
#[derive(Component)]
pub struct MainSceneEntity;

pub struct MainScenePlugin;

impl Plugin for MainScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(RoomState::Main),
            (
                room_shell::spawn_room_shell,
                floating_blocks::spawn_floating_blocks,
                background::spawn_backdrop,
            ),
        )
        .add_systems(OnExit(RoomState::Main), despawn_room::<MainSceneEntity>)
        .add_systems(
            Update,
            (
                floating_blocks::animate_floating_blocks,
                background::animate_backdrop,
            )
                .run_if(in_state(RoomState::Main)),
        );
    }
}
