use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::camera::rig::{CameraRetargetEvent, CameraTargetId};

/// Which scene owns the frame tick. Exactly one room animator (or the main
/// scene's idle animators) runs per frame.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum RoomState {
    #[default]
    Main,
    WaveField,
    Morph,
    Particles,
    Fractal,
}

/// Identifies one of the four rooms, in navigation panel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomId {
    WaveField,
    Morph,
    Particles,
    Fractal,
}

impl RoomId {
    pub const ALL: [RoomId; 4] = [
        RoomId::WaveField,
        RoomId::Morph,
        RoomId::Particles,
        RoomId::Fractal,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            RoomId::WaveField => 0,
            RoomId::Morph => 1,
            RoomId::Particles => 2,
            RoomId::Fractal => 3,
        }
    }

    pub fn state(self) -> RoomState {
        match self {
            RoomId::WaveField => RoomState::WaveField,
            RoomId::Morph => RoomState::Morph,
            RoomId::Particles => RoomState::Particles,
            RoomId::Fractal => RoomState::Fractal,
        }
    }
}

/// Semantic meaning of a clicked surface. The input layer maps tagged
/// geometry to one of these; nothing downstream sees raw pointer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceAction {
    /// A navigation panel on the main scene was clicked.
    OpenRoom(RoomId),
    /// A room's interactive surface was clicked: return to the main scene.
    LeaveRoom,
}

/// Event fired by the input layer when a tagged surface is clicked.
#[derive(Event)]
pub struct SurfaceClicked {
    pub action: SurfaceAction,
}

/// Outcome of a state change: the destination state and the single camera
/// retarget that accompanies it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneTransition {
    pub state: RoomState,
    pub camera_target: CameraTargetId,
}

/// Resource tracking which room is active. Sole owner of the room selection;
/// transitions happen only through [`SceneController::apply`].
#[derive(Resource, Default)]
pub struct SceneController {
    current: Option<RoomId>,
}

impl SceneController {
    pub fn current(&self) -> Option<RoomId> {
        self.current
    }

    /// Apply a semantic click. Returns the transition to perform, or `None`
    /// when the click changes nothing (re-clicking the active room's surface
    /// is a true no-op and must not re-issue a camera retarget).
    pub fn apply(&mut self, action: SurfaceAction) -> Option<SceneTransition> {
        match action {
            SurfaceAction::OpenRoom(room) => {
                if self.current == Some(room) {
                    return None;
                }
                self.current = Some(room);
                Some(SceneTransition {
                    state: room.state(),
                    camera_target: CameraTargetId::Room(room),
                })
            }
            SurfaceAction::LeaveRoom => {
                self.current.take()?;
                Some(SceneTransition {
                    state: RoomState::Main,
                    camera_target: CameraTargetId::Main,
                })
            }
        }
    }
}

/// Dispatch clicked surfaces into state transitions and camera retargets.
/// Each real transition issues exactly one retarget.
pub fn scene_transition_system(
    mut clicks: EventReader<SurfaceClicked>,
    mut controller: ResMut<SceneController>,
    mut next_state: ResMut<NextState<RoomState>>,
    mut retargets: EventWriter<CameraRetargetEvent>,
) {
    for click in clicks.read() {
        if let Some(transition) = controller.apply(click.action) {
            info!("Scene transition: {:?}", transition.state);
            next_state.set(transition.state);
            retargets.write(CameraRetargetEvent {
                target: transition.camera_target,
            });
        }
    }
}

/// Remove every entity carrying the room's marker component. Scheduled in
/// `OnExit` so buffers and generated meshes are released on every exit path,
/// including an abrupt room switch.
pub fn despawn_room<T: Component>(mut commands: Commands, entities: Query<Entity, With<T>>) {
    for entity in &entities {
        commands.entity(entity).despawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_a_room_from_main_retargets_once() {
        let mut controller = SceneController::default();
        let transition = controller
            .apply(SurfaceAction::OpenRoom(RoomId::Particles))
            .expect("entering a room from main must transition");
        assert_eq!(transition.state, RoomState::Particles);
        assert_eq!(
            transition.camera_target,
            CameraTargetId::Room(RoomId::Particles)
        );
        assert_eq!(controller.current(), Some(RoomId::Particles));
    }

    #[test]
    fn leaving_a_room_returns_to_main() {
        let mut controller = SceneController::default();
        controller.apply(SurfaceAction::OpenRoom(RoomId::Particles));
        let transition = controller
            .apply(SurfaceAction::LeaveRoom)
            .expect("back click inside a room must return to main");
        assert_eq!(transition.state, RoomState::Main);
        assert_eq!(transition.camera_target, CameraTargetId::Main);
        assert_eq!(controller.current(), None);
    }

    #[test]
    fn reentering_the_active_room_is_a_no_op() {
        let mut controller = SceneController::default();
        controller.apply(SurfaceAction::OpenRoom(RoomId::Morph));
        assert_eq!(controller.apply(SurfaceAction::OpenRoom(RoomId::Morph)), None);
        assert_eq!(controller.current(), Some(RoomId::Morph));
    }

    #[test]
    fn leave_while_on_main_is_a_no_op() {
        let mut controller = SceneController::default();
        assert_eq!(controller.apply(SurfaceAction::LeaveRoom), None);
        assert_eq!(controller.current(), None);
    }

    #[test]
    fn switching_rooms_directly_retargets_to_the_new_room() {
        let mut controller = SceneController::default();
        controller.apply(SurfaceAction::OpenRoom(RoomId::WaveField));
        let transition = controller
            .apply(SurfaceAction::OpenRoom(RoomId::Fractal))
            .expect("switching rooms must transition");
        assert_eq!(transition.state, RoomState::Fractal);
        assert_eq!(
            transition.camera_target,
            CameraTargetId::Room(RoomId::Fractal)
        );
    }

    #[test]
    fn surface_actions_round_trip_with_lowercase_wire_names() {
        let open = SurfaceAction::OpenRoom(RoomId::WaveField);
        let json = serde_json::to_string(&open).expect("action serializes");
        assert_eq!(json, r#"{"openroom":"wavefield"}"#);
        let back: SurfaceAction = serde_json::from_str(&json).expect("action deserializes");
        assert_eq!(back, open);

        assert_eq!(
            serde_json::to_string(&SurfaceAction::LeaveRoom).expect("action serializes"),
            r#""leaveroom""#
        );

        for room in RoomId::ALL {
            let json = serde_json::to_string(&room).expect("room serializes");
            assert_eq!(json, json.to_lowercase());
            let back: RoomId = serde_json::from_str(&json).expect("room deserializes");
            assert_eq!(back, room);
        }
    }

    #[test]
    fn room_indices_round_trip() {
        for (i, room) in RoomId::ALL.iter().enumerate() {
            assert_eq!(room.index(), i);
            assert_eq!(RoomId::from_index(i), Some(*room));
        }
        assert_eq!(RoomId::from_index(4), None);
    }
}
