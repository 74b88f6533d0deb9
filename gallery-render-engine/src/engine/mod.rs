pub mod camera;
pub mod core;
pub mod input;
pub mod rooms;
pub mod scene;
pub mod systems;
