//! Core application setup and scene state management.
//!
//! Handles plugin wiring, window configuration and the room state machine
//! that decides which vignette is live and where the camera should fly.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with the navigation scene, the four room plugins
/// and the shared per-frame systems.
pub mod app_setup;

/// Room state machine and transition controller.
///
/// Owns the single piece of cross-cutting mutable state: which room, if any,
/// is currently active.
pub mod scene_state;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
