//! Cross-cutting systems that run in every scene.

/// Frame-rate readout in the window corner.
pub mod fps_overlay;
