//! Static tuning tables for every gallery scene.
//!
//! All numeric configuration lives here as compile-time constants: camera
//! targets, room animation parameters, colours and lighting rigs. Nothing in
//! this crate is parsed at runtime.

/// Named camera targets and flight parameters for scene transitions.
pub mod camera;

/// Recursive installation room: tree depth, ring layout, spin rates, finishes.
pub mod fractal;

/// Main navigation scene: shell geometry, floating panels, backdrop sphere.
pub mod main_scene;

/// Morph room: cross-fade cycle timing, primitive spins, scale envelope.
pub mod morph;

/// Particle room: spawn distribution, force field and damping coefficients.
pub mod particles;

/// Wave-field room: lattice resolution and wave function coefficients.
pub mod wave_field;
