//! The four room vignettes. Each room is a plugin that spawns its geometry
//! on state entry, animates it while active and releases everything on exit.

/// Recursive icosahedron installation with level-dependent spin.
pub mod fractal;

/// Three-primitive cross-fade sequencer.
pub mod morph;

/// Cursor-reactive particle swarm under central gravity.
pub mod particles;

/// Waving point-field surface.
pub mod wave_field;
