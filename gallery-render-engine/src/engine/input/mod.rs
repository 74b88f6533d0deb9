//! Pointer input: surface picking and cursor-to-world projection.
//!
//! The only module that reads raw pointer state. Everything downstream
//! consumes semantic `SurfaceClicked` events or the `PointerWorld` resource.

/// Cursor ray casting against tagged pick surfaces, hover feedback and the
/// per-frame pointer world position.
pub mod picking;
