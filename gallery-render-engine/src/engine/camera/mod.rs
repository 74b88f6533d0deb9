//! Camera rig: eased flights between named targets.

/// Retarget events, easing curves and the per-frame flight interpolator.
pub mod rig;
