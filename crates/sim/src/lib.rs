//! Walker simulation: orientation, movement integration, view-mode switching.
//!
//! # Invariants
//! - Pitch stays in [-π/2, π/2]; every write path clamps.
//! - Movement is horizontal regardless of pitch; only yaw rotates the
//!   travel direction.
//! - Integration is per-frame, not per-second: rotation and travel apply a
//!   fixed step each frame, so speed follows the display refresh rate.
//!   This mirrors the behavior the walker ships with; do not "fix" it by
//!   scaling with elapsed time.
//! - Stepping never fails and never touches anything outside the state
//!   struct; the crate has no windowing or GPU dependency.

pub mod orientation;
pub mod tuning;
pub mod walker;

pub use orientation::Orientation;
pub use walker::{ViewMode, Walker};
