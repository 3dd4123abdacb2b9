//! Fixed tuning constants. None of these are runtime-configurable.

use glam::Vec3;

/// World units travelled per frame at walking pace.
pub const BASE_SPEED: f32 = 0.1;

/// Speed factor while sprint is held.
pub const SPRINT_MULTIPLIER: f32 = 2.0;

/// Radians of yaw/pitch applied per frame per held rotation key.
pub const TURN_STEP: f32 = 0.05;

/// First-person camera height above the walker's feet.
pub const EYE_HEIGHT: f32 = 1.7;

/// Third-person camera offset in the walker's local frame (behind and
/// above at yaw 0); rotated by yaw only.
pub const THIRD_PERSON_OFFSET: Vec3 = Vec3::new(0.0, 5.0, 10.0);

/// Where the walker starts.
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, EYE_HEIGHT, 5.0);
