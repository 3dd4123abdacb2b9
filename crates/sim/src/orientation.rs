use crate::tuning::TURN_STEP;
use glam::{EulerRot, Quat};
use std::f32::consts::FRAC_PI_2;
use walker_input::{Control, InputState};

/// Yaw/pitch accumulator driving the camera rotation.
///
/// Yaw is unbounded; pitch is clamped to [-π/2, π/2] on every write.
/// Rotation is applied in yaw-then-pitch order with zero roll (Y-X-Z
/// intrinsic), so the horizon never tilts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    yaw: f32,
    pitch: f32,
}

impl Orientation {
    pub const PITCH_LIMIT: f32 = FRAC_PI_2;

    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(-Self::PITCH_LIMIT, Self::PITCH_LIMIT),
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Apply one frame of rotation input: a fixed angular step per held key,
    /// deliberately not scaled by elapsed time.
    pub fn turn(&mut self, input: &InputState) {
        if input.is_held(Control::TurnLeft) {
            self.yaw += TURN_STEP;
        }
        if input.is_held(Control::TurnRight) {
            self.yaw -= TURN_STEP;
        }
        if input.is_held(Control::PitchUp) {
            self.pitch = (self.pitch + TURN_STEP).min(Self::PITCH_LIMIT);
        }
        if input.is_held(Control::PitchDown) {
            self.pitch = (self.pitch - TURN_STEP).max(-Self::PITCH_LIMIT);
        }
    }

    /// Full rotation: yaw then pitch, zero roll.
    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Yaw-only rotation, used to keep travel horizontal.
    pub fn yaw_quat(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}
