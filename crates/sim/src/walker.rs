use crate::Orientation;
use crate::tuning::{BASE_SPEED, SPAWN_POSITION, SPRINT_MULTIPLIER, THIRD_PERSON_OFFSET};
use glam::{Mat3, Quat, Vec3};
use walker_common::CameraPose;
use walker_input::{Control, InputState};

/// Which rule maps walker state to the camera pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Eye at the walker's position, looking along the full orientation.
    #[default]
    FirstPerson,
    /// Camera behind and above, always looking at the walker; pitch has no
    /// effect in this mode.
    ThirdPerson,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::FirstPerson => ViewMode::ThirdPerson,
            ViewMode::ThirdPerson => ViewMode::FirstPerson,
        }
    }

    /// The label shown in the overlay.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::FirstPerson => "View: First Person",
            ViewMode::ThirdPerson => "View: Third Person",
        }
    }
}

/// The whole walker state: position, orientation, view mode.
///
/// One `step` per display frame. Velocity is recomputed from scratch every
/// frame and returned for observability; it is never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Walker {
    position: Vec3,
    orientation: Orientation,
    view: ViewMode,
}

impl Default for Walker {
    fn default() -> Self {
        Self::new()
    }
}

impl Walker {
    pub fn new() -> Self {
        Self {
            position: SPAWN_POSITION,
            orientation: Orientation::default(),
            view: ViewMode::FirstPerson,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Flip between first and third person. Touches nothing but the mode.
    pub fn toggle_view(&mut self) -> ViewMode {
        self.view = self.view.toggled();
        tracing::info!("{}", self.view.label());
        self.view
    }

    /// Advance one frame: rotation input, then movement.
    ///
    /// Returns the velocity applied this frame. Movement direction is
    /// normalized (diagonals are not faster), rotated by yaw only, and
    /// scaled by the sprint-aware speed. Vertical motion overrides: ascend
    /// sets `velocity.y = +speed`, then descend sets `velocity.y = -speed`;
    /// the second assignment is the tie-break, so descend wins when both
    /// are held.
    pub fn step(&mut self, input: &InputState) -> Vec3 {
        self.orientation.turn(input);

        let mut direction = Vec3::ZERO;
        if input.is_held(Control::Forward) {
            direction.z -= 1.0;
        }
        if input.is_held(Control::Backward) {
            direction.z += 1.0;
        }
        if input.is_held(Control::StrafeLeft) {
            direction.x -= 1.0;
        }
        if input.is_held(Control::StrafeRight) {
            direction.x += 1.0;
        }
        if direction != Vec3::ZERO {
            direction = direction.normalize();
        }
        let direction = self.orientation.yaw_quat() * direction;

        let speed = if input.is_held(Control::Sprint) {
            BASE_SPEED * SPRINT_MULTIPLIER
        } else {
            BASE_SPEED
        };

        let mut velocity = Vec3::new(direction.x * speed, 0.0, direction.z * speed);
        if input.is_held(Control::Ascend) {
            velocity.y = speed;
        }
        if input.is_held(Control::Descend) {
            velocity.y = -speed;
        }

        self.position += velocity;
        velocity
    }

    /// Derive the camera pose for the active view mode.
    pub fn camera_pose(&self) -> CameraPose {
        match self.view {
            ViewMode::FirstPerson => CameraPose::new(self.position, self.orientation.quat()),
            ViewMode::ThirdPerson => {
                let eye = self.position + self.orientation.yaw_quat() * THIRD_PERSON_OFFSET;
                CameraPose::new(eye, look_at(eye, self.position))
            }
        }
    }
}

/// Rotation that points a camera at `target` from `eye`, world up +Y.
///
/// The camera convention looks down -Z, so the basis is built with
/// `z = -forward`. The third-person offset always keeps a horizontal
/// component, so the basis never degenerates in practice.
fn look_at(eye: Vec3, target: Vec3) -> Quat {
    let to_target = target - eye;
    if to_target.length_squared() < 1e-12 {
        return Quat::IDENTITY;
    }
    let z = -to_target.normalize();
    let x = Vec3::Y.cross(z).normalize_or_zero();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}
