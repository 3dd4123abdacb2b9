use serde::{Deserialize, Serialize};

/// A logical walker control.
///
/// The frame loop and the movement integrator read these; how they map onto
/// physical keys is the business of [`crate::Bindings`] and
/// [`crate::map_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Control {
    /// Move toward where the camera faces (horizontally).
    Forward,
    /// Move away from where the camera faces.
    Backward,
    /// Strafe left.
    StrafeLeft,
    /// Strafe right.
    StrafeRight,
    /// Rotate the camera left (yaw increases).
    TurnLeft,
    /// Rotate the camera right (yaw decreases).
    TurnRight,
    /// Tilt the camera up (pitch increases, clamped).
    PitchUp,
    /// Tilt the camera down (pitch decreases, clamped).
    PitchDown,
    /// Fly straight up.
    Ascend,
    /// Fly straight down. Wins over Ascend when both are held.
    Descend,
    /// Multiply movement speed while held.
    Sprint,
    /// Switch between first and third person. Edge-triggered.
    ToggleView,
}

impl Control {
    /// All controls, in a stable order.
    pub const ALL: [Control; 12] = [
        Control::Forward,
        Control::Backward,
        Control::StrafeLeft,
        Control::StrafeRight,
        Control::TurnLeft,
        Control::TurnRight,
        Control::PitchUp,
        Control::PitchDown,
        Control::Ascend,
        Control::Descend,
        Control::Sprint,
        Control::ToggleView,
    ];

    /// Stable lowercase name, used by the CLI and the bindings file.
    pub fn name(self) -> &'static str {
        match self {
            Control::Forward => "forward",
            Control::Backward => "backward",
            Control::StrafeLeft => "strafe-left",
            Control::StrafeRight => "strafe-right",
            Control::TurnLeft => "turn-left",
            Control::TurnRight => "turn-right",
            Control::PitchUp => "pitch-up",
            Control::PitchDown => "pitch-down",
            Control::Ascend => "ascend",
            Control::Descend => "descend",
            Control::Sprint => "sprint",
            Control::ToggleView => "toggle-view",
        }
    }

    /// Parse a control from its stable name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Control> {
        Control::ALL.iter().copied().find(|c| c.name() == name)
    }
}
