use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A camera pose: world-space position plus rotation.
///
/// This is the only thing the simulation exposes to a renderer. How the pose
/// is derived (first person, third person) is the simulation's business; how
/// it becomes a view matrix is the renderer's.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// The direction this pose is facing (rotation applied to -Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pose_is_identity() {
        let p = CameraPose::default();
        assert_eq!(p.position, Vec3::ZERO);
        assert_eq!(p.rotation, Quat::IDENTITY);
    }

    #[test]
    fn identity_pose_faces_negative_z() {
        let p = CameraPose::default();
        assert!((p.forward() - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn yaw_half_turn_faces_positive_z() {
        let p = CameraPose::new(
            Vec3::ZERO,
            Quat::from_rotation_y(std::f32::consts::PI),
        );
        assert!((p.forward() - Vec3::Z).length() < 1e-5);
    }
}
