use glam::Mat4;
use walker_common::CameraPose;

/// Perspective projection parameters plus pose-to-matrix mapping.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Projection {
    /// Recompute the aspect ratio from a surface size in pixels.
    /// Zero dimensions are treated as one pixel.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// World-to-camera matrix: the inverse of the pose's rigid transform.
    pub fn view_matrix(pose: &CameraPose) -> Mat4 {
        Mat4::from_rotation_translation(pose.rotation, pose.position).inverse()
    }

    pub fn view_projection(&self, pose: &CameraPose) -> Mat4 {
        self.projection_matrix() * Self::view_matrix(pose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn default_projection_is_finite() {
        let p = Projection::default();
        let m = p.view_projection(&CameraPose::default());
        assert!(!m.col(0).x.is_nan());
    }

    #[test]
    fn resize_updates_aspect() {
        let mut p = Projection::default();
        p.set_aspect(1920, 1080);
        assert!((p.aspect - 1920.0 / 1080.0).abs() < 1e-6);

        // Degenerate sizes clamp to one pixel instead of dividing by zero.
        p.set_aspect(800, 0);
        assert_eq!(p.aspect, 800.0);
    }

    #[test]
    fn view_matrix_inverts_the_pose() {
        let pose = CameraPose::new(
            Vec3::new(3.0, 1.7, -2.0),
            Quat::from_rotation_y(0.6),
        );
        let view = Projection::view_matrix(&pose);
        // The camera's own position maps to the origin of camera space.
        let origin = view.transform_point3(pose.position);
        assert!(origin.length() < 1e-5);
    }

    #[test]
    fn point_ahead_lands_on_negative_z() {
        let pose = CameraPose::new(Vec3::ZERO, Quat::from_rotation_y(1.0));
        let ahead = pose.position + pose.forward() * 7.0;
        let view = Projection::view_matrix(&pose);
        let in_camera = view.transform_point3(ahead);
        assert!((in_camera - glam::Vec3::new(0.0, 0.0, -7.0)).length() < 1e-4);
    }
}
