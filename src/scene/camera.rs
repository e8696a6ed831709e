//! Perspective camera for scene views.

use glam::{Mat4, Vec3};

/// Fixed perspective camera looking at a target point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `position` looking at the origin.
    pub fn new(position: Vec3, fov_degrees: f32) -> Self {
        Self {
            position,
            target: Vec3::ZERO,
            fov_degrees,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), 75.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::new(Vec3::new(0.0, 5.0, 10.0), 60.0);
        let clip = camera.view_projection(16.0 / 9.0) * camera.target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_degenerate_aspect_falls_back() {
        let camera = Camera::default();
        assert_eq!(camera.projection_matrix(0.0), camera.projection_matrix(1.0));
    }
}
