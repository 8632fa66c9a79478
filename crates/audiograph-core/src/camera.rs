//! Perspective camera whose projection is recomputed each frame.

use crate::constants::{CAMERA_FAR, CAMERA_FOVY_DEG, CAMERA_NEAR, CAMERA_Z};
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        let mut camera = Self {
            eye: Vec3::new(0.0, 1.0, CAMERA_Z),
            target: Vec3::new(0.0, 1.0, 0.0),
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection(1.0);
        camera
    }
}

impl Camera {
    /// Recompute the projection for a new aspect ratio.
    pub fn update_projection(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
        self.projection =
            Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar);
    }

    /// Clip-space projection as of the last [`Camera::update_projection`].
    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}
