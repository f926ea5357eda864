//! Object transforms.

use glam::{Mat4, Quat, Vec3};

/// A transformation represented as separate components.
///
/// The demo animates the cloud by accumulating yaw and pulsing a uniform
/// scale; keeping the components apart avoids re-decomposing a matrix every
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation component.
    pub translation: Vec3,
    /// Rotation component as a quaternion.
    pub rotation: Quat,
    /// Scale component.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Creates a new identity transform.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }

    /// Creates a transform from a translation.
    #[must_use]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Converts this transform to a Mat4.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Rotates around the world Y axis by `angle` radians.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation = (Quat::from_rotation_y(angle) * self.rotation).normalize();
    }

    /// Sets the same scale on every axis.
    pub fn set_uniform_scale(&mut self, scale: f32) {
        self.scale = Vec3::splat(scale);
    }

    /// Accumulated yaw in radians, in `(-pi, pi]`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        let (yaw, _, _) = self.rotation.to_euler(glam::EulerRot::YXZ);
        yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_identity() {
        let t = Transform::identity();
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_rotate_y_accumulates() {
        let mut t = Transform::identity();
        t.rotate_y(0.25);
        t.rotate_y(0.5);
        assert!((t.yaw() - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_uniform_scale_matrix() {
        let mut t = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0));
        t.set_uniform_scale(2.0);
        let p = t.to_matrix().transform_point3(Vec3::ONE);
        assert!((p - Vec3::new(3.0, 2.0, 2.0)).length() < 1e-5);
    }
}
