//! The single point light shading the cloud.

use cumulus_core::color::{linear_from_srgb_hex, LIGHT_HEX};
use cumulus_core::math::spherical_to_cartesian;
use glam::Vec3;

/// Resting light intensity.
pub const LIGHT_INTENSITY: f32 = 2.0;

/// A point light with a finite range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Linear-space color.
    pub color: Vec3,
    pub intensity: f32,
    /// World-space position.
    pub position: Vec3,
    /// Range beyond which the light contributes nothing.
    pub distance: f32,
    /// Attenuation exponent over `distance`.
    pub decay: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: linear_from_srgb_hex(LIGHT_HEX),
            intensity: LIGHT_INTENSITY,
            position: Vec3::new(-0.5, 0.5, 1.5),
            distance: 2.75,
            decay: 1.0,
        }
    }
}

impl PointLight {
    /// Creates the front-page light.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the color.
    #[must_use]
    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Sets the intensity.
    #[must_use]
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Moves the light toward a point given in spherical coordinates.
    ///
    /// `blend` of 1 (or more) places the light exactly; smaller values move it
    /// that fraction of the way from where it is now.
    pub fn set_spherical(&mut self, theta: f32, phi: f32, radius: f32, blend: f32) {
        let target = spherical_to_cartesian(theta, phi, radius);
        if blend >= 1.0 {
            self.position = target;
        } else {
            self.position = self.position.lerp(target, blend.max(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_defaults() {
        let light = PointLight::new();
        assert_eq!(light.intensity, 2.0);
        assert_eq!(light.distance, 2.75);
        assert_eq!(light.position, Vec3::new(-0.5, 0.5, 1.5));
    }

    #[test]
    fn test_spherical_placement() {
        let mut light = PointLight::new();
        light.set_spherical(0.0, FRAC_PI_2, 1.5, 1.0);
        assert!((light.position - Vec3::new(0.0, 0.0, 1.5)).length() < 1e-5);

        light.set_spherical(FRAC_PI_2, FRAC_PI_2, 1.0, 1.0);
        assert!((light.position - Vec3::X).length() < 1e-5);

        light.set_spherical(0.0, PI, 2.0, 1.0);
        assert!((light.position - Vec3::new(0.0, -2.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_partial_blend() {
        let mut light = PointLight::new().with_intensity(0.0);
        light.position = Vec3::ZERO;
        light.set_spherical(0.0, FRAC_PI_2, 1.0, 0.25);
        assert!((light.position - Vec3::new(0.0, 0.0, 0.25)).length() < 1e-5);

        // A zero blend leaves the light where it is.
        let before = light.position;
        light.set_spherical(1.0, 1.0, 1.0, 0.0);
        assert_eq!(light.position, before);
    }
}
