//! Center-weighted falloff shapes.
//!
//! A falloff maps a voxel position, expressed relative to the volume center
//! as a fraction of the volume extent (`v ∈ [-0.5, 0.5]³`), to a weight in
//! `[0, 1]`: 1 at the center, fading toward the edges. The generator squares
//! the weight before scaling the noise.

use cumulus_core::{CumulusError, Result};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Silhouette of the generated cloud.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FalloffShape {
    /// `d = clamp(1 - |v|, 0, 1)`.
    #[default]
    Sphere,
    /// Axis-weighted ellipsoid.
    ///
    /// Positions are measured in half-extents (`h = 2v ∈ [-1, 1]³`) and
    /// `d = 1 - clamp(hx²/a + hy²/b + hz²/c, 0, 1)`; `{1, 1, 1}` is the ball
    /// inscribed in the volume.
    Ellipsoid { a: f32, b: f32, c: f32 },
}

impl FalloffShape {
    /// Ellipsoid with the given squared semi-axis weights.
    #[must_use]
    pub fn ellipsoid(a: f32, b: f32, c: f32) -> Self {
        Self::Ellipsoid { a, b, c }
    }

    /// Rejects ellipsoid weights that are not strictly positive and finite.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Sphere => Ok(()),
            Self::Ellipsoid { a, b, c } => {
                if [a, b, c].iter().all(|w| w.is_finite() && *w > 0.0) {
                    Ok(())
                } else {
                    Err(CumulusError::InvalidFalloff(format!(
                        "ellipsoid weights must be positive, got ({a}, {b}, {c})"
                    )))
                }
            }
        }
    }

    /// Weight `d` for a centered, extent-normalized position `v`.
    #[must_use]
    pub fn weight(&self, v: Vec3) -> f32 {
        match *self {
            Self::Sphere => (1.0 - v.length()).clamp(0.0, 1.0),
            Self::Ellipsoid { a, b, c } => {
                let h = v * 2.0;
                let e = (h.x * h.x / a + h.y * h.y / b + h.z * h.z / c).clamp(0.0, 1.0);
                1.0 - e
            }
        }
    }
}
