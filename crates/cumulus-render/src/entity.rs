//! The single drawable of a demo scene.

use cumulus_core::Transform;
use glam::{Mat4, Vec3};

use crate::material::CloudMaterial;

/// Mesh the renderer draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Axis-aligned box of edge 1 centered at the origin; rays are marched
    /// through it.
    UnitBox,
    /// Subdivided octahedron.
    Octahedron { radius: f32, detail: u32 },
}

impl Geometry {
    /// Half-size of the local bounding box.
    #[must_use]
    pub fn half_extent(&self) -> Vec3 {
        match *self {
            Self::UnitBox => Vec3::splat(0.5),
            Self::Octahedron { radius, .. } => Vec3::splat(radius),
        }
    }
}

/// Shading applied to the geometry.
#[derive(Debug, Clone)]
pub enum Surface {
    /// Ray-marched volume.
    Cloud(CloudMaterial),
    /// Colors faces by their normal.
    Normal { flat_shading: bool },
}

/// Geometry, shading and placement of the demo object.
#[derive(Debug, Clone)]
pub struct VolumeEntity {
    pub geometry: Geometry,
    pub surface: Surface,
    pub transform: Transform,
}

impl VolumeEntity {
    /// A unit box rendered with `material`.
    #[must_use]
    pub fn cloud(material: CloudMaterial) -> Self {
        Self {
            geometry: Geometry::UnitBox,
            surface: Surface::Cloud(material),
            transform: Transform::identity(),
        }
    }

    /// The flat-shaded octahedron shown when volumes are unsupported.
    #[must_use]
    pub fn octahedron() -> Self {
        Self {
            geometry: Geometry::Octahedron {
                radius: 0.5,
                detail: 2,
            },
            surface: Surface::Normal { flat_shading: true },
            transform: Transform::identity(),
        }
    }

    /// Local-to-world matrix.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    #[must_use]
    pub fn cloud_material(&self) -> Option<&CloudMaterial> {
        match &self.surface {
            Surface::Cloud(material) => Some(material),
            Surface::Normal { .. } => None,
        }
    }

    pub fn cloud_material_mut(&mut self) -> Option<&mut CloudMaterial> {
        match &mut self.surface {
            Surface::Cloud(material) => Some(material),
            Surface::Normal { .. } => None,
        }
    }
}
