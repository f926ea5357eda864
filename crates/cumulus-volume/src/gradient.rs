//! Density gradients for shading.
//!
//! The gradient of the density field acts as a surface normal when the ray
//! marcher lights the cloud. Gradients are stored as RGB bytes, each
//! component remapped from `[-1, 1]` to `[0, 255]`.

use glam::{UVec3, Vec3};

use crate::density::DensityVolume;

/// Byte encoding of a zero gradient component.
pub const ZERO_COMPONENT: u8 = 128;

/// Per-voxel unit gradients, 3 bytes per voxel, same layout as the source
/// volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientField {
    dims: UVec3,
    data: Vec<u8>,
}

impl GradientField {
    /// Grid dimensions.
    #[must_use]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Number of bytes (three per voxel).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the field holds no voxels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Encoded gradient at `(x, y, z)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<[u8; 3]> {
        if x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return None;
        }
        let w = self.dims.x as usize;
        let h = self.dims.y as usize;
        let i = 3 * (x as usize + y as usize * w + z as usize * w * h);
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    /// Gradient at `(x, y, z)` decoded back to `[-1, 1]`.
    #[must_use]
    pub fn decode(&self, x: u32, y: u32, z: u32) -> Option<Vec3> {
        self.get(x, y, z)
            .map(|[r, g, b]| Vec3::new(decode(r), decode(g), decode(b)))
    }

    /// Raw RGB bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the field, returning its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Computes normalized central-difference gradients of `volume`.
///
/// Neighbours outside the grid replicate the border sample. Flat regions
/// (zero difference on every axis) encode as [`ZERO_COMPONENT`] on all
/// channels.
#[must_use]
pub fn compute_gradients(volume: &DensityVolume) -> GradientField {
    compute_gradients_into(volume, Vec::new())
}

/// Same as [`compute_gradients`], writing into `buffer`'s allocation.
#[must_use]
pub fn compute_gradients_into(volume: &DensityVolume, mut buffer: Vec<u8>) -> GradientField {
    let dims = volume.dims();
    buffer.clear();
    buffer.reserve(volume.len() * 3);

    for z in 0..i64::from(dims.z) {
        for y in 0..i64::from(dims.y) {
            for x in 0..i64::from(dims.x) {
                let sample = |dx: i64, dy: i64, dz: i64| {
                    f32::from(volume.get_clamped(x + dx, y + dy, z + dz))
                };
                let gradient = Vec3::new(
                    sample(1, 0, 0) - sample(-1, 0, 0),
                    sample(0, 1, 0) - sample(0, -1, 0),
                    sample(0, 0, 1) - sample(0, 0, -1),
                )
                .normalize_or_zero();
                buffer.extend_from_slice(&[
                    encode(gradient.x),
                    encode(gradient.y),
                    encode(gradient.z),
                ]);
            }
        }
    }

    GradientField { dims, data: buffer }
}

/// Maps a component in `[-1, 1]` to a byte.
#[allow(clippy::cast_sign_loss)]
fn encode(component: f32) -> u8 {
    ((component * 0.5 + 0.5) * 255.0).round().clamp(0.0, 255.0) as u8
}

fn decode(byte: u8) -> f32 {
    f32::from(byte) / 255.0 * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_volume_is_flat() {
        let volume = DensityVolume::filled(UVec3::splat(5), 127).unwrap();
        let field = compute_gradients(&volume);
        assert_eq!(field.len(), 3 * 5 * 5 * 5);
        assert!(field.as_bytes().iter().all(|&b| b == ZERO_COMPONENT));
    }

    #[test]
    fn test_output_length() {
        let volume = DensityVolume::filled(UVec3::new(3, 4, 5), 9).unwrap();
        assert_eq!(compute_gradients(&volume).len(), 3 * 3 * 4 * 5);
    }

    #[test]
    fn test_ramp_along_x() {
        let dims = UVec3::new(4, 2, 2);
        let data = (0..16).map(|i| (i % 4) as u8 * 50).collect();
        let volume = DensityVolume::new(dims, data).unwrap();
        let field = compute_gradients(&volume);
        assert_eq!(field.get(1, 0, 0), Some([255, 128, 128]));
        // Border voxels see a one-sided difference, still pointing along +x.
        assert_eq!(field.get(0, 1, 1), Some([255, 128, 128]));
        let decoded = field.decode(2, 1, 0).unwrap();
        assert!((decoded - Vec3::X).length() < 0.01);
    }

    #[test]
    fn test_source_is_untouched() {
        let dims = UVec3::splat(3);
        let data: Vec<u8> = (0..27).map(|i| (i * 7) as u8).collect();
        let volume = DensityVolume::new(dims, data.clone()).unwrap();
        let _ = compute_gradients(&volume);
        assert_eq!(volume.as_bytes(), data.as_slice());
    }

    #[test]
    fn test_out_of_range_lookup() {
        let volume = DensityVolume::filled(UVec3::splat(2), 0).unwrap();
        let field = compute_gradients(&volume);
        assert_eq!(field.get(2, 0, 0), None);
        assert_eq!(field.dims(), UVec3::splat(2));
    }
}
