//! 8-bit density volumes.

use cumulus_core::{CumulusError, Result};
use glam::{UVec3, Vec3};

/// A dense 3D grid of 8-bit density samples.
///
/// Samples are stored x-fastest: the voxel `(x, y, z)` lives at
/// `x + y * width + z * width * height`. A volume is immutable once built;
/// hand it to other owners by cloning or moving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityVolume {
    dims: UVec3,
    data: Vec<u8>,
}

impl DensityVolume {
    /// Wraps `data` as a `dims`-sized volume.
    pub fn new(dims: UVec3, data: Vec<u8>) -> Result<Self> {
        let expected = voxel_count(dims)?;
        if data.len() != expected {
            return Err(CumulusError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { dims, data })
    }

    /// A volume where every sample equals `value`.
    pub fn filled(dims: UVec3, value: u8) -> Result<Self> {
        let count = voxel_count(dims)?;
        Ok(Self {
            dims,
            data: vec![value; count],
        })
    }

    /// Grid dimensions.
    #[must_use]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Width (x extent).
    #[must_use]
    pub fn width(&self) -> u32 {
        self.dims.x
    }

    /// Height (y extent).
    #[must_use]
    pub fn height(&self) -> u32 {
        self.dims.y
    }

    /// Depth (z extent).
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.dims.z
    }

    /// Number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false: zero-sized volumes cannot be built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flattens a 3D voxel index to a linear index.
    #[must_use]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let w = self.dims.x as usize;
        let h = self.dims.y as usize;
        x as usize + y as usize * w + z as usize * w * h
    }

    /// Sample at `(x, y, z)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: u32, y: u32, z: u32) -> Option<u8> {
        if x >= self.dims.x || y >= self.dims.y || z >= self.dims.z {
            return None;
        }
        Some(self.data[self.index(x, y, z)])
    }

    /// Sample at signed coordinates, replicating the border outside the grid.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn get_clamped(&self, x: i64, y: i64, z: i64) -> u8 {
        let x = x.clamp(0, i64::from(self.dims.x) - 1) as u32;
        let y = y.clamp(0, i64::from(self.dims.y) - 1) as u32;
        let z = z.clamp(0, i64::from(self.dims.z) - 1) as u32;
        self.data[self.index(x, y, z)]
    }

    /// Size of one voxel in texture coordinates.
    #[must_use]
    pub fn inverse_voxel_size(&self) -> Vec3 {
        Vec3::ONE / self.dims.as_vec3()
    }

    /// Raw samples.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the volume, returning its samples.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

/// Number of voxels in a `dims` grid.
///
/// Rejects empty axes and grids too large to address in one allocation.
pub fn voxel_count(dims: UVec3) -> Result<usize> {
    let invalid = || CumulusError::InvalidDimension {
        width: dims.x,
        height: dims.y,
        depth: dims.z,
    };
    if dims.x == 0 || dims.y == 0 || dims.z == 0 {
        return Err(invalid());
    }
    (dims.x as usize)
        .checked_mul(dims.y as usize)
        .and_then(|n| n.checked_mul(dims.z as usize))
        .filter(|&n| n <= isize::MAX.unsigned_abs())
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(dims: UVec3) -> DensityVolume {
        let count = voxel_count(dims).unwrap();
        let data = (0..count).map(|i| (i % 256) as u8).collect();
        DensityVolume::new(dims, data).unwrap()
    }

    #[test]
    fn test_index_layout() {
        let volume = ramp(UVec3::new(4, 3, 2));
        assert_eq!(volume.index(1, 0, 0), 1);
        assert_eq!(volume.index(0, 1, 0), 4);
        assert_eq!(volume.index(0, 0, 1), 12);
        assert_eq!(volume.get(3, 2, 1), Some(23));
        assert_eq!(volume.get(4, 0, 0), None);
    }

    #[test]
    fn test_clamped_lookup_replicates_edges() {
        let volume = ramp(UVec3::new(4, 3, 2));
        assert_eq!(volume.get_clamped(-1, 0, 0), volume.get(0, 0, 0).unwrap());
        assert_eq!(volume.get_clamped(9, 9, 9), volume.get(3, 2, 1).unwrap());
    }

    #[test]
    fn test_rejects_zero_dimension() {
        let err = DensityVolume::filled(UVec3::new(4, 0, 4), 0).unwrap_err();
        assert!(matches!(
            err,
            CumulusError::InvalidDimension { height: 0, .. }
        ));
    }

    #[test]
    fn test_rejects_overflowing_dimensions() {
        let dims = UVec3::splat(1 << 22);
        assert!(matches!(
            voxel_count(dims),
            Err(CumulusError::InvalidDimension { width, .. }) if width == 1 << 22
        ));
        assert!(DensityVolume::filled(dims, 0).is_err());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = DensityVolume::new(UVec3::splat(2), vec![0; 7]).unwrap_err();
        assert!(matches!(
            err,
            CumulusError::SizeMismatch {
                expected: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn test_inverse_voxel_size() {
        let volume = DensityVolume::filled(UVec3::new(2, 4, 8), 0).unwrap();
        assert_eq!(volume.inverse_voxel_size(), Vec3::new(0.5, 0.25, 0.125));
    }
}
