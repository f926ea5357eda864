//! Procedural cloud volumes.
//!
//! Each voxel is coherent noise faded by a [`FalloffShape`]:
//!
//! ```text
//! v       = (p - dims / 2) / dims
//! d       = falloff(v)
//! n       = (noise(p * scale) + 1) / 2
//! density = round(n * d² * 255)
//! ```
//!
//! The output buffer can be supplied by the caller through
//! [`VolumeGenerator::generate_into`] so repeated generations reuse one
//! allocation. A buffer belongs to exactly one generation at a time.

use cumulus_core::Result;
use glam::UVec3;

use crate::density::{voxel_count, DensityVolume};
use crate::falloff::FalloffShape;
use crate::noise::{ImprovedNoise, NoiseSource};

/// Default grid edge length.
pub const DEFAULT_SIZE: u32 = 128;

/// Noise frequency used by the front-page cloud.
pub const DEFAULT_NOISE_SCALE: f32 = 0.09;

/// Builds density volumes from a noise source and a falloff shape.
#[derive(Debug, Clone)]
pub struct VolumeGenerator<N = ImprovedNoise> {
    noise: N,
    noise_scale: f32,
    falloff: FalloffShape,
}

impl Default for VolumeGenerator<ImprovedNoise> {
    fn default() -> Self {
        Self {
            noise: ImprovedNoise::new(),
            noise_scale: DEFAULT_NOISE_SCALE,
            falloff: FalloffShape::Sphere,
        }
    }
}

impl VolumeGenerator<ImprovedNoise> {
    /// Generator with the reference Perlin table, the default scale and a
    /// spherical falloff.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<N: NoiseSource> VolumeGenerator<N> {
    /// Replaces the noise source.
    #[must_use]
    pub fn with_noise<M: NoiseSource>(self, noise: M) -> VolumeGenerator<M> {
        VolumeGenerator {
            noise,
            noise_scale: self.noise_scale,
            falloff: self.falloff,
        }
    }

    /// Sets the noise frequency.
    #[must_use]
    pub fn with_noise_scale(mut self, noise_scale: f32) -> Self {
        self.noise_scale = noise_scale;
        self
    }

    /// Sets the falloff shape.
    #[must_use]
    pub fn with_falloff(mut self, falloff: FalloffShape) -> Self {
        self.falloff = falloff;
        self
    }

    /// Noise frequency.
    #[must_use]
    pub fn noise_scale(&self) -> f32 {
        self.noise_scale
    }

    /// Falloff shape.
    #[must_use]
    pub fn falloff(&self) -> FalloffShape {
        self.falloff
    }

    /// Falloff weight `d` of voxel `(x, y, z)` in a `dims` grid.
    #[must_use]
    pub fn falloff_at(&self, dims: UVec3, x: u32, y: u32, z: u32) -> f32 {
        let size = dims.as_vec3();
        let v = (UVec3::new(x, y, z).as_vec3() - size * 0.5) / size;
        self.falloff.weight(v)
    }

    /// Generates a `dims` volume into a fresh buffer.
    pub fn generate(&self, dims: UVec3) -> Result<DensityVolume> {
        self.generate_into(dims, Vec::new())
    }

    /// Generates a `dims` volume, reusing `buffer`'s allocation.
    pub fn generate_into(&self, dims: UVec3, mut buffer: Vec<u8>) -> Result<DensityVolume> {
        let count = voxel_count(dims)?;
        self.falloff.validate()?;

        buffer.clear();
        buffer.reserve(count);

        let size = dims.as_vec3();
        let half = size * 0.5;
        for z in 0..dims.z {
            for y in 0..dims.y {
                for x in 0..dims.x {
                    let p = UVec3::new(x, y, z).as_vec3();
                    let d = self.falloff.weight((p - half) / size);
                    let n = (self.noise.sample(p * self.noise_scale) + 1.0) * 0.5;
                    buffer.push(quantize(n.clamp(0.0, 1.0) * d * d));
                }
            }
        }

        log::debug!(
            "generated {}x{}x{} density volume ({:?}, scale {})",
            dims.x,
            dims.y,
            dims.z,
            self.falloff,
            self.noise_scale
        );
        DensityVolume::new(dims, buffer)
    }
}

/// Generates a volume with the reference Perlin noise.
pub fn generate(
    width: u32,
    height: u32,
    depth: u32,
    noise_scale: f32,
    falloff: FalloffShape,
) -> Result<DensityVolume> {
    VolumeGenerator::new()
        .with_noise_scale(noise_scale)
        .with_falloff(falloff)
        .generate(UVec3::new(width, height, depth))
}

/// Maps `[0, 1]` to the nearest byte.
#[allow(clippy::cast_sign_loss)]
fn quantize(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}
