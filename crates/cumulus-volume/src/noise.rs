//! Coherent 3D noise.
//!
//! [`ImprovedNoise`] is Ken Perlin's 2002 improved gradient noise. The default
//! table is the reference permutation, so sampled values match other
//! implementations of the same algorithm.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Continuous, deterministic scalar noise over 3D space.
///
/// Implementations return values in roughly `[-1, 1]`.
pub trait NoiseSource: Send + Sync {
    /// Samples the noise at `p`.
    fn sample(&self, p: Vec3) -> f32;
}

/// Ken Perlin's reference permutation.
const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Improved Perlin noise backed by a doubled 256-entry permutation table.
#[derive(Debug, Clone)]
pub struct ImprovedNoise {
    perm: [u8; 512],
}

impl Default for ImprovedNoise {
    fn default() -> Self {
        Self::from_permutation(&PERMUTATION)
    }
}

impl ImprovedNoise {
    /// Noise using the reference permutation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Noise using a permutation shuffled from `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(&mut StdRng::seed_from_u64(seed));
        let mut permutation = [0_u8; 256];
        permutation.copy_from_slice(&table);
        Self::from_permutation(&permutation)
    }

    fn from_permutation(permutation: &[u8; 256]) -> Self {
        let mut perm = [0_u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = permutation[i & 255];
        }
        Self { perm }
    }

    /// Samples the noise at `(x, y, z)`.
    #[must_use]
    pub fn noise(&self, x: f32, y: f32, z: f32) -> f32 {
        let (xi, x) = lattice(x);
        let (yi, y) = lattice(y);
        let (zi, z) = lattice(z);

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = usize::from(p[xi]) + yi;
        let aa = usize::from(p[a]) + zi;
        let ab = usize::from(p[a + 1]) + zi;
        let b = usize::from(p[xi + 1]) + yi;
        let ba = usize::from(p[b]) + zi;
        let bb = usize::from(p[b + 1]) + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p[ab], x, y - 1.0, z),
                    grad(p[bb], x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

impl NoiseSource for ImprovedNoise {
    fn sample(&self, p: Vec3) -> f32 {
        self.noise(p.x, p.y, p.z)
    }
}

/// Noise that returns the same value everywhere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantNoise(pub f32);

impl NoiseSource for ConstantNoise {
    fn sample(&self, _p: Vec3) -> f32 {
        self.0
    }
}

/// Splits a coordinate into its wrapped lattice cell and the offset inside it.
#[allow(clippy::cast_sign_loss)]
fn lattice(v: f32) -> (usize, f32) {
    let floor = v.floor();
    let cell = (floor as i64).rem_euclid(256) as usize;
    (cell, v - floor)
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_table_is_permutation() {
        let mut sorted = PERMUTATION.to_vec();
        sorted.sort_unstable();
        let expected: Vec<u8> = (0..=255).collect();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let noise = ImprovedNoise::new();
        for &(x, y, z) in &[(0.0, 0.0, 0.0), (3.0, 7.0, 1.0), (-4.0, 2.0, 250.0)] {
            assert_eq!(noise.noise(x, y, z), 0.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let a = ImprovedNoise::new();
        let b = ImprovedNoise::new();
        let p = Vec3::new(1.3, 4.7, 9.1);
        assert_eq!(a.sample(p).to_bits(), b.sample(p).to_bits());

        let s1 = ImprovedNoise::with_seed(7);
        let s2 = ImprovedNoise::with_seed(7);
        assert_eq!(s1.sample(p).to_bits(), s2.sample(p).to_bits());
    }

    #[test]
    fn test_seed_changes_table() {
        let a = ImprovedNoise::with_seed(1);
        let b = ImprovedNoise::with_seed(2);
        assert_ne!(a.perm, b.perm);
    }

    #[test]
    fn test_constant_noise() {
        assert_eq!(ConstantNoise(0.25).sample(Vec3::splat(9.0)), 0.25);
    }

    proptest! {
        #[test]
        fn noise_is_bounded(x in -300.0f32..300.0, y in -300.0f32..300.0, z in -300.0f32..300.0) {
            let v = ImprovedNoise::new().noise(x, y, z);
            prop_assert!(v.is_finite());
            prop_assert!((-1.1..=1.1).contains(&v));
        }

        #[test]
        fn noise_is_continuous(x in -50.0f32..50.0, y in -50.0f32..50.0, z in -50.0f32..50.0) {
            let noise = ImprovedNoise::new();
            let a = noise.noise(x, y, z);
            let b = noise.noise(x + 1e-3, y, z);
            prop_assert!((a - b).abs() < 0.05);
        }
    }
}
