//! Linear-space colors authored as sRGB hex codes.

use glam::Vec3;

/// Converts one sRGB-encoded channel in `[0, 1]` to linear space.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts a `0xRRGGBB` sRGB code to a linear RGB color.
#[must_use]
pub fn linear_from_srgb_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(f32::from(((hex >> shift) & 0xff) as u8) / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

/// Page background behind the cloud.
pub const BACKGROUND_HEX: u32 = 0xf7_f7_f7;
/// Resting cloud tint.
pub const CLOUD_BASE_HEX: u32 = 0x71_88_a8;
/// Cloud tint right after a burn.
pub const CLOUD_BURNT_HEX: u32 = 0x29_29_29;
/// Point light color outside of a burn.
pub const LIGHT_HEX: u32 = 0xeb_4d_4b;
/// Point light color while burning.
pub const BURNING_LIGHT_HEX: u32 = 0xe6_7e_22;
