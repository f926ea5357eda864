//! Demo configuration.

use std::path::Path;

use cumulus_core::color::{
    linear_from_srgb_hex, BACKGROUND_HEX, BURNING_LIGHT_HEX, CLOUD_BASE_HEX, CLOUD_BURNT_HEX,
    LIGHT_HEX,
};
use cumulus_core::{CumulusError, PresetTable, Result};
use cumulus_volume::density::voxel_count;
use cumulus_volume::{FalloffShape, DEFAULT_NOISE_SCALE, DEFAULT_SIZE};
use glam::{UVec3, Vec3};
use serde::{Deserialize, Serialize};

/// Tunables of the demo that are not part of a preset.
///
/// Colors are sRGB hex values as an artist would pick them; [`palette`]
/// converts them to linear space.
///
/// [`palette`]: DemoOptions::palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoOptions {
    /// Density grid dimensions.
    pub volume_size: UVec3,
    /// Noise frequency.
    pub noise_scale: f32,
    /// Silhouette of the cloud.
    pub falloff: FalloffShape,
    /// Seed for a shuffled noise table; `None` uses the reference table.
    pub noise_seed: Option<u64>,
    /// Resting light intensity.
    pub light_intensity: f32,
    /// Seconds without pointer movement before the light animates itself.
    pub auto_light_timeout: f32,
    /// Seconds between demo creation and the start of the gradient worker.
    pub gradient_delay: f32,
    pub background_color: u32,
    pub base_color: u32,
    pub burnt_color: u32,
    pub light_color: u32,
    pub burning_light_color: u32,
    /// Selectable looks.
    pub presets: PresetTable,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            volume_size: UVec3::splat(DEFAULT_SIZE),
            noise_scale: DEFAULT_NOISE_SCALE,
            falloff: FalloffShape::Sphere,
            noise_seed: None,
            light_intensity: 2.0,
            auto_light_timeout: 1.25,
            gradient_delay: 0.1,
            background_color: BACKGROUND_HEX,
            base_color: CLOUD_BASE_HEX,
            burnt_color: CLOUD_BURNT_HEX,
            light_color: LIGHT_HEX,
            burning_light_color: BURNING_LIGHT_HEX,
            presets: PresetTable::builtin(),
        }
    }
}

impl DemoOptions {
    /// Sets the density grid dimensions.
    #[must_use]
    pub fn with_volume_size(mut self, size: UVec3) -> Self {
        self.volume_size = size;
        self
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

    /// Uses a shuffled noise table.
    #[must_use]
    pub fn with_noise_seed(mut self, seed: u64) -> Self {
        self.noise_seed = Some(seed);
        self
    }

    /// Sets the delay before the gradient worker starts.
    #[must_use]
    pub fn with_gradient_delay(mut self, seconds: f32) -> Self {
        self.gradient_delay = seconds;
        self
    }

    /// Replaces the preset table.
    #[must_use]
    pub fn with_presets(mut self, presets: PresetTable) -> Self {
        self.presets = presets;
        self
    }

    /// Checks the options can build a demo.
    pub fn validate(&self) -> Result<()> {
        voxel_count(self.volume_size)?;
        self.falloff.validate()?;
        for (name, value) in [
            ("autoLightTimeout", self.auto_light_timeout),
            ("lightIntensity", self.light_intensity),
            ("gradientDelay", self.gradient_delay),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CumulusError::InvalidPreset(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.auto_light_timeout == 0.0 {
            return Err(CumulusError::InvalidPreset(
                "autoLightTimeout must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut options: Self = serde_json::from_str(json)?;
        options.presets.normalize()?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&json)?;
        log::info!("loaded demo options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Linear-space colors.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette {
            background: linear_from_srgb_hex(self.background_color),
            base: linear_from_srgb_hex(self.base_color),
            burnt: linear_from_srgb_hex(self.burnt_color),
            light: linear_from_srgb_hex(self.light_color),
            burning_light: linear_from_srgb_hex(self.burning_light_color),
        }
    }
}

/// Linear-space colors used by the demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Vec3,
    /// Resting cloud color.
    pub base: Vec3,
    /// Cloud color right after a burn.
    pub burnt: Vec3,
    /// Resting light color.
    pub light: Vec3,
    /// Light color while burning.
    pub burning_light: Vec3,
}

impl Default for Palette {
    fn default() -> Self {
        DemoOptions::default().palette()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = DemoOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.volume_size, UVec3::splat(128));
        assert_eq!(options.presets.len(), 2);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options = DemoOptions::from_json_str(
            r#"{ "volumeSize": [32, 32, 16], "noiseSeed": 7, "falloff": { "kind": "ellipsoid", "a": 1.0, "b": 0.5, "c": 1.0 } }"#,
        )
        .unwrap();
        assert_eq!(options.volume_size, UVec3::new(32, 32, 16));
        assert_eq!(options.noise_seed, Some(7));
        assert_eq!(options.falloff, FalloffShape::ellipsoid(1.0, 0.5, 1.0));
        assert_eq!(options.auto_light_timeout, 1.25);
        assert!(options.presets.contains("cloudInverse"));
    }

    #[test]
    fn test_rejects_bad_options() {
        assert!(matches!(
            DemoOptions::from_json_str(r#"{ "volumeSize": [0, 4, 4] }"#),
            Err(CumulusError::InvalidDimension { .. })
        ));
        assert!(matches!(
            DemoOptions::from_json_str(r#"{ "autoLightTimeout": 0.0 }"#),
            Err(CumulusError::InvalidPreset(_))
        ));
        assert!(matches!(
            DemoOptions::from_json_str("{ not json"),
            Err(CumulusError::JsonError(_))
        ));
    }

    #[test]
    fn test_inverted_preset_ranges_are_swapped() {
        let json = r#"{
            "presets": {
                "cloud": {
                    "cameraFov": 40.0,
                    "absorption": { "min": 0.2, "max": 0.1 },
                    "decay": { "min": 1.15, "max": 1.35 },
                    "windowMin": 0.1,
                    "windowMax": 0.28,
                    "inverse": false,
                    "steps": 65
                }
            }
        }"#;
        let options = DemoOptions::from_json_str(json).unwrap();
        let preset = options.presets.get("cloud").unwrap();
        assert_eq!(preset.absorption.min, 0.1);
        assert_eq!(preset.absorption.max, 0.2);
    }

    #[test]
    fn test_palette_is_linear() {
        let palette = DemoOptions::default().palette();
        // sRGB 0xf7 is close to, but darker than, linear 0.97.
        assert!(palette.background.x > 0.9 && palette.background.x < 0.97);
        assert!(palette.burnt.x < 0.05);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            DemoOptions::from_json_file("/nonexistent/cumulus.json"),
            Err(CumulusError::IoError(_))
        ));
    }
}
