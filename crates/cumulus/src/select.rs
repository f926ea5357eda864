//! Picking which demo to run.

use cumulus_core::preset::{CLOUD, CLOUD_INVERSE};
use rand::Rng;

/// Probability of picking the dense cloud when nothing was requested.
pub const CLOUD_PROBABILITY: f32 = 0.35;

/// Prefix shared by every volumetric configuration name.
const CLOUD_PREFIX: &str = "cloud";

/// Which demo the app runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoConfig {
    /// Volumetric cloud using the named preset.
    Cloud(String),
    /// Normal-shaded octahedron for renderers without 3D textures.
    Simple,
}

impl DemoConfig {
    /// Cloud demo for `name`.
    #[must_use]
    pub fn cloud(name: impl Into<String>) -> Self {
        Self::Cloud(name.into())
    }

    /// Preset name, if this is a cloud config.
    #[must_use]
    pub fn preset_name(&self) -> Option<&str> {
        match self {
            Self::Cloud(name) => Some(name),
            Self::Simple => None,
        }
    }
}

/// Chooses the demo configuration.
///
/// An explicit request wins. Otherwise the dense cloud is drawn with
/// probability [`CLOUD_PROBABILITY`] and the inverted cloud the rest of the
/// time. Volumetric requests fall back to [`DemoConfig::Simple`] when the
/// renderer has no 3D texture support, as do names that are not cloud
/// configurations.
pub fn select_config<R: Rng + ?Sized>(
    requested: Option<&str>,
    supports_volume: bool,
    rng: &mut R,
) -> DemoConfig {
    let name = match requested {
        Some(name) => name.to_string(),
        None => {
            if rng.gen::<f32>() <= CLOUD_PROBABILITY {
                CLOUD.to_string()
            } else {
                CLOUD_INVERSE.to_string()
            }
        }
    };

    if !name.starts_with(CLOUD_PREFIX) {
        return DemoConfig::Simple;
    }
    if !supports_volume {
        log::warn!("renderer lacks 3D texture support, showing the simple demo instead of '{name}'");
        return DemoConfig::Simple;
    }
    DemoConfig::Cloud(name)
}
