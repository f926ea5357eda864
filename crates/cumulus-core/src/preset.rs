//! Named visual presets.
//!
//! A preset fixes the camera field of view, the oscillation ranges of the
//! absorption and decay parameters, and the static ray-marching parameters.
//! Presets can be swapped at runtime without restarting the burn cycle.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CumulusError, Result};
use crate::interpolator::ordered_range;

/// Name of the dense cloud preset.
pub const CLOUD: &str = "cloud";
/// Name of the inverted, sparse cloud preset.
pub const CLOUD_INVERSE: &str = "cloudInverse";

/// Closed scalar range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    /// Creates a new range.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// The same range with `min <= max`.
    #[must_use]
    pub fn ordered(self) -> Self {
        let (min, max) = ordered_range(self.min, self.max);
        Self { min, max }
    }
}

/// Static configuration of one cloud look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Vertical camera field of view, in degrees.
    pub camera_fov: f32,
    /// Oscillation range of the absorption coefficient.
    pub absorption: Range,
    /// Oscillation range of the density decay exponent.
    pub decay: Range,
    /// Lower bound of the density window.
    pub window_min: f32,
    /// Upper bound of the density window.
    pub window_max: f32,
    /// Whether density is inverted before windowing.
    pub inverse: bool,
    /// Ray-marching step count.
    pub steps: u32,
}

impl Preset {
    /// The dense, bright cloud.
    #[must_use]
    pub fn cloud() -> Self {
        Self {
            camera_fov: 40.0,
            absorption: Range::new(0.10, 0.2),
            decay: Range::new(1.15, 1.35),
            window_min: 0.1,
            window_max: 0.28,
            inverse: false,
            steps: 65,
        }
    }

    /// The inverted cloud: sparse filaments around a hollow core.
    #[must_use]
    pub fn cloud_inverse() -> Self {
        Self {
            camera_fov: 60.0,
            absorption: Range::new(0.065, 0.085),
            decay: Range::new(5.5, 7.0),
            window_min: 0.3,
            window_max: 0.85,
            inverse: true,
            steps: 150,
        }
    }

    /// Swaps inverted oscillation ranges in place.
    pub fn normalize(&mut self) {
        self.absorption = self.absorption.ordered();
        self.decay = self.decay.ordered();
    }

    /// Copy of the preset with ordered oscillation ranges.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut preset = self.clone();
        preset.normalize();
        preset
    }

    /// Checks the density window and the step count.
    ///
    /// Oscillation ranges are not checked; inverted ones are swapped by
    /// [`Preset::normalize`].
    pub fn validate(&self) -> Result<()> {
        if self.window_max < self.window_min {
            return Err(CumulusError::InvalidPreset(format!(
                "density window [{}, {}] is empty",
                self.window_min, self.window_max
            )));
        }
        if self.steps == 0 {
            return Err(CumulusError::InvalidPreset(
                "step count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::cloud()
    }
}

/// Name-indexed collection of presets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetTable {
    presets: BTreeMap<String, Preset>,
}

impl PresetTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The two looks shipped with the demo.
    #[must_use]
    pub fn builtin() -> Self {
        let mut table = Self::new();
        table.insert(CLOUD, Preset::cloud());
        table.insert(CLOUD_INVERSE, Preset::cloud_inverse());
        table
    }

    /// Parses a JSON object mapping names to presets.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut table: Self = serde_json::from_str(json)?;
        table.normalize()?;
        Ok(table)
    }

    /// Orders every preset's ranges and validates the rest.
    pub fn normalize(&mut self) -> Result<()> {
        for (name, preset) in &mut self.presets {
            preset.normalize();
            preset.validate().map_err(|e| {
                log::warn!("rejecting preset '{name}': {e}");
                e
            })?;
        }
        Ok(())
    }

    /// Reads a JSON preset file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let table = Self::from_json_str(&json)?;
        log::info!(
            "loaded {} preset(s) from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Serializes the table to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Adds or replaces a preset.
    pub fn insert(&mut self, name: impl Into<String>, preset: Preset) {
        self.presets.insert(name.into(), preset);
    }

    /// Looks up a preset by name.
    pub fn get(&self, name: &str) -> Result<&Preset> {
        self.presets
            .get(name)
            .ok_or_else(|| CumulusError::UnknownPreset(name.to_string()))
    }

    /// Whether a preset with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Number of presets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}
