//! The volumetric cloud demo and its burn cycle.
//!
//! Pressing the pointer "burns" the cloud: the light flares up in a warm
//! color while the cloud turns dark, then the cloud slowly recovers its
//! color. The cycle is a small state machine:
//!
//! ```text
//!            pointer down                 burn finished
//!   Idle ──────────────────▶ Burning ─────────────────────▶ Recovering
//!    ▲                          ▲                                │
//!    │                          └────────── pointer down ────────┤
//!    └──────────────────────── recovery finished ────────────────┘
//! ```
//!
//! Gradients of the density volume are computed on a worker thread shortly
//! after the demo starts and attached to the material when they arrive.

use std::f32::consts::PI;
use std::sync::Arc;

use cumulus_core::math::{
    ease_quadratic, ease_quadratic_out, ease_quadratic_out_inverse, lerp_color, sin_norm,
    PI_OVER_2,
};
use cumulus_core::{Interpolator, PeriodicInterpolator, Pointer, Preset, Result};
use cumulus_render::{CloudMaterial, VolumeEntity};
use cumulus_volume::{
    compute_gradients_async, DensityVolume, GradientField, GradientTask, ImprovedNoise,
    VolumeGenerator,
};

use super::{Demo, Stage};
use crate::options::{DemoOptions, Palette};

/// Peak light intensity of a burn.
pub const BURN_PEAK: f32 = 13.0;
/// Length of a burn, in seconds.
pub const BURN_DURATION: f32 = 3.0;
/// Time for the light to reach its peak during a burn.
pub const BURN_RAMP_UP: f32 = 1.0;
/// Length of the recovery fade, in seconds.
pub const RECOVER_DURATION: f32 = 2.5;
/// Pause between the end of a burn and the start of the recovery fade.
pub const RECOVER_DELAY: f32 = 0.75;
/// Distance of the hand-steered light from the cloud center.
pub const MANUAL_LIGHT_RADIUS: f32 = 1.5;

const ABSORPTION_TIME_SCALE: f32 = 1.1;

/// Phase of the burn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DemoState {
    #[default]
    Idle,
    Burning,
    Recovering,
}

#[derive(Debug)]
enum GradientJob {
    /// Waiting `remaining` seconds before starting the worker.
    Scheduled { remaining: f32 },
    Running(GradientTask),
    Applied,
    Failed,
}

/// Volumetric cloud with an animated light and a burn cycle.
#[derive(Debug)]
pub struct CloudDemo {
    name: String,
    entity: VolumeEntity,
    volume: Arc<DensityVolume>,
    state: DemoState,
    absorption: PeriodicInterpolator,
    decay: PeriodicInterpolator,
    burning: Interpolator,
    recover: Interpolator,
    palette: Palette,
    light_intensity: f32,
    gradients: GradientJob,
}

impl CloudDemo {
    /// Generates a density volume from `options` and builds the demo.
    pub fn new(name: impl Into<String>, preset: &Preset, options: &DemoOptions) -> Result<Self> {
        options.validate()?;
        let noise = match options.noise_seed {
            Some(seed) => ImprovedNoise::with_seed(seed),
            None => ImprovedNoise::new(),
        };
        let volume = VolumeGenerator::new()
            .with_noise(noise)
            .with_noise_scale(options.noise_scale)
            .with_falloff(options.falloff)
            .generate(options.volume_size)?;
        Self::from_volume(name, preset, options, volume)
    }

    /// Builds the demo around an existing density volume.
    pub fn from_volume(
        name: impl Into<String>,
        preset: &Preset,
        options: &DemoOptions,
        volume: DensityVolume,
    ) -> Result<Self> {
        let preset = preset.normalized();
        preset.validate()?;
        let name = name.into();
        let palette = options.palette();
        let volume = Arc::new(volume);

        let mut material = CloudMaterial::new();
        material.set_base_color(palette.base);
        material.set_volume(Arc::clone(&volume));

        let mut demo = Self {
            name,
            entity: VolumeEntity::cloud(material),
            volume,
            state: DemoState::Idle,
            absorption: PeriodicInterpolator::new(preset.absorption.min, preset.absorption.max)
                .with_ease(sin_norm),
            decay: PeriodicInterpolator::new(preset.decay.min, preset.decay.max)
                .with_ease(sin_norm),
            burning: Interpolator::new(0.0, BURN_PEAK)
                .with_duration(BURN_DURATION)
                .with_ramp_up(BURN_RAMP_UP)
                .with_ease_in(ease_quadratic_out)
                .with_ease_out(ease_quadratic_out_inverse),
            recover: Interpolator::new(0.0, 1.0)
                .with_duration(RECOVER_DURATION)
                .with_delay(RECOVER_DELAY)
                .with_ease_in(ease_quadratic),
            palette,
            light_intensity: options.light_intensity,
            gradients: GradientJob::Scheduled {
                remaining: options.gradient_delay,
            },
        };
        demo.apply_preset(&preset);
        if options.gradient_delay <= 0.0 {
            demo.start_gradients();
        }

        let dims = demo.volume.dims();
        log::info!(
            "cloud demo '{}' ready ({}x{}x{} volume)",
            demo.name,
            dims.x,
            dims.y,
            dims.z
        );
        Ok(demo)
    }

    /// Switches to another look without touching the burn cycle.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.absorption
            .set_range(preset.absorption.min, preset.absorption.max);
        self.decay.set_range(preset.decay.min, preset.decay.max);
        if let Some(material) = self.entity.cloud_material_mut() {
            material.set_absorption(self.absorption.min());
            material.set_decay(self.decay.min());
            material.set_window_min(preset.window_min);
            material.set_window_max(preset.window_max);
            material.set_inverse(preset.inverse);
            material.set_steps(preset.steps);
        }
    }

    /// Current phase of the burn cycle.
    #[must_use]
    pub fn state(&self) -> DemoState {
        self.state
    }

    /// The density volume being rendered.
    #[must_use]
    pub fn volume(&self) -> &Arc<DensityVolume> {
        &self.volume
    }

    /// The cloud material.
    #[must_use]
    pub fn material(&self) -> Option<&CloudMaterial> {
        self.entity.cloud_material()
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Light intensity ramp of the burn.
    #[must_use]
    pub fn burning(&self) -> &Interpolator {
        &self.burning
    }

    /// Color fade of the recovery.
    #[must_use]
    pub fn recovery(&self) -> &Interpolator {
        &self.recover
    }

    /// Absorption oscillator.
    #[must_use]
    pub fn absorption(&self) -> &PeriodicInterpolator {
        &self.absorption
    }

    /// Decay oscillator.
    #[must_use]
    pub fn decay(&self) -> &PeriodicInterpolator {
        &self.decay
    }

    /// Whether the gradient map has been attached.
    #[must_use]
    pub fn has_gradients(&self) -> bool {
        matches!(self.gradients, GradientJob::Applied)
    }

    /// Whether the gradient worker has been started and not yet delivered.
    #[must_use]
    pub fn gradients_pending(&self) -> bool {
        matches!(&self.gradients, GradientJob::Running(task) if task.is_pending())
    }

    /// Blocks until gradients are attached, starting the worker if needed.
    ///
    /// Returns immediately when gradients were already attached or the worker
    /// already failed.
    pub fn wait_for_gradients(&mut self) -> Result<()> {
        let task = match std::mem::replace(&mut self.gradients, GradientJob::Failed) {
            GradientJob::Scheduled { .. } => {
                compute_gradients_async(DensityVolume::clone(&self.volume))
            }
            GradientJob::Running(task) => task,
            done => {
                self.gradients = done;
                return Ok(());
            }
        };
        let field = task.wait()?;
        self.attach_gradients(field);
        Ok(())
    }

    fn start_gradients(&mut self) {
        log::info!("computing volume gradients in the background");
        self.gradients =
            GradientJob::Running(compute_gradients_async(DensityVolume::clone(&self.volume)));
    }

    fn attach_gradients(&mut self, field: GradientField) {
        if let Some(material) = self.entity.cloud_material_mut() {
            material.set_gradient_map(Some(Arc::new(field)));
        }
        self.gradients = GradientJob::Applied;
        log::info!("gradient map attached to '{}'", self.name);
    }

    fn poll_gradients(&mut self, delta: f32) {
        let start = match &mut self.gradients {
            GradientJob::Scheduled { remaining } => {
                *remaining -= delta;
                *remaining <= 0.0
            }
            _ => false,
        };
        if start {
            self.start_gradients();
        }

        if let GradientJob::Running(task) = &mut self.gradients {
            if let Some(field) = task.try_take() {
                self.attach_gradients(field);
            } else if task.is_consumed() {
                self.gradients = GradientJob::Failed;
            }
        }
    }

    fn advance_state(&mut self, delta: f32, stage: &mut Stage) {
        match self.state {
            DemoState::Idle => {}
            DemoState::Burning => {
                if self.burning.is_finished() {
                    stage.light.color = self.palette.light;
                    stage.controls_enabled = true;
                    self.state = DemoState::Recovering;
                    log::debug!("burn finished, recovering");
                } else {
                    stage.light.intensity = self.burning.advance(delta);
                }
            }
            DemoState::Recovering => {
                let progress = self.recover.advance(delta);
                if self.recover.is_running() || self.recover.is_finished() {
                    if let Some(material) = self.entity.cloud_material_mut() {
                        material.set_base_color(lerp_color(
                            self.palette.burnt,
                            self.palette.base,
                            progress,
                        ));
                    }
                    stage.light.intensity = progress * self.light_intensity;
                }
                if self.recover.is_finished() {
                    self.recover.reset();
                    self.state = DemoState::Idle;
                    log::debug!("recovery finished");
                }
            }
        }
    }
}

impl Demo for CloudDemo {
    fn name(&self) -> &str {
        &self.name
    }

    fn on_pointer_down(&mut self, stage: &mut Stage) {
        if self.state == DemoState::Burning || self.burning.is_active() {
            return;
        }
        self.burning.reset();
        self.recover.reset();
        stage.light.color = self.palette.burning_light;
        stage.light.intensity = 0.0;
        stage.controls_enabled = false;
        stage.auto_light_timer = stage.auto_light_timeout * 0.25;
        if let Some(material) = self.entity.cloud_material_mut() {
            material.set_base_color(self.palette.burnt);
        }
        log::debug!("{:?} -> Burning", self.state);
        self.state = DemoState::Burning;
    }

    fn on_pointer_move(&mut self, pointer: &Pointer, stage: &mut Stage) {
        if !stage.controls_enabled {
            return;
        }
        stage.auto_light_timer = 0.0;
        let theta = pointer.x_norm() * PI_OVER_2;
        let phi = (pointer.y_norm() * 0.5 + 0.5) * PI;
        stage
            .light
            .set_spherical(theta, phi, MANUAL_LIGHT_RADIUS, 1.0);
    }

    fn update(&mut self, elapsed: f32, delta: f32, stage: &mut Stage) {
        self.poll_gradients(delta);
        self.advance_state(delta, stage);

        let absorption = self.absorption.evaluate(elapsed * ABSORPTION_TIME_SCALE);
        let decay = self.decay.evaluate(elapsed);
        let view = stage.camera.view_matrix();
        let model = self.entity.model_matrix();
        if let Some(material) = self.entity.cloud_material_mut() {
            material.set_absorption(absorption);
            material.set_decay(decay);
            material.update_inverse_model_view(view, model);
        }
    }

    fn entity(&self) -> &VolumeEntity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut VolumeEntity {
        &mut self.entity
    }

    fn as_cloud(&self) -> Option<&CloudDemo> {
        Some(self)
    }

    fn as_cloud_mut(&mut self) -> Option<&mut CloudDemo> {
        Some(self)
    }
}
