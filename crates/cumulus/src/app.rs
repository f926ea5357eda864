//! Application controller.
//!
//! [`App`] owns the active demo and the [`Stage`] it plays on. The host feeds
//! it input events and a clock, and asks it for a [`Frame`] to draw. Nothing
//! here touches a window or a GPU.

use cumulus_core::math::{clamp, sin_norm, PI_OVER_2};
use cumulus_core::{PeriodicInterpolator, Pointer, Preset, Result};
use cumulus_render::{Frame, RenderAdapter};
use glam::Vec3;

use crate::demo::{CloudDemo, Demo, DemoState, SimpleDemo, Stage};
use crate::options::DemoOptions;
use crate::select::DemoConfig;

/// Range of the slow breathing scale applied to the drawable.
pub const SCALE_RANGE: (f32, f32) = (0.92, 1.1);
const SCALE_TIME_SCALE: f32 = 0.125;
/// Yaw speed of the drawable, in radians per second.
pub const ROTATION_SPEED: f32 = 0.15;
/// Distance of the automatic light from the cloud center.
pub const AUTO_LIGHT_RADIUS: f32 = 1.0;

/// Runs one demo.
pub struct App {
    demo: Box<dyn Demo>,
    stage: Stage,
    pointer: Pointer,
    background: Vec3,
    scale: PeriodicInterpolator,
    elapsed: f32,
    frame_index: u64,
    prompt_visible: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("demo", &self.demo.name())
            .field("stage", &self.stage)
            .field("elapsed", &self.elapsed)
            .field("frame_index", &self.frame_index)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Builds the app for `config`.
    ///
    /// Cloud configs need volume support from the renderer; without it the
    /// simple demo runs instead. A cloud config naming a preset missing from
    /// `options.presets` fails with `UnknownPreset`.
    pub fn new(options: &DemoOptions, config: &DemoConfig, supports_volume: bool) -> Result<Self> {
        options.validate()?;
        let mut stage = Stage::new(options.auto_light_timeout);
        stage.light.color = options.palette().light;
        stage.light.intensity = options.light_intensity;

        let demo: Box<dyn Demo> = match config {
            DemoConfig::Cloud(name) if supports_volume => {
                let preset = options.presets.get(name)?;
                stage.camera.set_fov_degrees(preset.camera_fov);
                Box::new(CloudDemo::new(name.as_str(), preset, options)?)
            }
            DemoConfig::Cloud(name) => {
                log::warn!("no volume support, running the simple demo instead of '{name}'");
                Box::new(SimpleDemo::new())
            }
            DemoConfig::Simple => Box::new(SimpleDemo::new()),
        };
        Ok(Self::with_demo(demo, stage, options))
    }

    /// Builds the app around an already constructed demo.
    #[must_use]
    pub fn with_demo(demo: Box<dyn Demo>, stage: Stage, options: &DemoOptions) -> Self {
        log::info!("running the '{}' demo", demo.name());
        Self {
            demo,
            stage,
            pointer: Pointer::default(),
            background: options.palette().background,
            scale: PeriodicInterpolator::new(SCALE_RANGE.0, SCALE_RANGE.1).with_ease(sin_norm),
            elapsed: 0.0,
            frame_index: 0,
            prompt_visible: true,
        }
    }

    /// Handles a pointer press.
    pub fn on_pointer_down(&mut self) {
        if self.prompt_visible {
            self.prompt_visible = false;
            log::debug!("hiding interaction prompt");
        }
        self.demo.on_pointer_down(&mut self.stage);
    }

    /// Handles pointer movement in client coordinates.
    pub fn on_pointer_move(&mut self, client_x: f32, client_y: f32) {
        self.pointer.update(client_x, client_y);
        self.demo.on_pointer_move(&self.pointer, &mut self.stage);
    }

    /// Handles a viewport resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.pointer.resize(width, height);
        self.stage.camera.resize(width, height);
    }

    /// Advances the scene to `elapsed` seconds, `delta` seconds after the
    /// previous update.
    pub fn update(&mut self, elapsed: f32, delta: f32) {
        self.elapsed = elapsed;

        let scale = self.scale.evaluate(elapsed * SCALE_TIME_SCALE);
        let transform = &mut self.demo.entity_mut().transform;
        transform.set_uniform_scale(scale);
        transform.rotate_y(delta * ROTATION_SPEED);

        self.update_auto_light(elapsed, delta);
        self.demo.update(elapsed, delta, &mut self.stage);
    }

    /// Advances the internal clock by `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        self.update(self.elapsed + delta, delta);
    }

    /// Moves the light on its own once the pointer has been idle long enough.
    fn update_auto_light(&mut self, elapsed: f32, delta: f32) {
        let timeout = self.stage.auto_light_timeout;
        let timer = self.stage.auto_light_timer;
        if timer >= timeout {
            let theta = ((elapsed * 0.75 + PI_OVER_2) * 2.5).sin() * PI_OVER_2;
            let phi = ((elapsed * 0.75 - PI_OVER_2) * 1.35).sin() * std::f32::consts::TAU;
            let blend = clamp((timer - timeout) / timeout, 0.0, 1.0);
            self.stage
                .light
                .set_spherical(theta, phi, AUTO_LIGHT_RADIUS, blend);
        }
        self.stage.auto_light_timer += delta;
    }

    /// Snapshot of the scene for the renderer.
    ///
    /// Drains the material change set, so every frame reports only what
    /// changed since the previous one.
    pub fn frame(&mut self) -> Frame {
        let changes = self
            .demo
            .entity_mut()
            .cloud_material_mut()
            .map(cumulus_render::CloudMaterial::apply_changes)
            .unwrap_or_default();
        let frame = Frame {
            index: self.frame_index,
            background: self.background,
            camera: self.stage.camera.clone(),
            light: self.stage.light,
            entity: self.demo.entity().clone(),
            changes,
        };
        self.frame_index += 1;
        frame
    }

    /// Switches the running cloud to another look, camera included.
    ///
    /// The burn cycle carries on. Has no effect on the simple demo.
    pub fn apply_preset(&mut self, preset: &Preset) {
        let Some(cloud) = self.demo.as_cloud_mut() else {
            log::debug!("ignoring preset change on the '{}' demo", self.demo.name());
            return;
        };
        cloud.apply_preset(preset);
        self.stage.camera.set_fov_degrees(preset.camera_fov);
    }

    /// Builds a frame and submits it to `adapter`.
    pub fn render(&mut self, adapter: &mut dyn RenderAdapter) {
        let frame = self.frame();
        adapter.submit(&frame);
    }

    /// The active demo.
    #[must_use]
    pub fn demo(&self) -> &dyn Demo {
        self.demo.as_ref()
    }

    /// The active demo, mutably.
    pub fn demo_mut(&mut self) -> &mut dyn Demo {
        self.demo.as_mut()
    }

    /// The cloud demo, if one is running.
    #[must_use]
    pub fn cloud(&self) -> Option<&CloudDemo> {
        self.demo.as_cloud()
    }

    /// The cloud demo, mutably.
    pub fn cloud_mut(&mut self) -> Option<&mut CloudDemo> {
        self.demo.as_cloud_mut()
    }

    /// Burn-cycle phase, if a cloud demo is running.
    #[must_use]
    pub fn state(&self) -> Option<DemoState> {
        self.cloud().map(CloudDemo::state)
    }

    #[must_use]
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    #[must_use]
    pub fn pointer(&self) -> &Pointer {
        &self.pointer
    }

    /// Time of the last update, in seconds.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the "click the cloud" hint is still shown.
    #[must_use]
    pub fn prompt_visible(&self) -> bool {
        self.prompt_visible
    }
}

/// Drives `app` for `frames` fixed steps of `dt` seconds, rendering each one.
pub fn run_headless(app: &mut App, frames: u32, dt: f32, adapter: &mut dyn RenderAdapter) {
    log::info!("running {frames} headless frame(s) at {dt}s");
    for _ in 0..frames {
        app.advance(dt);
        app.render(adapter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumulus_render::HeadlessRenderer;
    use glam::UVec3;

    fn small_options() -> DemoOptions {
        DemoOptions::default()
            .with_volume_size(UVec3::splat(8))
            .with_gradient_delay(0.0)
    }

    fn cloud_app() -> App {
        App::new(&small_options(), &DemoConfig::cloud("cloud"), true).unwrap()
    }

    #[test]
    fn test_new_cloud_app() {
        let app = cloud_app();
        assert_eq!(app.state(), Some(DemoState::Idle));
        assert!((app.stage().camera.fov_degrees() - 40.0).abs() < 1e-4);
        assert!(app.prompt_visible());
        assert_eq!(app.stage().light.intensity, 2.0);
    }

    #[test]
    fn test_missing_volume_support_runs_simple() {
        let app = App::new(&small_options(), &DemoConfig::cloud("cloud"), false).unwrap();
        assert!(app.cloud().is_none());
        assert_eq!(app.demo().name(), "simple");
    }

    #[test]
    fn test_unknown_preset() {
        let err = App::new(&small_options(), &DemoConfig::cloud("cloudy"), true).unwrap_err();
        assert!(matches!(err, cumulus_core::CumulusError::UnknownPreset(name) if name == "cloudy"));
    }

    #[test]
    fn test_inverted_preset_range_is_swapped() {
        let preset = Preset {
            absorption: cumulus_core::Range::new(0.2, 0.1),
            ..Preset::cloud()
        };
        let mut presets = cumulus_core::PresetTable::new();
        presets.insert("cloudFlipped", preset);
        let options = small_options().with_presets(presets);

        let app = App::new(&options, &DemoConfig::cloud("cloudFlipped"), true).unwrap();
        let cloud = app.cloud().unwrap();
        assert_eq!(cloud.absorption().min(), 0.1);
        assert_eq!(cloud.absorption().max(), 0.2);
        assert_eq!(cloud.material().unwrap().absorption(), 0.1);
    }

    #[test]
    fn test_apply_preset_updates_camera() {
        let mut app = cloud_app();
        app.on_pointer_down();
        app.apply_preset(&Preset::cloud_inverse());
        assert!((app.stage().camera.fov_degrees() - 60.0).abs() < 1e-4);
        assert_eq!(app.state(), Some(DemoState::Burning));
        assert!(app.cloud().unwrap().material().unwrap().inverse());

        let mut simple = App::new(&small_options(), &DemoConfig::Simple, true).unwrap();
        let fov = simple.stage().camera.fov_degrees();
        simple.apply_preset(&Preset::cloud_inverse());
        assert_eq!(simple.stage().camera.fov_degrees(), fov);
    }

    #[test]
    fn test_pointer_down_hides_prompt() {
        let mut app = cloud_app();
        app.on_pointer_down();
        assert!(!app.prompt_visible());
        assert_eq!(app.state(), Some(DemoState::Burning));
    }

    #[test]
    fn test_transform_animation() {
        let mut app = cloud_app();
        for _ in 0..60 {
            app.advance(1.0 / 60.0);
        }
        let transform = app.demo().entity().transform;
        assert!((transform.yaw() - 0.15).abs() < 1e-3);
        let s = transform.scale.x;
        assert!((SCALE_RANGE.0..=SCALE_RANGE.1).contains(&s));
        assert_eq!(transform.scale, Vec3::splat(s));
    }

    #[test]
    fn test_auto_light_waits_for_timeout() {
        let mut app = cloud_app();
        app.resize(200.0, 100.0);
        app.on_pointer_move(100.0, 50.0);
        let steered = app.stage().light.position;

        // One second of idling stays below the 1.25s timeout.
        for _ in 0..60 {
            app.advance(1.0 / 60.0);
        }
        assert_eq!(app.stage().light.position, steered);

        for _ in 0..120 {
            app.advance(1.0 / 60.0);
        }
        assert_ne!(app.stage().light.position, steered);
    }

    #[test]
    fn test_auto_light_converges_to_orbit() {
        let mut app = cloud_app();
        // Well past twice the timeout the blend is 1 and the light sits on
        // the unit orbit.
        for _ in 0..240 {
            app.advance(1.0 / 60.0);
        }
        let radius = app.stage().light.position.length();
        assert!((radius - AUTO_LIGHT_RADIUS).abs() < 1e-4, "radius {radius}");
    }

    #[test]
    fn test_frames_report_changes_once() {
        let mut app = cloud_app();
        let first = app.frame();
        assert_eq!(first.index, 0);
        assert!(first.changes.needs_recompile);

        let second = app.frame();
        assert_eq!(second.index, 1);
        assert!(second.changes.is_empty());

        app.advance(0.5);
        let third = app.frame();
        assert!(!third.changes.is_empty());
        assert!(third.cloud_uniforms().is_some());
    }

    #[test]
    fn test_run_headless() {
        let mut app = cloud_app();
        let mut renderer = HeadlessRenderer::new();
        run_headless(&mut app, 30, 1.0 / 30.0, &mut renderer);
        assert_eq!(renderer.submitted(), 30);
        assert!((app.elapsed() - 1.0).abs() < 1e-4);
        assert_eq!(renderer.last_frame().map(|f| f.index), Some(29));
    }
}
