//! Demo scenes.
//!
//! A demo owns the drawable entity and reacts to input and time. The light,
//! the camera and the light-control flags live on the [`Stage`], which the
//! app owns and lends to the active demo on every call.

pub mod cloud;
pub mod simple;

use cumulus_core::Pointer;
use cumulus_render::{Camera, PointLight, VolumeEntity};

pub use cloud::{CloudDemo, DemoState};
pub use simple::SimpleDemo;

/// Scene state shared between the app and the active demo.
#[derive(Debug, Clone)]
pub struct Stage {
    pub light: PointLight,
    pub camera: Camera,
    /// Whether pointer movement steers the light.
    pub controls_enabled: bool,
    /// Seconds since the light was last steered by hand.
    pub auto_light_timer: f32,
    /// Idle time after which the light animates itself.
    pub auto_light_timeout: f32,
}

impl Stage {
    /// Stage with a default light and camera.
    #[must_use]
    pub fn new(auto_light_timeout: f32) -> Self {
        Self {
            light: PointLight::default(),
            camera: Camera::default(),
            controls_enabled: true,
            auto_light_timer: 0.0,
            auto_light_timeout,
        }
    }
}

/// A scene the app can run.
pub trait Demo {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Called on pointer press.
    fn on_pointer_down(&mut self, stage: &mut Stage);

    /// Called after the pointer moved.
    fn on_pointer_move(&mut self, pointer: &Pointer, stage: &mut Stage);

    /// Advances the demo to `elapsed` seconds; `delta` is the time since the
    /// previous update.
    fn update(&mut self, elapsed: f32, delta: f32, stage: &mut Stage);

    /// The drawable.
    fn entity(&self) -> &VolumeEntity;

    /// The drawable, mutably.
    fn entity_mut(&mut self) -> &mut VolumeEntity;

    /// Downcast to the cloud demo.
    fn as_cloud(&self) -> Option<&CloudDemo> {
        None
    }

    /// Mutable downcast to the cloud demo.
    fn as_cloud_mut(&mut self) -> Option<&mut CloudDemo> {
        None
    }
}
