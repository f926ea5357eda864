//! A volumetric cloud demo.
//!
//! cumulus generates a noisy density volume, derives its gradients on a
//! worker thread and animates a ray-marched cloud lit by a single point
//! light. Pressing the pointer burns the cloud; it then slowly recovers.
//!
//! The crate is renderer-agnostic: every tick produces a [`Frame`] that a
//! [`RenderAdapter`] turns into pixels.
//!
//! # Quick Start
//!
//! ```no_run
//! use cumulus::*;
//!
//! fn main() -> Result<()> {
//!     init();
//!     let options = DemoOptions::default();
//!     let config = select_config(None, true, &mut rand::thread_rng());
//!     let mut app = App::new(&options, &config, true)?;
//!     app.resize(1280.0, 720.0);
//!
//!     let mut renderer = HeadlessRenderer::new();
//!     run_headless(&mut app, 120, 1.0 / 60.0, &mut renderer);
//!     Ok(())
//! }
//! ```

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod demo;
mod init;
pub mod options;
pub mod select;

pub use app::{run_headless, App};
pub use demo::{CloudDemo, Demo, DemoState, SimpleDemo, Stage};
pub use init::init;
pub use options::{DemoOptions, Palette};
pub use select::{select_config, DemoConfig};

// Re-export the building blocks
pub use cumulus_core::{
    CumulusError, Interpolator, PeriodicInterpolator, Pointer, Preset, PresetTable, Range,
    Result, Transform,
};
pub use cumulus_render::{
    Camera, CloudMaterial, Frame, HeadlessRenderer, MaterialChanges, PointLight, RenderAdapter,
    VolumeEntity,
};
pub use cumulus_volume::{
    compute_gradients, compute_gradients_async, generate, DensityVolume, FalloffShape,
    GradientField, GradientTask, VolumeGenerator,
};

pub use glam::{Mat4, UVec3, Vec2, Vec3};
