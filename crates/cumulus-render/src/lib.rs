//! Renderer-facing scene description for cumulus.
//!
//! This crate describes what a renderer should draw without depending on a
//! graphics API:
//! - [`CloudMaterial`] with change tracking and its [`CloudUniforms`] layout
//! - [`PointLight`] and [`Camera`]
//! - [`VolumeEntity`], the one object in the scene
//! - [`RenderAdapter`], implemented by backends, and [`HeadlessRenderer`]

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::float_cmp)]

pub mod adapter;
pub mod camera;
pub mod entity;
pub mod light;
pub mod material;

pub use adapter::{Frame, HeadlessRenderer, RenderAdapter, DEFAULT_HISTORY_LIMIT};
pub use camera::Camera;
pub use entity::{Geometry, Surface, VolumeEntity};
pub use light::{PointLight, LIGHT_INTENSITY};
pub use material::{CloudMaterial, CloudUniforms, MaterialChanges, MaterialParam};
