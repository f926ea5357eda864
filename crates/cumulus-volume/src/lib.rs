//! Volume data for cumulus.
//!
//! This crate builds the data the cloud renderer samples:
//! - [`VolumeGenerator`] turns coherent noise and a [`FalloffShape`] into a
//!   [`DensityVolume`]
//! - [`compute_gradients`] derives a [`GradientField`] used as shading normals
//! - [`compute_gradients_async`] runs the same computation on a worker thread

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Grid coordinates and densities go through lossy casts on purpose
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]

pub mod density;
pub mod falloff;
pub mod generator;
pub mod gradient;
pub mod noise;
pub mod task;

pub use density::DensityVolume;
pub use falloff::FalloffShape;
pub use generator::{generate, VolumeGenerator, DEFAULT_NOISE_SCALE, DEFAULT_SIZE};
pub use gradient::{compute_gradients, compute_gradients_into, GradientField};
pub use noise::{ConstantNoise, ImprovedNoise, NoiseSource};
pub use task::{compute_gradients_async, GradientTask};
