//! Core abstractions for cumulus.
//!
//! This crate provides the building blocks shared by the other cumulus crates:
//! - [`Interpolator`] and [`PeriodicInterpolator`] for time-driven parameters
//! - Easing curves and small scalar helpers
//! - [`Pointer`] input normalization
//! - Named visual [`Preset`]s
//! - The [`CumulusError`] type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Color channels and grid sizes go through lossy casts on purpose
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod color;
pub mod error;
pub mod input;
pub mod interpolator;
pub mod math;
pub mod preset;
pub mod transform;

pub use error::{CumulusError, Result};
pub use input::Pointer;
pub use interpolator::{Interpolator, PeriodicInterpolator};
pub use math::EasingFn;
pub use preset::{Preset, PresetTable, Range};
pub use transform::Transform;

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, UVec3, Vec2, Vec3};
