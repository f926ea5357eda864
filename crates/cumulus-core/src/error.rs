//! Error types for cumulus.

use thiserror::Error;

/// The main error type for cumulus operations.
#[derive(Error, Debug)]
pub enum CumulusError {
    /// A volume dimension was zero, or the voxel count does not fit in memory.
    #[error("invalid volume dimensions {width}x{height}x{depth} - every axis must be non-zero and the grid addressable")]
    InvalidDimension {
        width: u32,
        height: u32,
        depth: u32,
    },

    /// A falloff shape cannot be evaluated (non-positive or non-finite weights).
    #[error("invalid falloff shape: {0}")]
    InvalidFalloff(String),

    /// An interpolator was configured with `max < min`.
    #[error("degenerate interpolator range: max {max} is below min {min}")]
    DegenerateInterpolatorRange { min: f32, max: f32 },

    /// The background gradient worker never delivered its result.
    #[error("gradient worker failed to deliver: {0}")]
    WorkerDeliveryFailure(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A preset with the given name does not exist.
    #[error("preset '{0}' not found")]
    UnknownPreset(String),

    /// A preset failed validation.
    #[error("invalid preset: {0}")]
    InvalidPreset(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for cumulus operations.
pub type Result<T> = std::result::Result<T, CumulusError>;
