//! Hand-off point between the demo and a renderer.
//!
//! The demo never talks to a graphics API. Each tick it assembles a [`Frame`]
//! describing the whole scene and submits it to a [`RenderAdapter`]. A GPU
//! backend would translate the frame into draw calls; [`HeadlessRenderer`]
//! just records what it was given, which is what tests and batch runs need.

use glam::Vec3;

use crate::camera::Camera;
use crate::entity::VolumeEntity;
use crate::light::PointLight;
use crate::material::{CloudUniforms, MaterialChanges};

/// Everything needed to draw one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Monotonic frame number.
    pub index: u64,
    /// Linear-space clear color.
    pub background: Vec3,
    pub camera: Camera,
    pub light: PointLight,
    pub entity: VolumeEntity,
    /// Material parameters that changed since the previous frame.
    pub changes: MaterialChanges,
}

impl Frame {
    /// Uniform block of the cloud material, if the entity is a cloud.
    #[must_use]
    pub fn cloud_uniforms(&self) -> Option<CloudUniforms> {
        self.entity.cloud_material().map(CloudUniforms::from)
    }
}

/// A renderer that consumes frames.
pub trait RenderAdapter {
    /// Draws `frame`.
    fn submit(&mut self, frame: &Frame);
}

/// Frames a [`HeadlessRenderer`] keeps unless told otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 120;

/// Records submitted frames without drawing anything.
///
/// Only the most recent frames are kept, so long runs use bounded memory.
#[derive(Debug)]
pub struct HeadlessRenderer {
    frames: Vec<Frame>,
    limit: Option<usize>,
    submitted: u64,
    recompiles: u64,
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self {
            frames: Vec::new(),
            limit: Some(DEFAULT_HISTORY_LIMIT),
            submitted: 0,
            recompiles: 0,
        }
    }
}

impl HeadlessRenderer {
    /// Creates a renderer keeping the last [`DEFAULT_HISTORY_LIMIT`] frames.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps only the most recent `limit` frames.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Keeps every frame. Memory grows with the run length.
    #[must_use]
    pub fn with_unbounded_history(mut self) -> Self {
        self.limit = None;
        self
    }

    /// Recorded frames, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Total frames submitted, including ones dropped from the history.
    #[must_use]
    pub fn submitted(&self) -> u64 {
        self.submitted
    }

    /// How many frames asked for a shader rebuild.
    #[must_use]
    pub fn recompiles(&self) -> u64 {
        self.recompiles
    }

    /// Forgets recorded frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl RenderAdapter for HeadlessRenderer {
    fn submit(&mut self, frame: &Frame) {
        self.submitted += 1;
        if frame.changes.needs_recompile {
            self.recompiles += 1;
            log::debug!("frame {} rebuilds the cloud shader", frame.index);
        }
        if self.limit == Some(0) {
            return;
        }
        if let Some(limit) = self.limit {
            if self.frames.len() >= limit {
                self.frames.remove(0);
            }
        }
        self.frames.push(frame.clone());
    }
}
