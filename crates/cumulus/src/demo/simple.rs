//! Fallback demo for renderers without 3D texture support.

use cumulus_core::Pointer;
use cumulus_render::VolumeEntity;

use super::{Demo, Stage};

/// A flat-shaded octahedron that ignores input.
#[derive(Debug, Clone)]
pub struct SimpleDemo {
    entity: VolumeEntity,
}

impl Default for SimpleDemo {
    fn default() -> Self {
        Self {
            entity: VolumeEntity::octahedron(),
        }
    }
}

impl SimpleDemo {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Demo for SimpleDemo {
    fn name(&self) -> &str {
        "simple"
    }

    fn on_pointer_down(&mut self, _stage: &mut Stage) {}

    fn on_pointer_move(&mut self, _pointer: &Pointer, _stage: &mut Stage) {}

    fn update(&mut self, _elapsed: f32, _delta: f32, _stage: &mut Stage) {}

    fn entity(&self) -> &VolumeEntity {
        &self.entity
    }

    fn entity_mut(&mut self) -> &mut VolumeEntity {
        &mut self.entity
    }
}
