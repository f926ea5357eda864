//! Pointer tracking.
//!
//! Converts client-space pointer positions into coordinates normalized
//! against the tracked element: `[-1, 1]` on both axes, origin at the center,
//! y pointing up.

use glam::Vec2;

/// Pointer position relative to an element.
///
/// Call [`Pointer::resize`] whenever the element dimensions change; previously
/// stored coordinates are not re-projected.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    position: Vec2,
    normalized: Vec2,
    offset: Vec2,
    size: Vec2,
}

impl Pointer {
    /// Creates a pointer tracker for an element of the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        let mut pointer = Self::default();
        pointer.resize(width, height);
        pointer
    }

    /// Sets the element's client-space offset.
    #[must_use]
    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Records a pointer event at client coordinates `(client_x, client_y)`.
    pub fn update(&mut self, client_x: f32, client_y: f32) {
        let position = Vec2::new(client_x, client_y) - self.offset;
        self.position = position;
        self.normalized = Vec2::new(
            normalize_axis(position.x, self.size.x),
            -normalize_axis(position.y, self.size.y),
        );
    }

    /// Stores new element dimensions. Negative sizes are treated as zero.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
    }

    /// Position in element pixels.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Horizontal coordinate in `[-1, 1]`.
    #[must_use]
    pub fn x_norm(&self) -> f32 {
        self.normalized.x
    }

    /// Vertical coordinate in `[-1, 1]`, positive up.
    #[must_use]
    pub fn y_norm(&self) -> f32 {
        self.normalized.y
    }

    /// Element dimensions used for normalization.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }
}

fn normalize_axis(value: f32, extent: f32) -> f32 {
    if extent <= 0.0 {
        return 0.0;
    }
    ((value / extent) * 2.0 - 1.0).clamp(-1.0, 1.0)
}
