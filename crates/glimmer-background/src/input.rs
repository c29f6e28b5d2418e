//! Live pointer and scroll input.

use glimmer_core::Vec2;

/// Viewport dimensions, in whatever unit the host reports pointer
/// coordinates in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Normalize a viewport-relative coordinate to `[-0.5, 0.5]` around the
    /// center. Returns `None` for a degenerate viewport.
    pub fn normalize(&self, x: f32, y: f32) -> Option<Vec2> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some(Vec2::new(x / self.width - 0.5, y / self.height - 0.5))
    }
}

/// Latest pointer and scroll values seen by the background.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Pointer position normalized to `[-0.5, 0.5]` on both axes.
    pub pointer: Vec2,
    /// Vertical page scroll in pixels.
    pub scroll: f32,
}

impl InputState {
    /// Record a raw pointer position. Ignored when the viewport is degenerate.
    pub fn record_pointer(&mut self, x: f32, y: f32, viewport: Viewport) {
        if let Some(pointer) = viewport.normalize(x, y) {
            self.pointer = pointer;
        }
    }

    /// Record a raw scroll offset in pixels.
    pub fn record_scroll(&mut self, offset: f32) {
        if offset.is_finite() {
            self.scroll = offset.max(0.0);
        }
    }
}
