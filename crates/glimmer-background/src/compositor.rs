//! Frame composition: generator output + parallax + per-element motion.

use glimmer_core::{FloatingElement, GlyphColor, Layer, Vec2};

use crate::input::InputState;
use crate::parallax::{ambient_pointer_offset, ambient_scroll_offset, pointer_offset, scroll_offset};
use crate::scheduler::{LocalTransform, local_transform};

/// One glyph ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInstance {
    pub id: usize,
    pub shape: char,
    pub color: GlyphColor,
    pub layer: Layer,
    /// Font size in pixels before scaling.
    pub size: f32,
    /// Anchor position as viewport percentages.
    pub anchor: Vec2,
    /// Scroll and pointer parallax, in pixels.
    pub parallax: Vec2,
    /// The element's own motion.
    pub local: LocalTransform,
}

impl GlyphInstance {
    /// Total pixel translation from the anchor.
    pub fn translation(&self) -> Vec2 {
        self.parallax + self.local.offset
    }
}

/// A composed frame of the whole background.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedFrame {
    /// Translation of the ambient gradient layer, in pixels.
    pub ambient_translation: Vec2,
    /// Glyphs in paint order.
    pub glyphs: Vec<GlyphInstance>,
    /// Animation time the frame was sampled at, in seconds.
    pub time: f32,
}

/// Compose a frame where glyphs and the ambient layer see the same pointer.
pub fn compose(elements: &[FloatingElement], input: &InputState, t: f32) -> ComposedFrame {
    compose_with_ambient_pointer(elements, input, input.pointer, t)
}

/// Compose a frame, giving the ambient layer its own pointer position.
pub fn compose_with_ambient_pointer(
    elements: &[FloatingElement],
    input: &InputState,
    ambient_pointer: Vec2,
    t: f32,
) -> ComposedFrame {
    let glyphs = elements
        .iter()
        .map(|element| GlyphInstance {
            id: element.id,
            shape: element.shape,
            color: element.color,
            layer: element.layer,
            size: element.size,
            anchor: element.position,
            parallax: Vec2::new(0.0, scroll_offset(element.layer, input.scroll))
                + pointer_offset(element.layer, input.pointer, element.id),
            local: local_transform(element, t),
        })
        .collect();

    ComposedFrame {
        ambient_translation: Vec2::new(0.0, ambient_scroll_offset(input.scroll))
            + ambient_pointer_offset(ambient_pointer),
        glyphs,
        time: t,
    }
}
