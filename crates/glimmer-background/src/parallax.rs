//! Scroll and pointer parallax.
//!
//! Every function here is pure. Scroll offsets are linear maps of the page
//! scroll position, pointer offsets scale the normalized pointer by a
//! per-layer factor.

use glimmer_core::{Layer, Vec2};

/// Scroll distance (px) over which each layer reaches its full offset.
pub const SCROLL_RANGE_PX: f32 = 1000.0;

/// Vertical offset of the ambient gradient layer at [`SCROLL_RANGE_PX`].
pub const AMBIENT_SCROLL_TRAVEL: f32 = -80.0;

/// Pointer multiplier for the ambient gradient layer.
pub const AMBIENT_POINTER_FACTOR: f32 = -30.0;

/// Pointer multiplier per depth step.
pub const POINTER_FACTOR_STEP: f32 = 40.0;

/// Vertical offset reached by a layer at [`SCROLL_RANGE_PX`].
pub fn scroll_travel(layer: Layer) -> f32 {
    match layer {
        Layer::Far => -50.0,
        Layer::Middle => -120.0,
        Layer::Near => -200.0,
    }
}

/// Map `value` linearly from `[0, from]` onto `[0, to]` without clamping.
fn map_linear(value: f32, from: f32, to: f32) -> f32 {
    value / from * to
}

/// Vertical offset of a layer for the given scroll position.
///
/// Scroll positions past [`SCROLL_RANGE_PX`] keep extrapolating.
pub fn scroll_offset(layer: Layer, scroll: f32) -> f32 {
    map_linear(scroll, SCROLL_RANGE_PX, scroll_travel(layer))
}

/// Vertical offset of the ambient gradient layer.
pub fn ambient_scroll_offset(scroll: f32) -> f32 {
    map_linear(scroll, SCROLL_RANGE_PX, AMBIENT_SCROLL_TRAVEL)
}

/// Pointer multiplier for a layer: farther layers move less.
pub fn pointer_factor(layer: Layer) -> f32 {
    (layer.index() + 1) as f32 * POINTER_FACTOR_STEP
}

/// Pointer-driven offset of an element.
///
/// Even ids follow the pointer and odd ids move against it, which gives
/// neighbouring glyphs opposing depth cues.
pub fn pointer_offset(layer: Layer, pointer: Vec2, element_id: usize) -> Vec2 {
    let sign = if element_id % 2 == 0 { 1.0 } else { -1.0 };
    pointer * pointer_factor(layer) * sign
}

/// Damped, inverted pointer offset of the ambient gradient layer.
pub fn ambient_pointer_offset(pointer: Vec2) -> Vec2 {
    pointer * AMBIENT_POINTER_FACTOR
}
