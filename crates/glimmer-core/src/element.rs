//! Floating element model.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::palette::GlyphColor;

/// Depth layer of a floating element (0 = farthest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Far,
    Middle,
    Near,
}

impl Layer {
    /// All layers, farthest first.
    pub const ALL: [Layer; 3] = [Layer::Far, Layer::Middle, Layer::Near];

    /// Depth index of this layer.
    pub fn index(self) -> usize {
        match self {
            Layer::Far => 0,
            Layer::Middle => 1,
            Layer::Near => 2,
        }
    }

    /// Layer for a depth index, if it is in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Spin direction of an element's continuous rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// Sign applied to the 360° sweep: `+1` or `-1`.
    pub fn sign(self) -> f32 {
        match self {
            RotationDirection::Clockwise => 1.0,
            RotationDirection::CounterClockwise => -1.0,
        }
    }
}

/// A decorative glyph generated once at mount and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingElement {
    /// Zero-based, contiguous identifier.
    pub id: usize,
    /// Anchor position as viewport percentages in `[0, 100]`.
    pub position: Vec2,
    /// Font size in pixels, `[5, 30]`.
    pub size: f32,
    /// Primary cycle length in seconds, `[15, 35]`.
    pub duration: f32,
    /// Phase offset in seconds, `[0, 10]`.
    pub delay: f32,
    /// Glyph drawn for this element.
    pub shape: char,
    /// Color token.
    pub color: GlyphColor,
    /// Starting rotation in degrees, `[0, 360)`.
    pub base_rotation: f32,
    /// Depth layer, determines parallax sensitivity.
    pub layer: Layer,
    /// Direction of the continuous rotation.
    pub rotation_direction: RotationDirection,
    /// Horizontal sway amplitude in pixels, `[10, 40]`.
    pub sway_distance: f32,
    /// Sway cycle length in seconds, `[10, 20]`.
    pub sway_duration: f32,
}

impl FloatingElement {
    /// Whether the element has an even id. Even ids follow the pointer,
    /// odd ids move against it.
    pub fn is_even(&self) -> bool {
        self.id % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_index_round_trip() {
        for layer in Layer::ALL {
            assert_eq!(Layer::from_index(layer.index()), Some(layer));
        }
        assert_eq!(Layer::from_index(3), None);
    }

    #[test]
    fn test_layers_ordered_far_to_near() {
        assert!(Layer::Far < Layer::Middle);
        assert!(Layer::Middle < Layer::Near);
    }

    #[test]
    fn test_rotation_sign() {
        assert_eq!(RotationDirection::Clockwise.sign(), 1.0);
        assert_eq!(RotationDirection::CounterClockwise.sign(), -1.0);
    }
}
