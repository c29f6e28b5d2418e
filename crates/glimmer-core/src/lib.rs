//! Core types shared by the glimmer crates.

mod element;
mod palette;
mod speed;

pub use element::{FloatingElement, Layer, RotationDirection};
pub use glam::Vec2;
pub use palette::GlyphColor;
pub use speed::AnimationSpeed;
