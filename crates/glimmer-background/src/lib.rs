//! Ambient background for the glimmer greeting page.
//!
//! This crate provides the floating glyph background: a one-shot procedural
//! element generator, scroll and pointer parallax per depth layer, looping
//! per-element motion sampled from elapsed time, and a compositor that turns
//! all of it into terminal cells each frame.

pub mod ambient;
mod chars;
mod color;
pub mod compositor;
pub mod easing;
pub mod events;
pub mod generator;
pub mod input;
pub mod parallax;
pub mod render;
pub mod scheduler;
pub mod spring;
mod state;

pub use chars::GLYPH_CHARS;
pub use compositor::{ComposedFrame, GlyphInstance, compose};
pub use events::{EventHub, EventKind, HostEvent, Subscription};
pub use generator::{ElementGenerator, GenerateError};
pub use input::{InputState, Viewport};
pub use render::CellMetrics;
pub use state::{BackgroundSettings, BackgroundState};
