//! Procedural generation of the floating element population.

use glimmer_core::{FloatingElement, GlyphColor, Layer, RotationDirection, Vec2};
use rand::{Rng, SeedableRng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use crate::chars::GLYPH_CHARS;

/// Errors raised while generating elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The requested element count was negative.
    #[error("element count must be non-negative, got {0}")]
    NegativeCount(i64),
}

/// Produces randomized [`FloatingElement`]s from an injectable random source.
#[derive(Debug, Clone)]
pub struct ElementGenerator<R = ChaCha8Rng> {
    rng: R,
}

impl ElementGenerator<ChaCha8Rng> {
    /// Reproducible generator: the same seed always yields the same elements.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> ElementGenerator<R> {
    /// Wrap an existing random source.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate exactly `count` elements with ids `0..count`.
    pub fn generate(&mut self, count: i64) -> Result<Vec<FloatingElement>, GenerateError> {
        let count = usize::try_from(count).map_err(|_| GenerateError::NegativeCount(count))?;
        let elements: Vec<FloatingElement> = (0..count).map(|id| self.element(id)).collect();
        debug!(count, "generated floating elements");
        Ok(elements)
    }

    fn element(&mut self, id: usize) -> FloatingElement {
        let rng = &mut self.rng;
        FloatingElement {
            id,
            position: Vec2::new(rng.gen_range(0.0..=100.0), rng.gen_range(0.0..=100.0)),
            size: rng.gen_range(5.0..=30.0),
            duration: rng.gen_range(15.0..=35.0),
            delay: rng.gen_range(0.0..=10.0),
            shape: *GLYPH_CHARS.choose(rng).unwrap_or(&'•'),
            color: *GlyphColor::ALL.choose(rng).unwrap_or(&GlyphColor::Rose),
            base_rotation: rng.gen_range(0.0..360.0),
            layer: Layer::ALL[rng.gen_range(0..Layer::ALL.len())],
            rotation_direction: if rng.gen_bool(0.5) {
                RotationDirection::Clockwise
            } else {
                RotationDirection::CounterClockwise
            },
            sway_distance: rng.gen_range(10.0..=40.0),
            sway_duration: rng.gen_range(10.0..=20.0),
        }
    }
}
