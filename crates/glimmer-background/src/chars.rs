//! Character constants for the ambient background.

/// Glyphs a floating element can take.
pub const GLYPH_CHARS: &[char] = &[
    '♥', '✦', '•', '⋆', '✿', '♪', '☁', '✧', '☀', '❄', '✾', '☘', '⚓', '♦', '❋', '✺', '❆',
];

/// Shading used for ambient orbs, faintest first.
pub const ORB_SHADES: &[char] = &['░', '▒', '▓'];
