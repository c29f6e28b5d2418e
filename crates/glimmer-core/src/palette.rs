//! Glyph color tokens.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Pastel color token assigned to a floating glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphColor {
    Rose,
    Pink,
    Purple,
    Sky,
    Amber,
    Teal,
    Indigo,
    Orange,
    Emerald,
    Fuchsia,
}

impl GlyphColor {
    /// The full palette, in draw order.
    pub const ALL: [GlyphColor; 10] = [
        GlyphColor::Rose,
        GlyphColor::Pink,
        GlyphColor::Purple,
        GlyphColor::Sky,
        GlyphColor::Amber,
        GlyphColor::Teal,
        GlyphColor::Indigo,
        GlyphColor::Orange,
        GlyphColor::Emerald,
        GlyphColor::Fuchsia,
    ];

    /// RGB components of the token at full opacity.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            GlyphColor::Rose => (253, 164, 175),    // rose-300
            GlyphColor::Pink => (249, 168, 212),    // pink-300
            GlyphColor::Purple => (216, 180, 254),  // purple-300
            GlyphColor::Sky => (186, 230, 253),     // sky-200
            GlyphColor::Amber => (253, 230, 138),   // amber-200
            GlyphColor::Teal => (153, 246, 228),    // teal-200
            GlyphColor::Indigo => (199, 210, 254),  // indigo-200
            GlyphColor::Orange => (254, 215, 170),  // orange-200
            GlyphColor::Emerald => (167, 243, 208), // emerald-200
            GlyphColor::Fuchsia => (245, 208, 254), // fuchsia-200
        }
    }

    /// Get the ratatui color for this token.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }

    /// Display name for the token.
    pub fn name(self) -> &'static str {
        match self {
            GlyphColor::Rose => "rose",
            GlyphColor::Pink => "pink",
            GlyphColor::Purple => "purple",
            GlyphColor::Sky => "sky",
            GlyphColor::Amber => "amber",
            GlyphColor::Teal => "teal",
            GlyphColor::Indigo => "indigo",
            GlyphColor::Orange => "orange",
            GlyphColor::Emerald => "emerald",
            GlyphColor::Fuchsia => "fuchsia",
        }
    }
}
