//! Color utility functions for background rendering.

use ratatui::style::Color;

/// Scale an RGB color toward black by `alpha` in `[0, 1]`.
pub fn fade(rgb: (u8, u8, u8), alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    let channel = |c: u8| (c as f32 * alpha).round() as u8;
    Color::Rgb(channel(rgb.0), channel(rgb.1), channel(rgb.2))
}

/// Composite `top` over `bottom` with opacity `alpha`.
pub fn blend(bottom: (u8, u8, u8), top: (u8, u8, u8), alpha: f32) -> (u8, u8, u8) {
    let alpha = alpha.clamp(0.0, 1.0);
    let mix = |b: u8, t: u8| (b as f32 + (t as f32 - b as f32) * alpha).round() as u8;
    (mix(bottom.0, top.0), mix(bottom.1, top.1), mix(bottom.2, top.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_bounds() {
        assert_eq!(fade((200, 100, 50), 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(fade((200, 100, 50), 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(fade((200, 100, 50), 2.0), Color::Rgb(200, 100, 50));
    }

    #[test]
    fn test_blend_halfway() {
        assert_eq!(blend((0, 0, 0), (200, 100, 50), 0.5), (100, 50, 25));
        assert_eq!(blend((10, 10, 10), (200, 100, 50), 0.0), (10, 10, 10));
    }
}
