//! Ambient gradient orbs drawn behind the floating glyphs.

use glimmer_core::Vec2;

use crate::easing::{Easing, sample_keyframes};

/// Length of one orb pulse cycle, in seconds.
pub const PULSE_SECS: f32 = 2.0;

const PULSE_EASING: Easing = Easing::CubicBezier(0.4, 0.0, 0.6, 1.0);

/// Horizontal placement of an orb's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HorizontalAnchor {
    /// Left edge at a percentage of the viewport width.
    Left(f32),
    /// Right edge inset by a percentage of the viewport width.
    Right(f32),
}

/// Vertical placement of an orb's bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VerticalAnchor {
    Top(f32),
    Bottom(f32),
}

/// A soft, pulsing blob of color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
    /// Diameter in pixels.
    pub diameter: f32,
    pub rgb: (u8, u8, u8),
    /// Opacity at the center of the orb at full pulse.
    pub opacity: f32,
    /// Pulse phase offset in seconds.
    pub pulse_delay: f32,
}

/// The orb layout of the greeting page.
pub const ORBS: [Orb; 6] = [
    Orb {
        horizontal: HorizontalAnchor::Left(-10.0),
        vertical: VerticalAnchor::Top(-10.0),
        diameter: 384.0,
        rgb: (251, 207, 232), // pink-200
        opacity: 0.3,
        pulse_delay: 0.0,
    },
    Orb {
        horizontal: HorizontalAnchor::Right(-10.0),
        vertical: VerticalAnchor::Top(40.0),
        diameter: 320.0,
        rgb: (233, 213, 255), // purple-200
        opacity: 0.3,
        pulse_delay: 0.7,
    },
    Orb {
        horizontal: HorizontalAnchor::Left(20.0),
        vertical: VerticalAnchor::Bottom(-10.0),
        diameter: 384.0,
        rgb: (254, 249, 195), // yellow-100
        opacity: 0.3,
        pulse_delay: 1.0,
    },
    Orb {
        horizontal: HorizontalAnchor::Left(40.0),
        vertical: VerticalAnchor::Top(20.0),
        diameter: 256.0,
        rgb: (255, 228, 230), // rose-100
        opacity: 0.2,
        pulse_delay: 0.5,
    },
    Orb {
        horizontal: HorizontalAnchor::Right(20.0),
        vertical: VerticalAnchor::Bottom(20.0),
        diameter: 288.0,
        rgb: (204, 251, 241), // teal-100
        opacity: 0.2,
        pulse_delay: 0.2,
    },
    Orb {
        horizontal: HorizontalAnchor::Left(-5.0),
        vertical: VerticalAnchor::Top(60.0),
        diameter: 256.0,
        rgb: (224, 231, 255), // indigo-100
        opacity: 0.25,
        pulse_delay: 0.3,
    },
];

impl Orb {
    /// Center of the orb in pixels for a viewport of `size` pixels.
    pub fn center(&self, size: Vec2) -> Vec2 {
        let radius = self.diameter / 2.0;
        let left = match self.horizontal {
            HorizontalAnchor::Left(pct) => pct / 100.0 * size.x,
            HorizontalAnchor::Right(pct) => size.x - pct / 100.0 * size.x - self.diameter,
        };
        let top = match self.vertical {
            VerticalAnchor::Top(pct) => pct / 100.0 * size.y,
            VerticalAnchor::Bottom(pct) => size.y - pct / 100.0 * size.y - self.diameter,
        };
        Vec2::new(left + radius, top + radius)
    }

    /// Pulse multiplier `1 → 0.5 → 1` at animation time `t` (seconds).
    pub fn pulse(&self, t: f32) -> f32 {
        let local = t - self.pulse_delay;
        if local < 0.0 {
            return 1.0;
        }
        let progress = local.rem_euclid(PULSE_SECS) / PULSE_SECS;
        sample_keyframes(&[1.0, 0.5, 1.0], progress, PULSE_EASING)
    }

    /// Opacity contributed at pixel `point`, given the layer translation.
    ///
    /// Falls off smoothly from the center to zero at the blurred rim.
    pub fn opacity_at(&self, point: Vec2, size: Vec2, translation: Vec2, t: f32) -> f32 {
        let radius = self.diameter / 2.0;
        if radius <= 0.0 {
            return 0.0;
        }
        let distance = point.distance(self.center(size) + translation) / radius;
        if distance >= 1.0 {
            return 0.0;
        }
        let falloff = 1.0 - distance * distance;
        self.opacity * falloff * self.pulse(t)
    }
}
