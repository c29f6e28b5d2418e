//! Per-element periodic motion.
//!
//! Each element runs five looping motions (float, sway, fade, rotate and
//! breathe). All of them are pure functions of the elapsed animation time in
//! seconds: stopping an animation is simply not sampling it any more.

use glimmer_core::{FloatingElement, Vec2};

use crate::easing::{Easing, sample_keyframes};

/// Peak upward drift of the float motion, in pixels.
pub const FLOAT_HEIGHT: f32 = 50.0;

/// Peak opacity reached by the fade motion.
pub const PEAK_OPACITY: f32 = 0.5;

/// Time (s) over which a freshly mounted element grows from scale 0.
pub const GROW_IN_SECS: f32 = 0.6;

const FADE_KEYFRAMES: [f32; 3] = [0.0, PEAK_OPACITY, 0.0];
const BREATHE_KEYFRAMES: [f32; 3] = [0.8, 1.2, 0.8];

/// The independent motions every element runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    /// Vertical drift `0 → -50 → 0`.
    Float,
    /// Horizontal sway `0 → +d → 0 → -d → 0`.
    Sway,
    /// Opacity `0 → 0.5 → 0`.
    Fade,
    /// Full turn from the base rotation, linear.
    Rotate,
    /// Scale `0.8 → 1.2 → 0.8`.
    Breathe,
}

impl Motion {
    pub const ALL: [Motion; 5] = [
        Motion::Float,
        Motion::Sway,
        Motion::Fade,
        Motion::Rotate,
        Motion::Breathe,
    ];

    /// Cycle length of this motion for an element, in seconds.
    pub fn period(self, element: &FloatingElement) -> f32 {
        match self {
            Motion::Float | Motion::Fade => element.duration,
            Motion::Sway => element.sway_duration,
            Motion::Rotate => element.duration * 1.5,
            Motion::Breathe => element.duration * 0.5,
        }
    }

    /// Phase offset before the first cycle starts, in seconds.
    pub fn delay(self, element: &FloatingElement) -> f32 {
        match self {
            Motion::Float | Motion::Sway | Motion::Fade => element.delay,
            Motion::Rotate | Motion::Breathe => 0.0,
        }
    }

    fn easing(self) -> Easing {
        match self {
            Motion::Rotate => Easing::Linear,
            _ => Easing::EaseInOut,
        }
    }

    /// Progress through the current cycle, or `None` while still delayed.
    pub fn progress(self, element: &FloatingElement, t: f32) -> Option<f32> {
        let local = t - self.delay(element);
        if local < 0.0 {
            return None;
        }
        let period = self.period(element);
        if period <= 0.0 {
            return Some(0.0);
        }
        Some(local.rem_euclid(period) / period)
    }

    /// Value of this motion at elapsed time `t`.
    pub fn sample(self, element: &FloatingElement, t: f32) -> f32 {
        let progress = self.progress(element, t);
        match self {
            Motion::Float => progress.map_or(0.0, |p| {
                sample_keyframes(&[0.0, -FLOAT_HEIGHT, 0.0], p, self.easing())
            }),
            Motion::Sway => progress.map_or(0.0, |p| {
                let d = element.sway_distance;
                sample_keyframes(&[0.0, d, 0.0, -d, 0.0], p, self.easing())
            }),
            Motion::Fade => {
                progress.map_or(0.0, |p| sample_keyframes(&FADE_KEYFRAMES, p, self.easing()))
            }
            Motion::Rotate => {
                let from = element.base_rotation;
                let to = from + 360.0 * element.rotation_direction.sign();
                sample_keyframes(&[from, to], progress.unwrap_or(0.0), self.easing())
            }
            Motion::Breathe => {
                let looped = sample_keyframes(
                    &BREATHE_KEYFRAMES,
                    progress.unwrap_or(0.0),
                    self.easing(),
                );
                looped * grow_in(t)
            }
        }
    }
}

/// Entry ramp from 0 to 1 applied to the scale while an element appears.
fn grow_in(t: f32) -> f32 {
    if t >= GROW_IN_SECS {
        1.0
    } else {
        Easing::EaseInOut.apply(t.max(0.0) / GROW_IN_SECS)
    }
}

/// An element's own transform, independent of parallax.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Sway (x) and float (y) offset in pixels.
    pub offset: Vec2,
    /// Rotation in degrees.
    pub rotation: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Sample every motion of `element` at elapsed time `t` (seconds).
pub fn local_transform(element: &FloatingElement, t: f32) -> LocalTransform {
    LocalTransform {
        offset: Vec2::new(Motion::Sway.sample(element, t), Motion::Float.sample(element, t)),
        rotation: Motion::Rotate.sample(element, t),
        scale: Motion::Breathe.sample(element, t),
        opacity: Motion::Fade.sample(element, t),
    }
}

#[cfg(test)]
mod tests {
    use glimmer_core::{GlyphColor, Layer, RotationDirection};

    use super::*;

    const EPS: f32 = 1e-3;

    fn element() -> FloatingElement {
        FloatingElement {
            id: 0,
            position: Vec2::new(50.0, 50.0),
            size: 12.0,
            duration: 20.0,
            delay: 4.0,
            shape: '✦',
            color: GlyphColor::Sky,
            base_rotation: 30.0,
            layer: Layer::Middle,
            rotation_direction: RotationDirection::CounterClockwise,
            sway_distance: 25.0,
            sway_duration: 12.0,
        }
    }

    #[test]
    fn test_entry_state() {
        let e = element();
        let local = local_transform(&e, 0.0);
        assert_eq!(local.rotation, e.base_rotation);
        assert_eq!(local.scale, 0.0);
        assert_eq!(local.opacity, 0.0);
        assert_eq!(local.offset, Vec2::ZERO);
    }

    #[test]
    fn test_periods() {
        let e = element();
        assert_eq!(Motion::Float.period(&e), 20.0);
        assert_eq!(Motion::Fade.period(&e), 20.0);
        assert_eq!(Motion::Sway.period(&e), 12.0);
        assert_eq!(Motion::Rotate.period(&e), 1.5 * e.duration);
        assert_eq!(Motion::Breathe.period(&e), 0.5 * e.duration);
    }

    #[test]
    fn test_delayed_motions_hold_until_delay() {
        let e = element();
        for t in [0.5, 2.0, 3.9] {
            assert_eq!(Motion::Float.sample(&e, t), 0.0);
            assert_eq!(Motion::Sway.sample(&e, t), 0.0);
            assert_eq!(Motion::Fade.sample(&e, t), 0.0);
        }
        assert!(Motion::Rotate.sample(&e, 2.0) != e.base_rotation);
    }

    #[test]
    fn test_float_peaks_mid_cycle() {
        let e = element();
        let mid = e.delay + e.duration / 2.0;
        assert!((Motion::Float.sample(&e, mid) + FLOAT_HEIGHT).abs() < EPS);
        assert!((Motion::Fade.sample(&e, mid) - PEAK_OPACITY).abs() < EPS);
    }

    #[test]
    fn test_sway_quarters() {
        let e = element();
        let quarter = e.sway_duration / 4.0;
        assert!((Motion::Sway.sample(&e, e.delay + quarter) - 25.0).abs() < EPS);
        assert!((Motion::Sway.sample(&e, e.delay + 3.0 * quarter) + 25.0).abs() < EPS);
    }

    #[test]
    fn test_rotation_linear_and_directional() {
        let e = element();
        let period = Motion::Rotate.period(&e);
        let quarter = Motion::Rotate.sample(&e, period / 4.0);
        assert!((quarter - (30.0 - 90.0)).abs() < EPS);
        let mut last = Motion::Rotate.sample(&e, 0.0);
        for step in 1..100 {
            let value = Motion::Rotate.sample(&e, period * step as f32 / 100.0);
            assert!(value < last, "counter-clockwise rotation must decrease");
            last = value;
        }
    }

    #[test]
    fn test_cycles_repeat() {
        let e = element();
        for motion in Motion::ALL {
            let period = motion.period(&e);
            let t = e.delay + 1.3;
            let a = motion.sample(&e, t);
            let b = motion.sample(&e, t + period);
            assert!((a - b).abs() < EPS, "{motion:?} does not repeat after {period}s");
        }
    }

    #[test]
    fn test_scale_grows_in_then_loops() {
        let e = element();
        let early = Motion::Breathe.sample(&e, GROW_IN_SECS / 4.0);
        assert!(early > 0.0 && early < 0.8);
        let settled = Motion::Breathe.sample(&e, e.duration * 0.5);
        assert!((settled - 0.8).abs() < EPS);
        let peak = Motion::Breathe.sample(&e, e.duration * 0.25);
        assert!((peak - 1.2).abs() < EPS);
    }
}
