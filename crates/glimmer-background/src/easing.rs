//! Easing curves and keyframe interpolation.

/// Timing curve applied to each keyframe segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
    /// CSS-style cubic bezier with control points `(x1, y1)` and `(x2, y2)`.
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Map linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

/// One coordinate of a bezier with endpoints 0 and 1.
fn bezier_coord(a: f32, b: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a + 3.0 * inv * s * s * b + s * s * s
}

fn bezier_slope(a: f32, b: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a + 6.0 * inv * s * (b - a) + 3.0 * s * s * (1.0 - b)
}

fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 || x >= 1.0 {
        return x;
    }

    // Newton-Raphson on the x curve, bisection if the slope flattens out
    let mut s = x;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - x;
        if err.abs() < 1e-6 {
            return bezier_coord(y1, y2, s);
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    s = x;
    for _ in 0..32 {
        let value = bezier_coord(x1, x2, s);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) * 0.5;
    }
    bezier_coord(y1, y2, s)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Sample evenly spaced keyframes at cycle progress `progress` in `[0, 1]`.
///
/// The easing applies within each segment, so every keyframe is reached
/// exactly at its slot.
pub fn sample_keyframes(values: &[f32], progress: f32, easing: Easing) -> f32 {
    match values {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = values.len() - 1;
            let scaled = progress.clamp(0.0, 1.0) * segments as f32;
            let index = (scaled.floor() as usize).min(segments - 1);
            let local = scaled - index as f32;
            lerp(values[index], values[index + 1], easing.apply(local))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseInOut, Easing::CubicBezier(0.4, 0.0, 0.6, 1.0)] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        assert!((Easing::EaseInOut.apply(0.5) - 0.5).abs() < EPS);
        let a = Easing::EaseInOut.apply(0.2);
        let b = Easing::EaseInOut.apply(0.8);
        assert!((a + b - 1.0).abs() < EPS);
        assert!(a < 0.2, "ease-in-out should start slow");
    }

    #[test]
    fn test_ease_in_out_monotonic() {
        let mut last = 0.0;
        for step in 1..=100 {
            let value = Easing::EaseInOut.apply(step as f32 / 100.0);
            assert!(value >= last);
            last = value;
        }
    }

    #[test]
    fn test_keyframes_hit_each_slot() {
        let values = [0.0, 10.0, 0.0, -10.0, 0.0];
        assert_eq!(sample_keyframes(&values, 0.0, Easing::EaseInOut), 0.0);
        assert!((sample_keyframes(&values, 0.25, Easing::EaseInOut) - 10.0).abs() < EPS);
        assert!((sample_keyframes(&values, 0.5, Easing::EaseInOut)).abs() < EPS);
        assert!((sample_keyframes(&values, 0.75, Easing::EaseInOut) + 10.0).abs() < EPS);
        assert_eq!(sample_keyframes(&values, 1.0, Easing::EaseInOut), 0.0);
    }

    #[test]
    fn test_keyframes_linear_midpoint() {
        assert_eq!(sample_keyframes(&[0.0, 360.0], 0.25, Easing::Linear), 90.0);
    }

    #[test]
    fn test_keyframes_degenerate() {
        assert_eq!(sample_keyframes(&[], 0.3, Easing::Linear), 0.0);
        assert_eq!(sample_keyframes(&[4.0], 0.3, Easing::Linear), 4.0);
    }
}
