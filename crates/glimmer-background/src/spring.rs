//! Pointer smoothing.
//!
//! Glyphs chase the pointer through a damped spring, the ambient gradient
//! through a short linear tween.

use glimmer_core::Vec2;

/// Stiffness of the glyph pointer spring.
pub const POINTER_STIFFNESS: f32 = 40.0;

/// Damping of the glyph pointer spring.
pub const POINTER_DAMPING: f32 = 25.0;

/// Time (s) the ambient layer takes to reach a new pointer position.
pub const AMBIENT_TWEEN_SECS: f32 = 0.8;

/// Largest step integrated at once, so a stalled frame cannot blow up.
const MAX_STEP_SECS: f32 = 1.0 / 30.0;

/// Position and velocity of a spring at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Phase {
    position: Vec2,
    velocity: Vec2,
}

impl Phase {
    /// Euler step along `slope` for `dt` seconds.
    fn advanced(self, slope: Phase, dt: f32) -> Phase {
        Phase {
            position: self.position + slope.position * dt,
            velocity: self.velocity + slope.velocity * dt,
        }
    }
}

/// A damped spring in the plane, integrated with RK4.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    stiffness: f32,
    damping: f32,
    phase: Phase,
    target: Vec2,
}

impl Spring {
    pub fn new(stiffness: f32, damping: f32, initial: Vec2) -> Self {
        Self {
            stiffness,
            damping,
            phase: Phase {
                position: initial,
                velocity: Vec2::ZERO,
            },
            target: initial,
        }
    }

    pub fn value(&self) -> Vec2 {
        self.phase.position
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Whether the spring has come to rest on its target.
    pub fn is_settled(&self) -> bool {
        const EPSILON: f32 = 1e-4;
        const VELOCITY_EPSILON: f32 = 1e-3;
        self.phase.position.distance(self.target) < EPSILON
            && self.phase.velocity.length() < VELOCITY_EPSILON
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        let mut remaining = dt.max(0.0);
        while remaining > 0.0 {
            if self.is_settled() {
                self.phase = Phase {
                    position: self.target,
                    velocity: Vec2::ZERO,
                };
                return;
            }
            let h = remaining.min(MAX_STEP_SECS);
            self.phase = self.integrate(self.phase, h);
            remaining -= h;
        }
    }

    /// Rate of change of `phase` under the spring force.
    fn slope(&self, phase: Phase) -> Phase {
        Phase {
            position: phase.velocity,
            velocity: -self.stiffness * (phase.position - self.target)
                - self.damping * phase.velocity,
        }
    }

    fn integrate(&self, start: Phase, h: f32) -> Phase {
        let k1 = self.slope(start);
        let k2 = self.slope(start.advanced(k1, h / 2.0));
        let k3 = self.slope(start.advanced(k2, h / 2.0));
        let k4 = self.slope(start.advanced(k3, h));
        let weighted = Phase {
            position: (k1.position + 2.0 * (k2.position + k3.position) + k4.position) / 6.0,
            velocity: (k1.velocity + 2.0 * (k2.velocity + k3.velocity) + k4.velocity) / 6.0,
        };
        start.advanced(weighted, h)
    }
}

/// Linear tween that restarts whenever its target changes.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    duration: f32,
    from: Vec2,
    to: Vec2,
    elapsed: f32,
}

impl Tween {
    pub fn new(duration: f32, initial: Vec2) -> Self {
        Self {
            duration,
            from: initial,
            to: initial,
            elapsed: duration,
        }
    }

    pub fn value(&self) -> Vec2 {
        if self.duration <= 0.0 || self.elapsed >= self.duration {
            return self.to;
        }
        self.from.lerp(self.to, self.elapsed / self.duration)
    }

    pub fn set_target(&mut self, target: Vec2) {
        if target != self.to {
            self.from = self.value();
            self.to = target;
            self.elapsed = 0.0;
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration.max(0.0));
    }
}

/// Smoothed copies of the pointer for the glyph and ambient layers.
#[derive(Debug, Clone, Copy)]
pub struct PointerFollower {
    glyph: Spring,
    ambient: Tween,
}

impl Default for PointerFollower {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerFollower {
    pub fn new() -> Self {
        Self {
            glyph: Spring::new(POINTER_STIFFNESS, POINTER_DAMPING, Vec2::ZERO),
            ambient: Tween::new(AMBIENT_TWEEN_SECS, Vec2::ZERO),
        }
    }

    /// Chase `target` for `dt` seconds.
    pub fn follow(&mut self, target: Vec2, dt: f32) {
        self.glyph.set_target(target);
        self.glyph.step(dt);
        self.ambient.set_target(target);
        self.ambient.step(dt);
    }

    /// Pointer position seen by the glyph layers.
    pub fn glyph_pointer(&self) -> Vec2 {
        self.glyph.value()
    }

    /// Pointer position seen by the ambient gradient.
    pub fn ambient_pointer(&self) -> Vec2 {
        self.ambient.value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_converges() {
        let target = Vec2::new(0.5, -0.25);
        let mut spring = Spring::new(POINTER_STIFFNESS, POINTER_DAMPING, Vec2::ZERO);
        spring.set_target(target);
        for _ in 0..600 {
            spring.step(1.0 / 60.0);
        }
        assert!(spring.value().distance(target) < 1e-3);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_spring_lags_target() {
        let mut spring = Spring::new(POINTER_STIFFNESS, POINTER_DAMPING, Vec2::ZERO);
        spring.set_target(Vec2::new(1.0, 0.0));
        spring.step(1.0 / 60.0);
        let value = spring.value();
        assert!(value.x > 0.0 && value.x < 0.5);
        assert_eq!(value.y, 0.0);
    }

    #[test]
    fn test_spring_large_step_is_stable() {
        let target = Vec2::new(0.5, 0.5);
        let mut spring = Spring::new(POINTER_STIFFNESS, POINTER_DAMPING, Vec2::ZERO);
        spring.set_target(target);
        spring.step(30.0);
        assert!(spring.value().distance(target) < 1e-3);
    }

    #[test]
    fn test_tween_linear() {
        let mut tween = Tween::new(0.8, Vec2::ZERO);
        tween.set_target(Vec2::new(0.4, 0.0));
        tween.step(0.4);
        assert!((tween.value().x - 0.2).abs() < 1e-5);
        tween.step(1.0);
        assert_eq!(tween.value(), Vec2::new(0.4, 0.0));
    }

    #[test]
    fn test_follower_starts_centered() {
        let follower = PointerFollower::new();
        assert_eq!(follower.glyph_pointer(), Vec2::ZERO);
        assert_eq!(follower.ambient_pointer(), Vec2::ZERO);
    }
}
