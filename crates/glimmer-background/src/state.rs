//! Background component state management.

use std::cell::RefCell;
use std::rc::Rc;

use glimmer_core::{AnimationSpeed, FloatingElement};
use rand::Rng;
use ratatui::Frame;
use tracing::{debug, info};

use crate::compositor::{ComposedFrame, compose_with_ambient_pointer};
use crate::events::{EventHub, EventKind, HostEvent, Subscription};
use crate::generator::{ElementGenerator, GenerateError};
use crate::input::InputState;
use crate::render::{CellMetrics, render_into};
use crate::spring::PointerFollower;

/// Tunables of a mounted background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundSettings {
    /// Number of floating elements to generate.
    pub element_count: i64,
    pub speed: AnimationSpeed,
    /// Ease pointer parallax instead of snapping to the pointer.
    pub pointer_smoothing: bool,
    pub show_ambient: bool,
    pub cell_metrics: CellMetrics,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            element_count: 100,
            speed: AnimationSpeed::Medium,
            pointer_smoothing: true,
            show_ambient: true,
            cell_metrics: CellMetrics::default(),
        }
    }
}

/// A mounted ambient background.
///
/// Elements are generated once at mount and shared read-only. Input arrives
/// only through the subscriptions taken in [`BackgroundState::activate`].
#[derive(Debug)]
pub struct BackgroundState {
    /// Generated elements, immutable after mount.
    elements: Rc<[FloatingElement]>,
    /// Latest pointer and scroll values, written by event listeners.
    input: Rc<RefCell<InputState>>,
    /// Live event subscriptions while active.
    subscriptions: Vec<Subscription>,
    /// Smoothed pointer positions.
    follower: PointerFollower,
    settings: BackgroundSettings,
    /// Animation clock in milliseconds, scaled by the speed setting.
    clock_ms: f64,
    /// Freezes the animation clock. Pointer smoothing keeps running.
    paused: bool,
    /// Last wall-clock update time in milliseconds.
    last_update_ms: Option<u64>,
}

impl BackgroundState {
    /// Mount a background, generating its elements exactly once.
    pub fn mount<R: Rng>(
        settings: BackgroundSettings,
        generator: &mut ElementGenerator<R>,
    ) -> Result<Self, GenerateError> {
        let elements = generator.generate(settings.element_count)?;
        info!(count = elements.len(), "background mounted");
        Ok(Self {
            elements: elements.into(),
            input: Rc::new(RefCell::new(InputState::default())),
            subscriptions: Vec::new(),
            follower: PointerFollower::new(),
            settings,
            clock_ms: 0.0,
            paused: false,
            last_update_ms: None,
        })
    }

    /// Start listening to pointer and scroll events. No-op when active.
    pub fn activate(&mut self, hub: &EventHub) {
        if self.is_active() {
            return;
        }
        let input = Rc::clone(&self.input);
        self.subscriptions
            .push(hub.subscribe(EventKind::Pointer, move |event| {
                if let HostEvent::PointerMoved { x, y, viewport } = *event {
                    input.borrow_mut().record_pointer(x, y, viewport);
                }
            }));
        let input = Rc::clone(&self.input);
        self.subscriptions
            .push(hub.subscribe(EventKind::Scroll, move |event| {
                if let HostEvent::Scrolled { offset } = *event {
                    input.borrow_mut().record_scroll(offset);
                }
            }));
        debug!("background activated");
    }

    /// Release every event subscription.
    pub fn deactivate(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        self.subscriptions.clear();
        debug!("background deactivated");
    }

    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn elements(&self) -> &[FloatingElement] {
        &self.elements
    }

    /// Snapshot of the current input.
    pub fn input(&self) -> InputState {
        *self.input.borrow()
    }

    pub fn settings(&self) -> BackgroundSettings {
        self.settings
    }

    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.settings.speed = speed;
    }

    pub fn set_show_ambient(&mut self, show: bool) {
        self.settings.show_ambient = show;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            debug!(paused, "animation clock toggled");
        }
        self.paused = paused;
    }

    /// Animation time in seconds.
    pub fn animation_secs(&self) -> f32 {
        (self.clock_ms / 1000.0) as f32
    }

    /// Advance the clocks to wall time `elapsed_ms` and compose a frame.
    ///
    /// The animation clock only moves while not paused; pointer smoothing
    /// always follows wall time.
    pub fn tick(&mut self, elapsed_ms: u64) -> ComposedFrame {
        let delta_ms = self
            .last_update_ms
            .map_or(0, |last| elapsed_ms.saturating_sub(last));
        self.last_update_ms = Some(elapsed_ms);

        if !self.paused {
            self.clock_ms += delta_ms as f64 * self.settings.speed.time_scale() as f64;
        }

        let input = self.input();
        let (glyph_pointer, ambient_pointer) = if self.settings.pointer_smoothing {
            self.follower.follow(input.pointer, delta_ms as f32 / 1000.0);
            (self.follower.glyph_pointer(), self.follower.ambient_pointer())
        } else {
            (input.pointer, input.pointer)
        };

        let sampled = InputState {
            pointer: glyph_pointer,
            ..input
        };
        compose_with_ambient_pointer(
            &self.elements,
            &sampled,
            ambient_pointer,
            self.animation_secs(),
        )
    }

    /// Render the background to the frame.
    pub fn render(&mut self, frame: &mut Frame, elapsed_ms: u64) {
        let area = frame.area();
        let composed = self.tick(elapsed_ms);
        render_into(
            &composed,
            area,
            frame.buffer_mut(),
            self.settings.cell_metrics,
            self.settings.show_ambient,
        );
    }
}

impl Drop for BackgroundState {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use glimmer_core::Vec2;

    use super::*;
    use crate::input::Viewport;

    fn mounted(settings: BackgroundSettings) -> BackgroundState {
        BackgroundState::mount(settings, &mut ElementGenerator::from_seed(11)).unwrap()
    }

    fn pointer_event(x: f32, y: f32) -> HostEvent {
        HostEvent::PointerMoved {
            x,
            y,
            viewport: Viewport::new(100.0, 100.0),
        }
    }

    #[test]
    fn test_mount_generates_once() {
        let state = mounted(BackgroundSettings::default());
        assert_eq!(state.elements().len(), 100);
        assert_eq!(state.input(), InputState::default());
        assert!(!state.is_active());
    }

    #[test]
    fn test_mount_rejects_negative_count() {
        let settings = BackgroundSettings {
            element_count: -3,
            ..BackgroundSettings::default()
        };
        let err = BackgroundState::mount(settings, &mut ElementGenerator::from_seed(1)).unwrap_err();
        assert_eq!(err, GenerateError::NegativeCount(-3));
    }

    #[test]
    fn test_events_update_input_while_active() {
        let hub = EventHub::new();
        let mut state = mounted(BackgroundSettings::default());
        state.activate(&hub);
        hub.dispatch(&pointer_event(75.0, 25.0));
        hub.dispatch(&HostEvent::Scrolled { offset: 300.0 });
        assert_eq!(state.input().pointer, Vec2::new(0.25, -0.25));
        assert_eq!(state.input().scroll, 300.0);
    }

    #[test]
    fn test_deactivate_stops_input() {
        let hub = EventHub::new();
        let mut state = mounted(BackgroundSettings::default());
        state.activate(&hub);
        hub.dispatch(&pointer_event(75.0, 25.0));
        state.deactivate();
        assert_eq!(hub.listener_count(), 0);

        let before = state.input();
        hub.dispatch(&pointer_event(0.0, 100.0));
        hub.dispatch(&HostEvent::Scrolled { offset: 900.0 });
        assert_eq!(state.input(), before);
    }

    #[test]
    fn test_activate_is_idempotent() {
        let hub = EventHub::new();
        let mut state = mounted(BackgroundSettings::default());
        state.activate(&hub);
        state.activate(&hub);
        assert_eq!(hub.listener_count(), 2);
    }

    #[test]
    fn test_drop_releases_listeners() {
        let hub = EventHub::new();
        let mut state = mounted(BackgroundSettings::default());
        state.activate(&hub);
        drop(state);
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_remount_resets_input() {
        let hub = EventHub::new();
        let mut state = mounted(BackgroundSettings::default());
        state.activate(&hub);
        hub.dispatch(&HostEvent::Scrolled { offset: 500.0 });
        drop(state);

        let mut state = mounted(BackgroundSettings::default());
        state.activate(&hub);
        assert_eq!(state.input(), InputState::default());
    }

    #[test]
    fn test_tick_scales_clock_by_speed() {
        let mut state = mounted(BackgroundSettings {
            speed: AnimationSpeed::Fast,
            ..BackgroundSettings::default()
        });
        state.tick(1000);
        assert_eq!(state.animation_secs(), 0.0);
        state.tick(2000);
        assert_eq!(state.animation_secs(), 2.0);
        state.set_speed(AnimationSpeed::Slow);
        state.tick(4000);
        assert_eq!(state.animation_secs(), 3.0);
    }

    #[test]
    fn test_tick_without_smoothing_uses_raw_pointer() {
        let hub = EventHub::new();
        let mut state = mounted(BackgroundSettings {
            element_count: 2,
            pointer_smoothing: false,
            ..BackgroundSettings::default()
        });
        state.activate(&hub);
        hub.dispatch(&pointer_event(100.0, 50.0));
        let frame = state.tick(0);
        assert_eq!(frame.ambient_translation, Vec2::new(-15.0, 0.0));
    }

    #[test]
    fn test_tick_with_smoothing_lags_pointer() {
        let hub = EventHub::new();
        let mut state = mounted(BackgroundSettings {
            element_count: 0,
            ..BackgroundSettings::default()
        });
        state.activate(&hub);
        hub.dispatch(&pointer_event(100.0, 50.0));
        state.tick(0);
        let frame = state.tick(16);
        assert!(frame.ambient_translation.x > -15.0 && frame.ambient_translation.x < 0.0);
    }

    #[test]
    fn test_pause_freezes_animation_but_not_smoothing() {
        let hub = EventHub::new();
        let mut state = mounted(BackgroundSettings {
            element_count: 0,
            ..BackgroundSettings::default()
        });
        state.activate(&hub);
        state.tick(0);
        state.tick(500);
        assert_eq!(state.animation_secs(), 0.5);

        state.set_paused(true);
        hub.dispatch(&pointer_event(100.0, 50.0));
        let first = state.tick(516);
        let later = state.tick(5000);
        assert_eq!(state.animation_secs(), 0.5);
        assert!(first.ambient_translation.x > -15.0);
        assert!((later.ambient_translation.x + 15.0).abs() < 1e-4);

        state.set_paused(false);
        state.tick(6000);
        assert_eq!(state.animation_secs(), 1.5);
    }

    #[test]
    fn test_render_draws_into_terminal() {
        use ratatui::{Terminal, backend::TestBackend};

        let mut state = mounted(BackgroundSettings::default());
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal.draw(|frame| state.render(frame, 0)).unwrap();
        terminal.draw(|frame| state.render(frame, 2000)).unwrap();
        let drawn = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .filter(|cell| cell.symbol() != " ")
            .count();
        assert!(drawn > 0);
    }
}
