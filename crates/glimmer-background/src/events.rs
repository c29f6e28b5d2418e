//! Host event dispatch with scoped subscriptions.
//!
//! The host pushes pointer and scroll events into an [`EventHub`]. Listeners
//! stay registered exactly as long as the [`Subscription`] returned for them
//! is alive.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::input::Viewport;

/// Event raised by the hosting environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// Pointer moved to `(x, y)` inside `viewport`.
    PointerMoved { x: f32, y: f32, viewport: Viewport },
    /// Page scrolled to `offset` pixels.
    Scrolled { offset: f32 },
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            HostEvent::PointerMoved { .. } => EventKind::Pointer,
            HostEvent::Scrolled { .. } => EventKind::Scroll,
        }
    }
}

/// Event category a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Pointer,
    Scroll,
}

type Listener = Box<dyn FnMut(&HostEvent)>;

struct Entry {
    id: u64,
    kind: EventKind,
    /// Cleared by the owning [`Subscription`] when it drops.
    alive: Rc<Cell<bool>>,
    listener: Listener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Entry>,
}

impl Registry {
    fn sweep(&mut self) {
        self.listeners.retain(|entry| entry.alive.get());
    }
}

/// Fan-out point for host events.
#[derive(Default, Clone)]
pub struct EventHub {
    registry: Rc<RefCell<Registry>>,
}

impl fmt::Debug for EventHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one kind of event.
    pub fn subscribe(
        &self,
        kind: EventKind,
        listener: impl FnMut(&HostEvent) + 'static,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let alive = Rc::new(Cell::new(true));
        registry.listeners.push(Entry {
            id,
            kind,
            alive: Rc::clone(&alive),
            listener: Box::new(listener),
        });
        trace!(id, ?kind, "listener subscribed");
        Subscription {
            id,
            alive,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver an event to every live listener of its kind.
    ///
    /// A listener may drop subscriptions (its own included) from inside the
    /// callback; released listeners are skipped and removed once delivery
    /// ends. Listeners must not subscribe or dispatch from inside the callback.
    pub fn dispatch(&self, event: &HostEvent) {
        let kind = event.kind();
        let mut registry = self.registry.borrow_mut();
        for entry in registry.listeners.iter_mut() {
            if entry.kind == kind && entry.alive.get() {
                (entry.listener)(event);
            }
        }
        registry.sweep();
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.registry
            .borrow()
            .listeners
            .iter()
            .filter(|entry| entry.alive.get())
            .count()
    }
}

/// Keeps a listener registered; dropping it removes the listener.
#[must_use = "dropping a subscription unregisters its listener"]
pub struct Subscription {
    id: u64,
    alive: Rc<Cell<bool>>,
    registry: Weak<RefCell<Registry>>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.alive.set(false);
        trace!(id = self.id, "listener released");
        // During a dispatch the registry is borrowed and sweeps itself after
        if let Some(registry) = self.registry.upgrade()
            && let Ok(mut registry) = registry.try_borrow_mut()
        {
            registry.sweep();
        }
    }
}
