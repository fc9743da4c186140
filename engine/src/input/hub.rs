//! Key Event Hub
//!
//! Fan-out of key press/release events to registered listeners. Registration
//! hands back a [`Subscription`] guard; dropping the guard removes the
//! listener, so a listener never outlives the component that installed it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::KeyCode;

/// A single key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: KeyCode,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(key: KeyCode) -> Self {
        Self { key, pressed: true }
    }

    pub fn up(key: KeyCode) -> Self {
        Self { key, pressed: false }
    }
}

type Listener = Rc<RefCell<dyn FnMut(KeyEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Single-threaded key event dispatcher.
///
/// Cloning the hub yields another handle to the same listener registry.
#[derive(Clone, Default)]
pub struct KeyEventHub {
    registry: Rc<RefCell<Registry>>,
}

impl KeyEventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays installed until the returned guard drops.
    #[must_use = "dropping the subscription immediately removes the listener"]
    pub fn subscribe(&self, listener: impl FnMut(KeyEvent) + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        registry.listeners.push((id, listener));

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Deliver an event to every listener, in registration order.
    ///
    /// A listener that dispatches on the same hub does not receive its own
    /// nested event; it is skipped while it is still running.
    pub fn dispatch(&self, event: KeyEvent) {
        // Snapshot so listeners may subscribe or unsubscribe while we iterate
        let listeners: Vec<Listener> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            let Ok(mut callback) = listener.try_borrow_mut() else {
                continue;
            };
            (&mut *callback)(event);
        }
    }

    pub fn key_down(&self, key: KeyCode) {
        self.dispatch(KeyEvent::down(key));
    }

    pub fn key_up(&self, key: KeyCode) {
        self.dispatch(KeyEvent::up(key));
    }

    /// Number of installed listeners.
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Scoped listener registration. Dropping it deregisters the listener.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .listeners
                .retain(|(id, _)| *id != self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_dispatch_reaches_listener() {
        let hub = KeyEventHub::new();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let _sub = hub.subscribe(move |_| counter.set(counter.get() + 1));

        hub.key_down(KeyCode::W);
        hub.key_up(KeyCode::W);
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_drop_deregisters() {
        let hub = KeyEventHub::new();
        let seen = Rc::new(Cell::new(0));
        let counter = Rc::clone(&seen);
        let sub = hub.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(hub.listener_count(), 1);

        drop(sub);
        assert_eq!(hub.listener_count(), 0);

        hub.key_down(KeyCode::W);
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn test_nested_dispatch_skips_running_listener() {
        let hub = KeyEventHub::new();
        let outer_seen = Rc::new(RefCell::new(Vec::new()));
        let other_seen = Rc::new(RefCell::new(Vec::new()));

        let relay = hub.clone();
        let outer_log = Rc::clone(&outer_seen);
        let _outer = hub.subscribe(move |event| {
            outer_log.borrow_mut().push(event.key);
            if event.key == KeyCode::W {
                relay.key_down(KeyCode::ArrowUp);
            }
        });
        let other_log = Rc::clone(&other_seen);
        let _other = hub.subscribe(move |event| other_log.borrow_mut().push(event.key));

        hub.key_down(KeyCode::W);

        assert_eq!(*outer_seen.borrow(), vec![KeyCode::W]);
        assert_eq!(*other_seen.borrow(), vec![KeyCode::ArrowUp, KeyCode::W]);
    }

    #[test]
    fn test_subscription_outliving_hub_is_harmless() {
        let hub = KeyEventHub::new();
        let sub = hub.subscribe(|_| {});
        drop(hub);
        drop(sub);
    }
}
