//! Input Tracker
//!
//! Holds the movement [`DirectionFlags`] for the session. Flags are toggled
//! on key transition edges only; the frame driver reads a copy once per
//! frame, so a key toggled between frames takes effect on the next one.

use std::cell::Cell;
use std::rc::Rc;

use super::{DirectionFlags, KeyCode, KeyEvent, KeyEventHub, Subscription};

/// Keyboard-driven direction state.
#[derive(Debug, Default)]
pub struct InputTracker {
    flags: Rc<Cell<DirectionFlags>>,
    subscription: Option<Subscription>,
}

impl InputTracker {
    /// Create a tracker that is not attached to any event source.
    /// Feed it with [`on_key_down`](Self::on_key_down) / [`on_key_up`](Self::on_key_up).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker listening on `hub`. The listener is removed when the
    /// tracker is dropped or [`detach`](Self::detach)ed.
    pub fn attach(hub: &KeyEventHub) -> Self {
        let flags = Rc::new(Cell::new(DirectionFlags::default()));
        let shared = Rc::clone(&flags);
        let subscription = hub.subscribe(move |event: KeyEvent| {
            apply_key(&shared, event.key, event.pressed);
        });

        Self {
            flags,
            subscription: Some(subscription),
        }
    }

    pub fn on_key_down(&self, key: KeyCode) {
        apply_key(&self.flags, key, true);
    }

    pub fn on_key_up(&self, key: KeyCode) {
        apply_key(&self.flags, key, false);
    }

    /// Current direction state.
    pub fn flags(&self) -> DirectionFlags {
        self.flags.get()
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop listening. The last known flags are kept.
    pub fn detach(&mut self) {
        self.subscription = None;
    }

    /// Release all directions, e.g. when the window loses focus.
    pub fn release_all(&self) {
        self.flags.set(DirectionFlags::default());
    }
}

fn apply_key(flags: &Cell<DirectionFlags>, key: KeyCode, pressed: bool) {
    let mut current = flags.get();
    if current.handle_key(key, pressed) {
        flags.set(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    #[test]
    fn test_attached_tracker_follows_hub() {
        let hub = KeyEventHub::new();
        let tracker = InputTracker::attach(&hub);

        hub.key_down(KeyCode::ArrowUp);
        hub.key_down(KeyCode::D);
        assert_eq!(
            tracker.flags(),
            DirectionFlags::from_held(&[Direction::Forward, Direction::Right])
        );

        hub.key_up(KeyCode::ArrowUp);
        assert_eq!(tracker.flags(), DirectionFlags::from_held(&[Direction::Right]));
    }

    #[test]
    fn test_drop_removes_listener() {
        let hub = KeyEventHub::new();
        {
            let _tracker = InputTracker::attach(&hub);
            assert_eq!(hub.listener_count(), 1);
        }
        assert_eq!(hub.listener_count(), 0);
    }

    #[test]
    fn test_detach_keeps_last_state() {
        let hub = KeyEventHub::new();
        let mut tracker = InputTracker::attach(&hub);
        hub.key_down(KeyCode::S);

        tracker.detach();
        assert!(!tracker.is_attached());
        assert_eq!(hub.listener_count(), 0);

        hub.key_up(KeyCode::S);
        assert!(tracker.flags().back);
    }

    #[test]
    fn test_direct_feed_and_release_all() {
        let tracker = InputTracker::new();
        tracker.on_key_down(KeyCode::A);
        tracker.on_key_down(KeyCode::Escape);
        assert_eq!(tracker.flags(), DirectionFlags::from_held(&[Direction::Left]));

        tracker.release_all();
        assert!(!tracker.flags().any());
    }
}
