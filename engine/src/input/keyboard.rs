//! Keyboard Input Module
//!
//! Generic key codes, the four logical movement directions and the fixed
//! keymap between them. Decoupled from winit; the conversion lives in the
//! `From` impl at the bottom of this file.

/// Generic key codes, independent of the windowing system.
///
/// Only the keys the scene reacts to are named. Everything else arrives as
/// [`KeyCode::Unknown`] and is ignored by the movement keymap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letter keys
    W,
    A,
    S,
    D,
    /// Recenter the character in front of the camera
    R,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Control keys
    Escape,

    /// Catch-all for unhandled keys
    Unknown,
}

/// Logical movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Back,
    Left,
    Right,
}

impl Direction {
    /// All directions in keymap order.
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Back,
        Direction::Left,
        Direction::Right,
    ];

    /// Physical keys bound to this direction: the arrow key, then the letter key.
    pub fn keys(self) -> [KeyCode; 2] {
        match self {
            Direction::Forward => [KeyCode::ArrowUp, KeyCode::W],
            Direction::Back => [KeyCode::ArrowDown, KeyCode::S],
            Direction::Left => [KeyCode::ArrowLeft, KeyCode::A],
            Direction::Right => [KeyCode::ArrowRight, KeyCode::D],
        }
    }

    /// Look up the direction a physical key drives, if any.
    pub fn from_key(key: KeyCode) -> Option<Direction> {
        match key {
            KeyCode::ArrowUp | KeyCode::W => Some(Direction::Forward),
            KeyCode::ArrowDown | KeyCode::S => Some(Direction::Back),
            KeyCode::ArrowLeft | KeyCode::A => Some(Direction::Left),
            KeyCode::ArrowRight | KeyCode::D => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Held state of the four movement directions.
///
/// The flags are independent: opposite directions may both be held at once.
/// Resolving that case is the movement resolver's job, not this struct's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionFlags {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionFlags {
    /// All directions released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build flags from a list of held directions.
    pub fn from_held(held: &[Direction]) -> Self {
        let mut flags = Self::default();
        for &direction in held {
            flags.set(direction, true);
        }
        flags
    }

    pub fn get(&self, direction: Direction) -> bool {
        match direction {
            Direction::Forward => self.forward,
            Direction::Back => self.back,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Forward => self.forward = held,
            Direction::Back => self.back = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
    }

    /// Update the flag driven by `key`.
    ///
    /// Returns `true` if the key belongs to the movement keymap,
    /// `false` otherwise (the flags are left untouched).
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        match Direction::from_key(key) {
            Some(direction) => {
                self.set(direction, pressed);
                true
            }
            None => false,
        }
    }

    /// Check if any direction is held.
    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right
    }

    /// Release every direction.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl From<winit::keyboard::KeyCode> for KeyCode {
    fn from(key: winit::keyboard::KeyCode) -> Self {
        use winit::keyboard::KeyCode as Winit;
        match key {
            Winit::KeyW => KeyCode::W,
            Winit::KeyA => KeyCode::A,
            Winit::KeyS => KeyCode::S,
            Winit::KeyD => KeyCode::D,
            Winit::KeyR => KeyCode::R,
            Winit::ArrowUp => KeyCode::ArrowUp,
            Winit::ArrowDown => KeyCode::ArrowDown,
            Winit::ArrowLeft => KeyCode::ArrowLeft,
            Winit::ArrowRight => KeyCode::ArrowRight,
            Winit::Escape => KeyCode::Escape,
            _ => KeyCode::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_arrows_and_letters() {
        for direction in Direction::ALL {
            for key in direction.keys() {
                assert_eq!(Direction::from_key(key), Some(direction));
            }
        }
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        let mut flags = DirectionFlags::new();
        assert!(!flags.handle_key(KeyCode::Escape, true));
        assert!(!flags.handle_key(KeyCode::R, true));
        assert!(!flags.handle_key(KeyCode::Unknown, true));
        assert!(!flags.any());
    }

    #[test]
    fn test_key_repeat_is_idempotent() {
        let mut flags = DirectionFlags::new();
        flags.handle_key(KeyCode::W, true);
        flags.handle_key(KeyCode::W, true);
        flags.handle_key(KeyCode::ArrowUp, true);
        assert_eq!(flags, DirectionFlags::from_held(&[Direction::Forward]));

        flags.handle_key(KeyCode::W, false);
        assert!(!flags.any());
    }

    #[test]
    fn test_opposite_directions_coexist() {
        let mut flags = DirectionFlags::new();
        flags.handle_key(KeyCode::ArrowLeft, true);
        flags.handle_key(KeyCode::D, true);
        assert!(flags.left && flags.right);
    }

    #[test]
    fn test_winit_conversion() {
        use winit::keyboard::KeyCode as Winit;
        assert_eq!(KeyCode::from(Winit::KeyW), KeyCode::W);
        assert_eq!(KeyCode::from(Winit::ArrowRight), KeyCode::ArrowRight);
        assert_eq!(KeyCode::from(Winit::F5), KeyCode::Unknown);
    }
}
