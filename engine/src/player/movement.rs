//! Character Movement
//!
//! Turns held direction flags into a facing yaw and a translation.
//!
//! # Facing table
//!
//! The target yaw is resolved by walking the table below top to bottom;
//! a later matching row overrides an earlier one. Single directions come
//! first, diagonals last, so a diagonal always wins over its components.
//!
//! | held            | yaw    |
//! |-----------------|--------|
//! | forward         | π      |
//! | back            | 0      |
//! | left            | −π/2   |
//! | right           | π/2    |
//! | forward + left  | −3π/4  |
//! | forward + right | 3π/4   |
//! | back + left     | −π/4   |
//! | back + right    | π/4    |
//!
//! With all four keys held the last row matches and the yaw is π/4.
//!
//! # Translation
//!
//! Each held flag contributes `step` along its axis of the character's
//! neutral frame: forward −Z, back +Z, left −X, right +X. Contributions are
//! summed, so opposing keys cancel instead of one suppressing the other.
//! The neutral frame coincides with world axes; the facing is applied after
//! the translation.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::Vec3;

use crate::input::DirectionFlags;

use super::transform::CharacterTransform;

/// Default movement speed in scene units per second.
pub const MOVEMENT_SPEED: f32 = 1.0;

/// One row of the facing table.
struct FacingRule {
    forward: bool,
    back: bool,
    left: bool,
    right: bool,
    yaw: f32,
}

impl FacingRule {
    const fn new(forward: bool, back: bool, left: bool, right: bool, yaw: f32) -> Self {
        Self {
            forward,
            back,
            left,
            right,
            yaw,
        }
    }

    /// A rule matches when every direction it names is held.
    fn matches(&self, flags: &DirectionFlags) -> bool {
        (!self.forward || flags.forward)
            && (!self.back || flags.back)
            && (!self.left || flags.left)
            && (!self.right || flags.right)
    }
}

const FACING_TABLE: [FacingRule; 8] = [
    FacingRule::new(true, false, false, false, PI),
    FacingRule::new(false, true, false, false, 0.0),
    FacingRule::new(false, false, true, false, -FRAC_PI_2),
    FacingRule::new(false, false, false, true, FRAC_PI_2),
    FacingRule::new(true, false, true, false, -3.0 * FRAC_PI_4),
    FacingRule::new(true, false, false, true, 3.0 * FRAC_PI_4),
    FacingRule::new(false, true, true, false, -FRAC_PI_4),
    FacingRule::new(false, true, false, true, FRAC_PI_4),
];

/// Resolve the facing yaw for the held directions.
///
/// Returns `None` when nothing is held.
pub fn resolve_yaw(flags: &DirectionFlags) -> Option<f32> {
    FACING_TABLE
        .iter()
        .rev()
        .find(|rule| rule.matches(flags))
        .map(|rule| rule.yaw)
}

/// Translation for one frame in the character's neutral frame.
pub fn local_translation(flags: &DirectionFlags, step: f32) -> Vec3 {
    let mut translation = Vec3::ZERO;
    if flags.forward {
        translation.z -= step;
    }
    if flags.back {
        translation.z += step;
    }
    if flags.left {
        translation.x -= step;
    }
    if flags.right {
        translation.x += step;
    }
    translation
}

/// Result of resolving one frame of movement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementStep {
    /// New facing, or `None` to keep the current one
    pub yaw: Option<f32>,
    /// Offset to add to the character position
    pub translation: Vec3,
}

impl MovementStep {
    pub fn is_idle(&self) -> bool {
        self.yaw.is_none() && self.translation == Vec3::ZERO
    }
}

/// Resolves held directions into per-frame movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementResolver {
    /// Scene units per second
    pub movement_speed: f32,
}

impl Default for MovementResolver {
    fn default() -> Self {
        Self {
            movement_speed: MOVEMENT_SPEED,
        }
    }
}

impl MovementResolver {
    pub fn new(movement_speed: f32) -> Self {
        Self { movement_speed }
    }

    /// Distance covered in `delta_seconds`.
    #[inline]
    pub fn step_distance(&self, delta_seconds: f32) -> f32 {
        delta_seconds * self.movement_speed
    }

    /// Compute the movement for one frame without touching any state.
    pub fn resolve(&self, delta_seconds: f32, flags: &DirectionFlags) -> MovementStep {
        MovementStep {
            yaw: resolve_yaw(flags),
            translation: local_translation(flags, self.step_distance(delta_seconds)),
        }
    }

    /// Resolve and apply one frame of movement to `transform`.
    pub fn update(
        &self,
        delta_seconds: f32,
        flags: &DirectionFlags,
        transform: &mut CharacterTransform,
    ) -> MovementStep {
        let step = self.resolve(delta_seconds, flags);
        transform.apply(&step);
        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    const EPSILON: f32 = 1e-6;

    fn held(directions: &[Direction]) -> DirectionFlags {
        DirectionFlags::from_held(directions)
    }

    #[test]
    fn test_single_direction_yaw() {
        assert_eq!(resolve_yaw(&held(&[Direction::Forward])), Some(PI));
        assert_eq!(resolve_yaw(&held(&[Direction::Back])), Some(0.0));
        assert_eq!(resolve_yaw(&held(&[Direction::Left])), Some(-FRAC_PI_2));
        assert_eq!(resolve_yaw(&held(&[Direction::Right])), Some(FRAC_PI_2));
    }

    #[test]
    fn test_diagonal_overrides_single() {
        use Direction::*;
        assert_eq!(resolve_yaw(&held(&[Forward, Left])), Some(-3.0 * FRAC_PI_4));
        assert_eq!(resolve_yaw(&held(&[Forward, Right])), Some(3.0 * FRAC_PI_4));
        assert_eq!(resolve_yaw(&held(&[Back, Left])), Some(-FRAC_PI_4));
        assert_eq!(resolve_yaw(&held(&[Back, Right])), Some(FRAC_PI_4));
    }

    #[test]
    fn test_opposing_pairs_take_later_row() {
        use Direction::*;
        // back row comes after forward row
        assert_eq!(resolve_yaw(&held(&[Forward, Back])), Some(0.0));
        // right row comes after left row
        assert_eq!(resolve_yaw(&held(&[Left, Right])), Some(FRAC_PI_2));
        // back+left is the last diagonal matching these three
        assert_eq!(resolve_yaw(&held(&[Forward, Back, Left])), Some(-FRAC_PI_4));
        assert_eq!(resolve_yaw(&held(&[Forward, Left, Right])), Some(3.0 * FRAC_PI_4));
    }

    #[test]
    fn test_no_flags_no_yaw() {
        assert_eq!(resolve_yaw(&DirectionFlags::new()), None);
    }

    #[test]
    fn test_single_direction_step_length() {
        let resolver = MovementResolver::new(2.0);
        for direction in Direction::ALL {
            let step = resolver.resolve(0.25, &held(&[direction]));
            assert!((step.translation.length() - 0.5).abs() < EPSILON);
        }
    }

    #[test]
    fn test_opposing_flags_cancel() {
        use Direction::*;
        let resolver = MovementResolver::default();
        let step = resolver.resolve(1.0, &held(&[Forward, Back]));
        assert_eq!(step.translation.z, 0.0);

        let step = resolver.resolve(1.0, &held(&[Left, Right]));
        assert_eq!(step.translation.x, 0.0);
    }

    #[test]
    fn test_idle_step() {
        let resolver = MovementResolver::default();
        assert!(resolver.resolve(0.016, &DirectionFlags::new()).is_idle());
    }
}
