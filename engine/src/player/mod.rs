//! Player Module
//!
//! Character transform and keyboard-driven movement.
//!
//! # Components
//!
//! - [`CharacterTransform`] - Position, facing yaw and scale of the character
//! - [`MovementResolver`] - Held directions to per-frame yaw and translation
//!   - Eight discrete facings resolved through a fixed priority table
//!   - Additive translation, opposing keys cancel

pub mod movement;
pub mod transform;

pub use movement::{
    MovementResolver, MovementStep,
    local_translation, resolve_yaw,
    MOVEMENT_SPEED,
};
pub use transform::CharacterTransform;
