//! Camera Module
//!
//! Camera state and the trailing follow behaviour.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod follow;
pub mod state;

pub use follow::{CameraFollow, FOLLOW_DISTANCE, follow_position, ground_anchor};
pub use state::CameraState;
