//! Character Transform
//!
//! Position, facing yaw and uniform scale of the controlled character.

use glam::{Mat4, Quat, Vec3};

use super::movement::MovementStep;

/// World transform of the character.
///
/// Owned by the frame driver and mutated in place every frame; only
/// [`apply`](Self::apply) and [`set_position`](Self::set_position) write to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterTransform {
    /// World-space position (feet)
    pub position: Vec3,
    /// Rotation about +Y in radians
    pub yaw: f32,
    /// Uniform model scale
    pub scale: f32,
}

impl Default for CharacterTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

impl CharacterTransform {
    pub fn new(position: Vec3, yaw: f32, scale: f32) -> Self {
        Self {
            position,
            yaw,
            scale,
        }
    }

    /// Apply a resolved movement step.
    ///
    /// The translation is expressed in the character's neutral frame and is
    /// added before the facing changes. The yaw is only written when the step
    /// carries one, so the resting orientation persists between movements.
    pub fn apply(&mut self, step: &MovementStep) {
        self.position += step.translation;
        if let Some(yaw) = step.yaw {
            self.yaw = yaw;
        }
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Model matrix (scale, then yaw, then translation).
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.rotation(), self.position)
    }

    /// Direction the model faces in world space.
    ///
    /// Stand-in models are authored facing +Z, so yaw 0 faces the default
    /// camera and yaw π faces away from it.
    pub fn facing(&self) -> Vec3 {
        self.rotation() * Vec3::Z
    }
}
