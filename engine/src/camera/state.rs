//! Camera State
//!
//! Position plus yaw/pitch orientation, with direction vectors derived
//! from the orientation.

use glam::{Mat4, Vec3};

/// Pitch limit: ±89 degrees in radians
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Camera placement in the scene.
///
/// The follow logic only ever writes [`position`](Self::position);
/// orientation is owned by whoever configured the camera.
///
/// # Coordinate System
/// - +X = right
/// - +Y = up
/// - -Z = forward when yaw = 0 and pitch = 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Camera position in world space
    pub position: Vec3,
    /// Horizontal angle (radians), positive turns right
    pub yaw: f32,
    /// Vertical angle (radians), positive looks up
    pub pitch: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl CameraState {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
        }
    }

    /// Camera at `position` oriented towards `target`.
    ///
    /// Falls back to the default orientation when the two points coincide.
    pub fn look_at(position: Vec3, target: Vec3) -> Self {
        let Some(direction) = (target - position).try_normalize() else {
            return Self::new(position, 0.0, 0.0);
        };
        let yaw = direction.x.atan2(-direction.z);
        let pitch = direction.y.clamp(-1.0, 1.0).asin();
        Self::new(position, yaw, pitch)
    }

    #[inline]
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Normalized look direction in world space.
    #[inline]
    pub fn world_direction(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Right vector, in the horizontal plane.
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.world_direction().cross(Vec3::Y).normalize()
    }

    /// View matrix (right-handed, looking along `world_direction`).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.world_direction(), Vec3::Y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = CameraState::default();
        let direction = camera.world_direction();
        assert!((direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_direction_is_normalized() {
        let camera = CameraState::new(Vec3::ONE, 0.7, -0.4);
        assert!((camera.world_direction().length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let camera = CameraState::new(Vec3::ZERO, 0.0, 3.0);
        assert!(camera.pitch <= PITCH_LIMIT);
    }

    #[test]
    fn test_look_at_points_at_target() {
        let position = Vec3::new(1.0, 3.0, 9.0);
        let camera = CameraState::look_at(position, Vec3::ZERO);
        let expected = (Vec3::ZERO - position).normalize();
        assert!((camera.world_direction() - expected).length() < 1e-5);
        assert!((camera.yaw - (-1.0f32).atan2(9.0)).abs() < 1e-5);
    }

    #[test]
    fn test_look_at_same_point_is_level() {
        let camera = CameraState::look_at(Vec3::ONE, Vec3::ONE);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn test_right_is_perpendicular() {
        let camera = CameraState::new(Vec3::ZERO, 1.1, 0.2);
        assert!(camera.world_direction().dot(camera.right()).abs() < 1e-5);
    }
}
