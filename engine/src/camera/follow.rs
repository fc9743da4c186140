//! Camera Follow
//!
//! Keeps the camera a fixed distance behind the character along the
//! camera's own look direction. Orientation is never changed here, so the
//! camera only swings around the character if something else turns it.

use glam::Vec3;

use super::CameraState;

/// Default trailing distance in scene units.
pub const FOLLOW_DISTANCE: f32 = 4.5;

/// Camera position trailing `target` by `distance` along `direction`.
#[inline]
pub fn follow_position(direction: Vec3, target: Vec3, distance: f32) -> Vec3 {
    target - direction * distance
}

/// Point on the ground plane (y = 0) `distance` ahead of the camera.
///
/// Both the look direction and the camera position are projected onto the
/// ground without renormalizing, so camera height is ignored and the reach
/// shrinks by `cos(pitch)`. A camera looking straight down yields the point
/// directly below it.
pub fn ground_anchor(camera: &CameraState, distance: f32) -> Vec3 {
    let ahead = project_on_ground(camera.world_direction()) * distance;
    project_on_ground(camera.position) + ahead
}

fn project_on_ground(v: Vec3) -> Vec3 {
    // Ground normal is +Y
    v - Vec3::Y * v.dot(Vec3::Y)
}

/// Trailing camera with a fixed distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFollow {
    pub distance: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            distance: FOLLOW_DISTANCE,
        }
    }
}

impl CameraFollow {
    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    /// Move `camera` so it trails `target`. Returns the new position.
    pub fn update(&self, camera: &mut CameraState, target: Vec3) -> Vec3 {
        let position = follow_position(camera.world_direction(), target, self.distance);
        camera.set_position(position);
        position
    }
}
