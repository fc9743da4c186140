//! Frame Driver
//!
//! The per-frame entry point. Each frame it reads the input flags, moves the
//! character, then places the camera behind it, in that order, even when
//! the delta is zero.
//!
//! All per-session state (previous timestamp, character, camera) lives in
//! the driver, so independent drivers never share anything.
//!
//! # Example
//!
//! ```rust,ignore
//! let hub = KeyEventHub::new();
//! let mut driver = FrameDriver::new(&config.controls, InputTracker::attach(&hub));
//! driver.spawn(scene.character_spawn, camera, &mut clips);
//!
//! // In the render loop
//! driver.tick(elapsed_seconds, &mut clips);
//! ```

use glam::Vec3;
use tracing::{trace, warn};

use crate::animation::{AnimationState, AnimationSwitch, ClipPlayer};
use crate::camera::{CameraFollow, CameraState, ground_anchor};
use crate::config::ControlsConfig;
use crate::input::{DirectionFlags, InputTracker};
use crate::player::{CharacterTransform, MovementResolver, MovementStep};

/// Converts absolute elapsed time into per-frame deltas.
///
/// The first sample yields 0 so the first frame never jumps. A clock that
/// goes backwards also yields 0.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    previous: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous sample.
    pub fn delta(&mut self, elapsed_seconds: f64) -> f32 {
        let delta = match self.previous {
            Some(previous) => (elapsed_seconds - previous).max(0.0),
            None => 0.0,
        };
        self.previous = Some(elapsed_seconds);
        delta as f32
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// What a frame did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Character or camera not available yet; nothing was touched
    Skipped,
    Advanced(FrameReport),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub delta_seconds: f32,
    pub flags: DirectionFlags,
    pub step: MovementStep,
    pub character_position: Vec3,
    pub camera_position: Vec3,
    pub animation: AnimationState,
}

/// Ties input, movement, camera follow and the animation switch together.
#[derive(Debug)]
pub struct FrameDriver {
    input: InputTracker,
    resolver: MovementResolver,
    follow: CameraFollow,
    animation: AnimationSwitch,
    clock: FrameClock,
    character: Option<CharacterTransform>,
    camera: Option<CameraState>,
    warned_not_ready: bool,
}

impl FrameDriver {
    pub fn new(controls: &ControlsConfig, input: InputTracker) -> Self {
        Self {
            input,
            resolver: MovementResolver::new(controls.movement_speed),
            follow: CameraFollow::new(controls.follow_distance),
            animation: AnimationSwitch::default(),
            clock: FrameClock::new(),
            character: None,
            camera: None,
            warned_not_ready: false,
        }
    }

    /// Use custom clip names for the idle/walk toggle.
    pub fn with_animation(mut self, animation: AnimationSwitch) -> Self {
        self.animation = animation;
        self
    }

    /// Install the character and camera. Frames before this are skipped.
    pub fn spawn(
        &mut self,
        character: CharacterTransform,
        camera: CameraState,
        clips: &mut dyn ClipPlayer,
    ) {
        self.character = Some(character);
        self.camera = Some(camera);
        self.animation.start(clips);
    }

    pub fn is_ready(&self) -> bool {
        self.character.is_some() && self.camera.is_some()
    }

    pub fn input(&self) -> &InputTracker {
        &self.input
    }

    pub fn character(&self) -> Option<&CharacterTransform> {
        self.character.as_ref()
    }

    pub fn camera(&self) -> Option<&CameraState> {
        self.camera.as_ref()
    }

    /// Orientation changes come from outside the follow logic.
    pub fn camera_mut(&mut self) -> Option<&mut CameraState> {
        self.camera.as_mut()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation.state()
    }

    /// Advance using absolute elapsed time from the host loop.
    pub fn tick(&mut self, elapsed_seconds: f64, clips: &mut dyn ClipPlayer) -> FrameOutcome {
        let delta = self.clock.delta(elapsed_seconds);
        self.step(delta, clips)
    }

    /// Advance one frame by `delta_seconds`.
    pub fn step(&mut self, delta_seconds: f32, clips: &mut dyn ClipPlayer) -> FrameOutcome {
        let (Some(character), Some(camera)) = (self.character.as_mut(), self.camera.as_mut())
        else {
            if !self.warned_not_ready {
                warn!("scene not ready, skipping frame");
                self.warned_not_ready = true;
            }
            return FrameOutcome::Skipped;
        };

        let flags = self.input.flags();
        let step = self.resolver.update(delta_seconds, &flags, character);
        let camera_position = self.follow.update(camera, character.position);
        self.animation.update(&flags, clips);

        trace!(
            delta = delta_seconds,
            position = ?character.position,
            yaw = character.yaw,
            "frame"
        );

        FrameOutcome::Advanced(FrameReport {
            delta_seconds,
            flags,
            step,
            character_position: character.position,
            camera_position,
            animation: self.animation.state(),
        })
    }

    /// Move the character to the ground point in front of the camera and
    /// re-place the camera behind it.
    pub fn recenter_character(&mut self) -> Option<Vec3> {
        let (Some(character), Some(camera)) = (self.character.as_mut(), self.camera.as_mut())
        else {
            return None;
        };

        let anchor = ground_anchor(camera, self.follow.distance);
        character.set_position(anchor);
        self.follow.update(camera, anchor);
        Some(anchor)
    }
}
