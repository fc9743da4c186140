//! Animation Switch
//!
//! Two-state clip toggle for the character: the walk clip plays while any
//! direction is held, the idle clip otherwise. Clip playback itself belongs
//! to a [`ClipPlayer`]; this module only decides what to play and when.

use std::collections::BTreeSet;

use tracing::debug;

use crate::input::DirectionFlags;

/// Default clip names of the character model.
pub const WALK_CLIP: &str = "course_chapeau";
pub const IDLE_CLIP: &str = "pose_chapeau";

/// Anything that can start and stop named animation clips.
pub trait ClipPlayer {
    fn play(&mut self, clip: &str);
    fn stop(&mut self, clip: &str);
}

/// Animation state of the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
}

impl AnimationState {
    pub fn from_flags(flags: &DirectionFlags) -> Self {
        if flags.any() {
            AnimationState::Walk
        } else {
            AnimationState::Idle
        }
    }
}

/// Issues play/stop calls on idle/walk transitions.
#[derive(Debug, Clone)]
pub struct AnimationSwitch {
    walk_clip: String,
    idle_clip: String,
    state: AnimationState,
}

impl Default for AnimationSwitch {
    fn default() -> Self {
        Self::new(WALK_CLIP, IDLE_CLIP)
    }
}

impl AnimationSwitch {
    pub fn new(walk_clip: impl Into<String>, idle_clip: impl Into<String>) -> Self {
        Self {
            walk_clip: walk_clip.into(),
            idle_clip: idle_clip.into(),
            state: AnimationState::Idle,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn walk_clip(&self) -> &str {
        &self.walk_clip
    }

    pub fn idle_clip(&self) -> &str {
        &self.idle_clip
    }

    /// Start the resting pose. Call once at scene setup.
    pub fn start(&mut self, player: &mut dyn ClipPlayer) {
        self.state = AnimationState::Idle;
        player.play(&self.idle_clip);
    }

    /// Switch clips if the held directions changed the state.
    ///
    /// Returns `true` when a transition happened.
    pub fn update(&mut self, flags: &DirectionFlags, player: &mut dyn ClipPlayer) -> bool {
        let next = AnimationState::from_flags(flags);
        if next == self.state {
            return false;
        }

        match next {
            AnimationState::Walk => {
                player.play(&self.walk_clip);
                player.stop(&self.idle_clip);
            }
            AnimationState::Idle => {
                player.stop(&self.walk_clip);
                player.play(&self.idle_clip);
            }
        }
        debug!(from = ?self.state, to = ?next, "character animation changed");
        self.state = next;
        true
    }
}

/// Clip player for the stand-in models.
///
/// Tracks which clips are playing and advances a phase while the bobbing
/// clip (the walk clip) is active. The renderer turns the phase into a
/// vertical offset.
#[derive(Debug, Clone)]
pub struct ProceduralClips {
    bob_clip: String,
    playing: BTreeSet<String>,
    phase: f32,
}

/// Bob cycles per second while walking
const BOB_FREQUENCY: f32 = 2.0;
/// Peak bob height in model units
const BOB_HEIGHT: f32 = 0.06;

impl ProceduralClips {
    pub fn new(bob_clip: impl Into<String>) -> Self {
        Self {
            bob_clip: bob_clip.into(),
            playing: BTreeSet::new(),
            phase: 0.0,
        }
    }

    pub fn is_playing(&self, clip: &str) -> bool {
        self.playing.contains(clip)
    }

    pub fn playing(&self) -> impl Iterator<Item = &str> + '_ {
        self.playing.iter().map(String::as_str)
    }

    /// Advance playing clips by `delta_seconds`.
    pub fn advance(&mut self, delta_seconds: f32) {
        if self.is_playing(&self.bob_clip) {
            self.phase = (self.phase + delta_seconds * BOB_FREQUENCY).fract();
        }
    }

    /// Vertical offset of the bobbing model, 0 when the clip is stopped.
    pub fn bob_offset(&self) -> f32 {
        if !self.is_playing(&self.bob_clip) {
            return 0.0;
        }
        (self.phase * std::f32::consts::TAU).sin().abs() * BOB_HEIGHT
    }
}

impl ClipPlayer for ProceduralClips {
    fn play(&mut self, clip: &str) {
        if self.playing.insert(clip.to_owned()) && clip == self.bob_clip {
            self.phase = 0.0;
        }
    }

    fn stop(&mut self, clip: &str) {
        self.playing.remove(clip);
    }
}

/// A recorded clip request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipCall {
    Play(String),
    Stop(String),
}

/// Clip player that records every request, for tests and diagnostics.
#[derive(Debug, Clone, Default)]
pub struct ClipLog {
    pub calls: Vec<ClipCall>,
}

impl ClipLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl ClipPlayer for ClipLog {
    fn play(&mut self, clip: &str) {
        self.calls.push(ClipCall::Play(clip.to_owned()));
    }

    fn stop(&mut self, clip: &str) {
        self.calls.push(ClipCall::Stop(clip.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Direction;

    #[test]
    fn test_start_plays_idle() {
        let mut switch = AnimationSwitch::default();
        let mut log = ClipLog::new();
        switch.start(&mut log);
        assert_eq!(log.calls, vec![ClipCall::Play(IDLE_CLIP.to_owned())]);
    }

    #[test]
    fn test_walk_then_idle() {
        let mut switch = AnimationSwitch::default();
        let mut log = ClipLog::new();

        let walking = DirectionFlags::from_held(&[Direction::Left]);
        assert!(switch.update(&walking, &mut log));
        assert_eq!(
            log.calls,
            vec![
                ClipCall::Play(WALK_CLIP.to_owned()),
                ClipCall::Stop(IDLE_CLIP.to_owned()),
            ]
        );

        log.clear();
        assert!(switch.update(&DirectionFlags::new(), &mut log));
        assert_eq!(
            log.calls,
            vec![
                ClipCall::Stop(WALK_CLIP.to_owned()),
                ClipCall::Play(IDLE_CLIP.to_owned()),
            ]
        );
    }

    #[test]
    fn test_no_calls_without_transition() {
        let mut switch = AnimationSwitch::default();
        let mut log = ClipLog::new();
        let walking = DirectionFlags::from_held(&[Direction::Forward]);
        switch.update(&walking, &mut log);
        log.clear();

        let still_walking = DirectionFlags::from_held(&[Direction::Forward, Direction::Right]);
        assert!(!switch.update(&still_walking, &mut log));
        assert!(log.calls.is_empty());
    }

    #[test]
    fn test_procedural_bob_only_while_walking() {
        let mut clips = ProceduralClips::new(WALK_CLIP);
        clips.play(IDLE_CLIP);
        clips.advance(0.1);
        assert_eq!(clips.bob_offset(), 0.0);

        clips.play(WALK_CLIP);
        clips.advance(0.1);
        assert!(clips.bob_offset() > 0.0);
        assert!(clips.bob_offset() <= BOB_HEIGHT);

        clips.stop(WALK_CLIP);
        assert_eq!(clips.bob_offset(), 0.0);
    }
}
