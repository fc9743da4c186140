//! Forest Walk Engine
//!
//! A small third-person scene: a character walks a forest clearing under
//! keyboard control while the camera trails behind it.
//!
//! # Modules
//!
//! - [`input`] - Key event hub and the held-direction tracker
//! - [`player`] - Character transform and the movement resolver
//! - [`camera`] - Camera state and the follow rule
//! - [`animation`] - Idle/walk clip switching
//! - [`driver`] - Per-frame update order
//! - [`scene`] - Scene composition, lighting and forest layout
//! - [`config`] - JSON configuration with defaults
//! - [`render`] - wgpu renderer
//!
//! # Example
//!
//! ```ignore
//! use forest_walk_engine::{AppConfig, FrameDriver, InputTracker, KeyCode, KeyEventHub, Scene};
//! use forest_walk_engine::animation::ProceduralClips;
//!
//! let config = AppConfig::default();
//! let scene = Scene::from_config(&config.scene)?;
//!
//! let hub = KeyEventHub::new();
//! let mut clips = ProceduralClips::new(scene.walk_clip.clone());
//! let mut driver = FrameDriver::new(&config.controls, InputTracker::attach(&hub));
//! driver.spawn(scene.character_spawn, config.camera.initial_state(), &mut clips);
//!
//! hub.key_down(KeyCode::W);
//! driver.tick(0.0, &mut clips);
//! driver.tick(1.0, &mut clips);
//! ```

pub mod animation;
pub mod camera;
pub mod config;
pub mod driver;
pub mod input;
pub mod player;
pub mod render;
pub mod scene;

pub use animation::{AnimationState, AnimationSwitch, ClipPlayer, ProceduralClips};
pub use camera::{CameraFollow, CameraState};
pub use config::{AppConfig, ConfigError};
pub use driver::{FrameDriver, FrameOutcome, FrameReport};
pub use input::{DirectionFlags, InputTracker, KeyCode, KeyEvent, KeyEventHub};
pub use player::{CharacterTransform, MovementResolver, MovementStep};
pub use scene::{Scene, SceneConfig};
