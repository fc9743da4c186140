//! Application Configuration
//!
//! Centralized configuration for controls, camera, window and scene.
//! Every struct has a `Default` matching the built-in scene and is
//! deserialized with `#[serde(default)]`, so a config file only needs the
//! fields it wants to change.
//!
//! ```json
//! {
//!     "controls": { "movement_speed": 2.0 },
//!     "camera": { "pitch": -0.2 }
//! }
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{CameraState, FOLLOW_DISTANCE};
use crate::player::MOVEMENT_SPEED;
use crate::scene::SceneConfig;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid colour {0:?} (expected #rrggbb)")]
    InvalidColor(String),
    #[error("{field} must be {expected}, got {value}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
        value: f32,
    },
}

/// Require a finite, strictly positive value.
pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "finite and > 0",
            value,
        })
    }
}

/// Require a finite value.
pub(crate) fn ensure_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            expected: "finite",
            value,
        })
    }
}

/// Character control tuning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Scene units per second
    pub movement_speed: f32,
    /// Distance the camera trails the character
    pub follow_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            movement_speed: MOVEMENT_SPEED,
            follow_distance: FOLLOW_DISTANCE,
        }
    }
}

impl ControlsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("controls.movement_speed", self.movement_speed)?;
        ensure_positive("controls.follow_distance", self.follow_distance)?;
        Ok(())
    }
}

/// Initial camera placement and projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Position before the first follow update
    pub position: Vec3,
    /// Horizontal angle in radians (0 looks down -Z)
    pub yaw: f32,
    /// Vertical angle in radians (negative looks down)
    pub pitch: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    /// Above and behind the spawn point, aimed at the scene origin.
    fn default() -> Self {
        Self {
            position: Vec3::new(1.0, 3.0, 9.0),
            yaw: 0.0,
            pitch: 0.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
        }
        .looking_at(Vec3::ZERO)
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("camera.yaw", self.yaw)?;
        ensure_finite("camera.pitch", self.pitch)?;
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::OutOfRange {
                field: "camera.fov_degrees",
                expected: "between 0 and 180",
                value: self.fov_degrees,
            });
        }
        ensure_positive("camera.near", self.near)?;
        if !(self.far > self.near) || !self.far.is_finite() {
            return Err(ConfigError::OutOfRange {
                field: "camera.far",
                expected: "finite and greater than camera.near",
                value: self.far,
            });
        }
        Ok(())
    }

    /// Replace the orientation with one aimed from `position` at `target`.
    pub fn looking_at(mut self, target: Vec3) -> Self {
        let state = CameraState::look_at(self.position, target);
        self.yaw = state.yaw;
        self.pitch = state.pitch;
        self
    }

    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Camera before the first follow update.
    pub fn initial_state(&self) -> CameraState {
        CameraState::new(self.position, self.yaw, self.pitch)
    }
}

/// Viewer window settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Cap to the monitor refresh rate
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Forest Walk".to_owned(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub controls: ControlsConfig,
    pub camera: CameraConfig,
    pub scene: SceneConfig,
    pub window: WindowConfig,
}

impl AppConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.controls.validate()?;
        self.camera.validate()?;
        self.scene.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{ "controls": { "movement_speed": 2.5 } }"#).unwrap();
        assert_eq!(config.controls.movement_speed, 2.5);
        assert_eq!(config.controls.follow_distance, FOLLOW_DISTANCE);
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let err = AppConfig::from_json(r#"{ "controls": { "movement_speed": 0.0 } }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "controls.movement_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_clip_planes() {
        let mut config = AppConfig::default();
        config.camera.far = 0.05;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            AppConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
