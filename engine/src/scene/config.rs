//! Scene Configuration
//!
//! Layout, lighting and colours of the forest clearing. `Default` returns
//! the built-in scene.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::animation::{IDLE_CLIP, WALK_CLIP};
use crate::config::{ConfigError, ensure_finite, ensure_positive};

use super::color::parse_hex_color;

/// Linear distance fog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub color: String,
    /// Distance where fog starts
    pub near: f32,
    /// Distance where fog is opaque
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            color: "#202030".to_owned(),
            near: 10.0,
            far: 25.0,
        }
    }
}

/// Sky/ground gradient light.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HemisphereLightConfig {
    pub sky_color: String,
    pub ground_color: String,
    pub intensity: f32,
}

impl Default for HemisphereLightConfig {
    fn default() -> Self {
        Self {
            sky_color: "#91907e".to_owned(),
            ground_color: "#0000ff".to_owned(),
            intensity: 0.5,
        }
    }
}

/// Directional light shining from `position` towards the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLightConfig {
    pub color: String,
    pub position: Vec3,
    pub intensity: f32,
}

impl Default for DirectionalLightConfig {
    fn default() -> Self {
        Self {
            color: "#fcfcfa".to_owned(),
            position: Vec3::new(4.0, 5.0, 5.0),
            intensity: 1.5,
        }
    }
}

/// Square ground plane centred on the origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Edge length in scene units
    pub size: f32,
    /// Height of the plane
    pub y: f32,
    pub color: String,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: 50.0,
            y: -0.1,
            color: "#262934".to_owned(),
        }
    }
}

/// Controlled character spawn and clips.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub walk_clip: String,
    pub idle_clip: String,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(1.5, 0.0, 7.0),
            yaw: std::f32::consts::PI,
            scale: 1.5,
            walk_clip: WALK_CLIP.to_owned(),
            idle_clip: IDLE_CLIP.to_owned(),
        }
    }
}

/// Placement of a static prop, with an optional looping clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropConfig {
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
    pub clip: Option<String>,
}

impl Default for PropConfig {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            scale: 1.0,
            clip: None,
        }
    }
}

impl PropConfig {
    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        ensure_finite(field, self.yaw)?;
        ensure_positive(field, self.scale)?;
        Ok(())
    }
}

/// Ring of trees around the clearing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestConfig {
    pub tree_count: u32,
    /// No trees inside this radius
    pub clearing_radius: f32,
    /// No trees beyond this radius
    pub outer_radius: f32,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 48,
            clearing_radius: 11.0,
            outer_radius: 23.0,
        }
    }
}

/// Complete scene description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub background: String,
    pub fog: FogConfig,
    pub hemisphere: HemisphereLightConfig,
    pub ambient_intensity: f32,
    pub sun: DirectionalLightConfig,
    pub ground: GroundConfig,
    pub character: CharacterConfig,
    pub wizard: PropConfig,
    pub ruins: PropConfig,
    pub forest: ForestConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: "#202030".to_owned(),
            fog: FogConfig::default(),
            hemisphere: HemisphereLightConfig::default(),
            ambient_intensity: 1.0,
            sun: DirectionalLightConfig::default(),
            ground: GroundConfig::default(),
            character: CharacterConfig::default(),
            wizard: PropConfig {
                scale: 1.91,
                clip: Some("PortalOpen".to_owned()),
                ..PropConfig::default()
            },
            ruins: PropConfig {
                position: Vec3::new(-10.0, 0.4, -9.0),
                scale: 0.3,
                ..PropConfig::default()
            },
            forest: ForestConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for color in [
            &self.background,
            &self.fog.color,
            &self.hemisphere.sky_color,
            &self.hemisphere.ground_color,
            &self.sun.color,
            &self.ground.color,
        ] {
            parse_hex_color(color)?;
        }

        ensure_positive("scene.fog.far", self.fog.far)?;
        if !(self.fog.near >= 0.0 && self.fog.near < self.fog.far) {
            return Err(ConfigError::OutOfRange {
                field: "scene.fog.near",
                expected: "non-negative and less than scene.fog.far",
                value: self.fog.near,
            });
        }
        ensure_positive("scene.ground.size", self.ground.size)?;
        ensure_positive("scene.character.scale", self.character.scale)?;
        ensure_finite("scene.character.yaw", self.character.yaw)?;
        self.wizard.validate("scene.wizard")?;
        self.ruins.validate("scene.ruins")?;

        let forest = &self.forest;
        ensure_positive("scene.forest.clearing_radius", forest.clearing_radius)?;
        if !(forest.outer_radius > forest.clearing_radius) {
            return Err(ConfigError::OutOfRange {
                field: "scene.forest.outer_radius",
                expected: "greater than scene.forest.clearing_radius",
                value: forest.outer_radius,
            });
        }
        Ok(())
    }
}
