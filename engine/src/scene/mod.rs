//! Scene Module
//!
//! Static composition of the forest clearing: background, fog, lights,
//! ground, props and the character spawn. Built once from a
//! [`SceneConfig`]; the frame driver owns the mutable character and camera
//! state afterwards.

pub mod color;
pub mod config;
pub mod forest;

use glam::{Mat4, Quat, Vec3};
use tracing::info;

use crate::config::ConfigError;
use crate::player::CharacterTransform;

pub use color::{parse_hex_color, parse_linear_color, srgb_to_linear};
pub use config::{
    CharacterConfig, DirectionalLightConfig, FogConfig, ForestConfig, GroundConfig,
    HemisphereLightConfig, PropConfig, SceneConfig,
};
pub use forest::tree_placements;

/// Position, heading and uniform scale of a static object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
}

impl Placement {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.yaw),
            self.position,
        )
    }
}

impl From<&PropConfig> for Placement {
    fn from(config: &PropConfig) -> Self {
        Self {
            position: config.position,
            yaw: config.yaw,
            scale: config.scale,
        }
    }
}

/// Kinds of static props in the clearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropKind {
    Wizard,
    Ruins,
    Tree,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub kind: PropKind,
    pub placement: Placement,
    /// Clip to loop from scene start
    pub clip: Option<String>,
}

/// Lighting and atmosphere, colours in linear RGB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub background: Vec3,
    pub fog_color: Vec3,
    pub fog_near: f32,
    pub fog_far: f32,
    pub sky_color: Vec3,
    pub ground_color: Vec3,
    pub hemisphere_intensity: f32,
    pub ambient_intensity: f32,
    pub sun_color: Vec3,
    /// Normalized direction from the scene towards the sun
    pub sun_direction: Vec3,
    pub sun_intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    pub size: f32,
    pub y: f32,
    /// Linear RGB
    pub color: Vec3,
}

/// Runtime scene built from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub lighting: Lighting,
    pub ground: Ground,
    pub props: Vec<Prop>,
    pub character_spawn: CharacterTransform,
    pub walk_clip: String,
    pub idle_clip: String,
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let lighting = Lighting {
            background: parse_linear_color(&config.background)?,
            fog_color: parse_linear_color(&config.fog.color)?,
            fog_near: config.fog.near,
            fog_far: config.fog.far,
            sky_color: parse_linear_color(&config.hemisphere.sky_color)?,
            ground_color: parse_linear_color(&config.hemisphere.ground_color)?,
            hemisphere_intensity: config.hemisphere.intensity,
            ambient_intensity: config.ambient_intensity,
            sun_color: parse_linear_color(&config.sun.color)?,
            sun_direction: config.sun.position.normalize_or(Vec3::Y),
            sun_intensity: config.sun.intensity,
        };

        let ground = Ground {
            size: config.ground.size,
            y: config.ground.y,
            color: parse_linear_color(&config.ground.color)?,
        };

        let mut props = vec![
            Prop {
                kind: PropKind::Wizard,
                placement: Placement::from(&config.wizard),
                clip: config.wizard.clip.clone(),
            },
            Prop {
                kind: PropKind::Ruins,
                placement: Placement::from(&config.ruins),
                clip: config.ruins.clip.clone(),
            },
        ];
        props.extend(tree_placements(&config.forest).into_iter().map(|placement| Prop {
            kind: PropKind::Tree,
            placement,
            clip: None,
        }));

        let character = &config.character;
        let character_spawn =
            CharacterTransform::new(character.position, character.yaw, character.scale);

        info!(
            props = props.len(),
            spawn = ?character_spawn.position,
            "scene composed"
        );

        Ok(Self {
            lighting,
            ground,
            props,
            character_spawn,
            walk_clip: character.walk_clip.clone(),
            idle_clip: character.idle_clip.clone(),
        })
    }

    pub fn props_of(&self, kind: PropKind) -> impl Iterator<Item = &Prop> + '_ {
        self.props.iter().filter(move |prop| prop.kind == kind)
    }

    /// Props that loop a clip from scene start, with the clip name.
    pub fn looping_clips(&self) -> impl Iterator<Item = (&Prop, &str)> + '_ {
        self.props
            .iter()
            .filter_map(|prop| prop.clip.as_deref().map(|clip| (prop, clip)))
    }
}
