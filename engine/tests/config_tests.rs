//! Config Tests - Loading, Defaults and Validation
//!
//! Tests for JSON configuration: partial documents keep defaults, bad
//! values are rejected with the offending field, and the default scene
//! composes.

use std::f32::consts::PI;

use glam::Vec3;
use forest_walk_engine::scene::PropKind;
use forest_walk_engine::{AppConfig, ConfigError, Scene};

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_empty_document_is_default() {
    let config = AppConfig::from_json("{}").unwrap();
    assert_eq!(config, AppConfig::default());
}

#[test]
fn test_round_trip_through_json() {
    let mut config = AppConfig::default();
    config.controls.movement_speed = 3.0;
    config.scene.forest.tree_count = 12;

    let json = config.to_json().unwrap();
    assert_eq!(AppConfig::from_json(&json).unwrap(), config);
}

#[test]
fn test_nested_partial_override() {
    let config = AppConfig::from_json(
        r##"{
            "scene": {
                "fog": { "color": "#101010" },
                "character": { "position": [0.0, 0.0, 2.0] }
            }
        }"##,
    )
    .unwrap();

    assert_eq!(config.scene.fog.color, "#101010");
    assert_eq!(config.scene.fog.near, 10.0);
    assert_eq!(config.scene.character.position, Vec3::new(0.0, 0.0, 2.0));
    assert_eq!(config.scene.character.yaw, PI);
}

#[test]
fn test_missing_file_reports_path() {
    let err = AppConfig::load("/nonexistent/forest_walk.json").unwrap_err();
    match err {
        ConfigError::Io { path, .. } => {
            assert!(path.ends_with("forest_walk.json"));
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_invalid_colour_is_rejected() {
    let err = AppConfig::from_json(r#"{ "scene": { "background": "navy" } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidColor(ref c) if c == "navy"));
}

#[test]
fn test_fog_range_must_be_ordered() {
    let err =
        AppConfig::from_json(r#"{ "scene": { "fog": { "near": 30.0, "far": 25.0 } } }"#)
            .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::OutOfRange {
            field: "scene.fog.near",
            ..
        }
    ));
}

#[test]
fn test_negative_follow_distance_is_rejected() {
    let err = AppConfig::from_json(r#"{ "controls": { "follow_distance": -1.0 } }"#).unwrap_err();
    assert!(err.to_string().contains("controls.follow_distance"));
}

// ============================================================================
// Scene Composition
// ============================================================================

#[test]
fn test_default_scene_layout() {
    let config = AppConfig::default();
    let scene = Scene::from_config(&config.scene).unwrap();

    let wizard = scene.props_of(PropKind::Wizard).next().unwrap();
    assert_eq!(wizard.placement.position, Vec3::ZERO);
    assert_eq!(wizard.placement.scale, 1.91);

    let ruins = scene.props_of(PropKind::Ruins).next().unwrap();
    assert_eq!(ruins.placement.position, Vec3::new(-10.0, 0.4, -9.0));
    assert_eq!(ruins.placement.scale, 0.3);

    assert_eq!(scene.walk_clip, "course_chapeau");
    assert_eq!(scene.idle_clip, "pose_chapeau");
    assert_eq!(scene.ground.y, -0.1);
}

#[test]
fn test_trees_keep_clear_of_spawn() {
    let scene = Scene::from_config(&AppConfig::default().scene).unwrap();
    let spawn = scene.character_spawn.position;
    for tree in scene.props_of(PropKind::Tree) {
        assert!(tree.placement.position.distance(spawn) > 2.0);
    }
}
