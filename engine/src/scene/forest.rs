//! Forest layout
//!
//! Deterministic tree placement on a golden-angle spiral between the
//! clearing radius and the outer radius. No randomness: the same config
//! always produces the same forest.

use glam::Vec3;

use super::{ForestConfig, Placement};

/// Golden angle in radians
const GOLDEN_ANGLE: f32 = 2.399_963;
/// Golden ratio conjugate, used to vary tree size and heading
const GOLDEN_FRACTION: f32 = 0.618_034;

pub fn tree_placements(config: &ForestConfig) -> Vec<Placement> {
    let count = config.tree_count;
    let inner_sq = config.clearing_radius * config.clearing_radius;
    let outer_sq = config.outer_radius * config.outer_radius;

    (0..count)
        .map(|i| {
            let t = (i as f32 + 0.5) / count as f32;
            // Uniform density over the annulus
            let radius = (inner_sq + (outer_sq - inner_sq) * t).sqrt();
            let angle = i as f32 * GOLDEN_ANGLE;
            let variety = (i as f32 * GOLDEN_FRACTION).fract();

            Placement {
                position: Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin()),
                yaw: variety * std::f32::consts::TAU,
                scale: 0.8 + 0.6 * variety,
            }
        })
        .collect()
}
