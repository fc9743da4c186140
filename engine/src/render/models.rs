//! Stand-in models
//!
//! Low-poly placeholders for the character, the druid, the ruins and the
//! forest, built from mesh primitives. Models are authored at unit scale,
//! standing on y = 0 and facing +Z.

use glam::{Mat4, Vec3};

use crate::player::CharacterTransform;
use crate::scene::{PropKind, Scene, srgb_to_linear};

use super::mesh::MeshBuilder;

const SEGMENTS: u32 = 10;

fn rgba(r: u8, g: u8, b: u8) -> [f32; 4] {
    let linear = srgb_to_linear(Vec3::new(r as f32, g as f32, b as f32) / 255.0);
    [linear.x, linear.y, linear.z, 1.0]
}

/// Small hatted walker. The nose marks the facing direction.
pub fn character(mesh: &mut MeshBuilder, transform: Mat4) {
    let skin = rgba(0xc9, 0x9b, 0x74);
    let tunic = rgba(0x5d, 0x7a, 0x3c);
    let hat = rgba(0x9e, 0x2b, 0x25);
    let boots = rgba(0x3b, 0x2a, 0x1e);

    mesh.push_box(transform, Vec3::new(-0.1, 0.08, 0.0), Vec3::new(0.07, 0.08, 0.1), boots);
    mesh.push_box(transform, Vec3::new(0.1, 0.08, 0.0), Vec3::new(0.07, 0.08, 0.1), boots);
    mesh.push_box(transform, Vec3::new(0.0, 0.4, 0.0), Vec3::new(0.2, 0.24, 0.14), tunic);
    mesh.push_box(transform, Vec3::new(0.0, 0.78, 0.0), Vec3::new(0.15, 0.14, 0.14), skin);
    mesh.push_box(transform, Vec3::new(0.0, 0.76, 0.17), Vec3::new(0.03, 0.03, 0.04), skin);
    mesh.push_cylinder(transform, Vec3::new(0.0, 0.9, 0.0), 0.26, 0.03, SEGMENTS, hat);
    mesh.push_cone(transform, Vec3::new(0.0, 0.93, 0.0), 0.17, 0.42, SEGMENTS, hat);
}

/// Robed druid with a staff.
pub fn wizard(mesh: &mut MeshBuilder, transform: Mat4) {
    let robe = rgba(0x3a, 0x4f, 0x7a);
    let skin = rgba(0xd8, 0xb0, 0x8c);
    let beard = rgba(0xe6, 0xe6, 0xdc);
    let wood = rgba(0x6b, 0x4a, 0x2f);

    mesh.push_cone(transform, Vec3::ZERO, 0.34, 0.9, SEGMENTS, robe);
    mesh.push_box(transform, Vec3::new(0.0, 0.86, 0.0), Vec3::splat(0.1), skin);
    mesh.push_box(transform, Vec3::new(0.0, 0.78, 0.09), Vec3::new(0.08, 0.1, 0.03), beard);
    mesh.push_cone(transform, Vec3::new(0.0, 0.95, 0.0), 0.16, 0.3, SEGMENTS, robe);
    mesh.push_cylinder(transform, Vec3::new(0.3, 0.0, 0.1), 0.025, 1.15, 6, wood);
}

/// Broken stone circle. Authored large; the scene scales it down.
pub fn ruins(mesh: &mut MeshBuilder, transform: Mat4) {
    let stone = rgba(0x7d, 0x7a, 0x70);
    let moss = rgba(0x4b, 0x5e, 0x3a);

    mesh.push_box(transform, Vec3::new(0.0, -0.5, 0.0), Vec3::new(10.0, 0.5, 10.0), moss);

    let heights = [10.0, 6.0, 12.0, 3.0, 9.0, 11.0, 4.5, 8.0];
    for (i, height) in heights.iter().enumerate() {
        let angle = i as f32 / heights.len() as f32 * std::f32::consts::TAU;
        let base = Vec3::new(angle.cos() * 7.0, 0.0, angle.sin() * 7.0);
        mesh.push_cylinder(transform, base, 0.9, *height, SEGMENTS, stone);
    }

    // Fallen lintel
    mesh.push_box(
        transform,
        Vec3::new(1.5, 0.6, 3.0),
        Vec3::new(3.5, 0.6, 0.8),
        stone,
    );
}

/// Conifer: trunk and two stacked cones.
pub fn tree(mesh: &mut MeshBuilder, transform: Mat4) {
    let bark = rgba(0x4a, 0x35, 0x24);
    let needles = rgba(0x24, 0x3d, 0x2a);

    mesh.push_cylinder(transform, Vec3::ZERO, 0.15, 1.0, 6, bark);
    mesh.push_cone(transform, Vec3::new(0.0, 0.8, 0.0), 1.1, 1.8, SEGMENTS, needles);
    mesh.push_cone(transform, Vec3::new(0.0, 1.9, 0.0), 0.8, 1.5, SEGMENTS, needles);
}

pub fn prop(mesh: &mut MeshBuilder, kind: PropKind, transform: Mat4) {
    match kind {
        PropKind::Wizard => wizard(mesh, transform),
        PropKind::Ruins => ruins(mesh, transform),
        PropKind::Tree => tree(mesh, transform),
    }
}

/// Everything that never moves: ground plane and props.
pub fn static_scene(scene: &Scene) -> MeshBuilder {
    let mut mesh = MeshBuilder::new();
    let ground = scene.ground.color;
    mesh.push_plane(
        scene.ground.size,
        scene.ground.y,
        [ground.x, ground.y, ground.z, 1.0],
    );
    for prop_entry in &scene.props {
        prop(&mut mesh, prop_entry.kind, prop_entry.placement.matrix());
    }
    mesh
}

/// The character at its current transform, lifted by `bob`.
pub fn character_at(mesh: &mut MeshBuilder, transform: &CharacterTransform, bob: f32) {
    let lift = Mat4::from_translation(Vec3::Y * bob);
    character(mesh, lift * transform.matrix());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneConfig;

    #[test]
    fn test_character_topology_is_stable() {
        let mut a = MeshBuilder::new();
        character_at(&mut a, &CharacterTransform::default(), 0.0);
        let mut b = MeshBuilder::new();
        let moved = CharacterTransform::new(Vec3::new(3.0, 0.0, -2.0), 1.0, 1.5);
        character_at(&mut b, &moved, 0.05);
        assert_eq!(a.vertices.len(), b.vertices.len());
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_character_nose_points_along_facing() {
        let mean_z = |yaw: f32| {
            let mut mesh = MeshBuilder::new();
            character_at(&mut mesh, &CharacterTransform::new(Vec3::ZERO, yaw, 1.0), 0.0);
            mesh.vertices.iter().map(|v| v.position[2]).sum::<f32>() / mesh.vertices.len() as f32
        };
        assert!(mean_z(0.0) > 0.0);
        // Yaw pi turns the nose towards -Z
        assert!(mean_z(std::f32::consts::PI) < 0.0);
    }

    #[test]
    fn test_static_scene_contains_every_prop() {
        let scene = Scene::from_config(&SceneConfig::default()).unwrap();
        let mesh = static_scene(&scene);
        let mut expected = MeshBuilder::new();
        expected.push_plane(1.0, 0.0, [1.0; 4]);
        for p in &scene.props {
            prop(&mut expected, p.kind, Mat4::IDENTITY);
        }
        assert_eq!(mesh.indices.len(), expected.indices.len());
    }
}
