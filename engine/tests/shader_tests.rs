//! Shader Tests - WGSL Validation and Uniform Layout
//!
//! Parses and validates the scene shader with naga, then checks the
//! uniform block matches the Rust struct uploaded every frame.

use forest_walk_engine::render::{MeshVertex, SCENE_SHADER, SceneUniforms};

fn parse_scene_shader() -> naga::Module {
    match naga::front::wgsl::parse_str(SCENE_SHADER) {
        Ok(module) => module,
        Err(err) => panic!("scene.wgsl failed to parse:\n{}", err.emit_to_string(SCENE_SHADER)),
    }
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_scene_shader_validates() {
    let module = parse_scene_shader();
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );
    if let Err(err) = validator.validate(&module) {
        panic!("scene.wgsl failed validation: {err:?}");
    }
}

#[test]
fn test_scene_shader_entry_points() {
    let module = parse_scene_shader();
    let names: Vec<_> = module
        .entry_points
        .iter()
        .map(|ep| (ep.name.as_str(), ep.stage))
        .collect();

    assert!(names.contains(&("vs_main", naga::ShaderStage::Vertex)));
    assert!(names.contains(&("fs_main", naga::ShaderStage::Fragment)));
}

// ============================================================================
// Layout
// ============================================================================

#[test]
fn test_uniform_block_size_matches_struct() {
    let module = parse_scene_shader();
    let (_, scene) = module
        .global_variables
        .iter()
        .find(|(_, var)| var.name.as_deref() == Some("scene"))
        .expect("scene uniform is declared");

    let size = module.types[scene.ty].inner.size(module.to_ctx());
    assert_eq!(size as usize, std::mem::size_of::<SceneUniforms>());
}

#[test]
fn test_vertex_layout_matches_shader_inputs() {
    let layout = MeshVertex::layout();
    assert_eq!(layout.array_stride, 40);
    let locations: Vec<u32> = layout.attributes.iter().map(|a| a.shader_location).collect();
    assert_eq!(locations, vec![0, 1, 2]);
}

// ============================================================================
// Fog
// ============================================================================

fn fragment_math(module: &naga::Module) -> Vec<naga::MathFunction> {
    let fragment = module
        .entry_points
        .iter()
        .find(|ep| ep.name == "fs_main")
        .expect("fragment entry point");
    fragment
        .function
        .expressions
        .iter()
        .filter_map(|(_, expr)| match expr {
            naga::Expression::Math { fun, .. } => Some(*fun),
            _ => None,
        })
        .collect()
}

#[test]
fn test_fog_ramp_is_linear() {
    let module = parse_scene_shader();
    let math = fragment_math(&module);

    assert!(!math.contains(&naga::MathFunction::SmoothStep));
    assert!(math.contains(&naga::MathFunction::Clamp));
}
