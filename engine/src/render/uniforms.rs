//! Uniform Structs for GPU Shaders
//!
//! Must match the WGSL layout in `shaders/scene.wgsl` exactly.
//!
//! WGSL uniform layout (160 bytes total, every vec3 padded by a trailing f32):
//!   offset   0: view_proj (mat4x4<f32>)          = 64 bytes
//!   offset  64: camera_pos (vec3) + fog_near       = 16 bytes
//!   offset  80: fog_color (vec3) + fog_far         = 16 bytes
//!   offset  96: sun_dir (vec3) + sun_intensity     = 16 bytes
//!   offset 112: sun_color (vec3) + ambient         = 16 bytes
//!   offset 128: sky_color (vec3) + hemisphere      = 16 bytes
//!   offset 144: ground_color (vec3) + gamma_encode = 16 bytes

use glam::{Mat4, Vec3};

use crate::scene::Lighting;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub fog_near: f32,
    pub fog_color: [f32; 3],
    pub fog_far: f32,
    /// Normalized, pointing towards the sun
    pub sun_dir: [f32; 3],
    pub sun_intensity: f32,
    pub sun_color: [f32; 3],
    pub ambient: f32,
    pub sky_color: [f32; 3],
    pub hemisphere_intensity: f32,
    pub ground_color: [f32; 3],
    /// 1.0 when the surface is not sRGB and the shader must encode
    pub gamma_encode: f32,
}

static_assertions::assert_eq_size!(SceneUniforms, [u8; 160]);

impl SceneUniforms {
    pub fn new(lighting: &Lighting, gamma_encode: bool) -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            camera_pos: [0.0; 3],
            fog_near: lighting.fog_near,
            fog_color: lighting.fog_color.to_array(),
            fog_far: lighting.fog_far,
            sun_dir: lighting.sun_direction.to_array(),
            sun_intensity: lighting.sun_intensity,
            sun_color: lighting.sun_color.to_array(),
            ambient: lighting.ambient_intensity,
            sky_color: lighting.sky_color.to_array(),
            hemisphere_intensity: lighting.hemisphere_intensity,
            ground_color: lighting.ground_color.to_array(),
            gamma_encode: if gamma_encode { 1.0 } else { 0.0 },
        }
    }

    pub fn set_camera(&mut self, view_proj: Mat4, camera_pos: Vec3) {
        self.view_proj = view_proj.to_cols_array_2d();
        self.camera_pos = camera_pos.to_array();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Scene, SceneConfig};

    #[test]
    fn test_offsets_match_shader_layout() {
        assert_eq!(std::mem::offset_of!(SceneUniforms, camera_pos), 64);
        assert_eq!(std::mem::offset_of!(SceneUniforms, fog_color), 80);
        assert_eq!(std::mem::offset_of!(SceneUniforms, sun_dir), 96);
        assert_eq!(std::mem::offset_of!(SceneUniforms, sun_color), 112);
        assert_eq!(std::mem::offset_of!(SceneUniforms, sky_color), 128);
        assert_eq!(std::mem::offset_of!(SceneUniforms, ground_color), 144);
    }

    #[test]
    fn test_uniforms_from_lighting() {
        let scene = Scene::from_config(&SceneConfig::default()).unwrap();
        let mut uniforms = SceneUniforms::new(&scene.lighting, false);
        assert_eq!(uniforms.fog_near, 10.0);
        assert_eq!(uniforms.fog_far, 25.0);
        assert_eq!(uniforms.gamma_encode, 0.0);

        uniforms.set_camera(Mat4::IDENTITY, Vec3::new(1.0, 3.0, 9.0));
        assert_eq!(uniforms.camera_pos, [1.0, 3.0, 9.0]);
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 160);
    }
}
