//! Scene Renderer
//!
//! One forward pass: clear to the background colour, draw the static scene
//! buffer, then the character buffer rewritten each frame.

use glam::{Mat4, Vec3};

use crate::camera::CameraState;
use crate::config::CameraConfig;
use crate::player::CharacterTransform;
use crate::scene::Scene;

use super::gpu_context::{DEPTH_FORMAT, GpuContext};
use super::mesh::{MeshBuffer, MeshBuilder, MeshVertex, draw_mesh_buffer};
use super::models;
use super::uniforms::SceneUniforms;

/// WGSL source for the scene pipeline.
pub const SCENE_SHADER: &str = include_str!("../../../shaders/scene.wgsl");

/// Perspective projection times the camera view.
pub fn view_projection(camera: &CameraState, config: &CameraConfig, aspect: f32) -> Mat4 {
    let projection =
        Mat4::perspective_rh(config.fov_radians(), aspect.max(1e-3), config.near, config.far);
    projection * camera.view_matrix()
}

pub struct SceneRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    uniforms: SceneUniforms,
    static_mesh: MeshBuffer,
    character_mesh: MeshBuffer,
    character_scratch: MeshBuilder,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    pub fn new(gpu: &GpuContext, scene: &Scene) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Scene Shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_SHADER.into()),
        });

        let uniforms = SceneUniforms::new(&scene.lighting, !gpu.format().is_srgb());
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform Buffer"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[MeshVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.format(),
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let static_mesh =
            MeshBuffer::from_builder(device, "Static Scene", &models::static_scene(scene));

        let mut character_scratch = MeshBuilder::new();
        models::character_at(&mut character_scratch, &scene.character_spawn, 0.0);
        let character_mesh = MeshBuffer::from_builder(device, "Character", &character_scratch);

        let background = scene.lighting.background;
        let clear_color = wgpu::Color {
            r: background.x as f64,
            g: background.y as f64,
            b: background.z as f64,
            a: 1.0,
        };

        Self {
            pipeline,
            bind_group,
            uniform_buffer,
            uniforms,
            static_mesh,
            character_mesh,
            character_scratch,
            clear_color,
        }
    }

    /// Rebuild the character vertices at its current transform.
    pub fn update_character(&mut self, queue: &wgpu::Queue, transform: &CharacterTransform, bob: f32) {
        self.character_scratch.clear();
        models::character_at(&mut self.character_scratch, transform, bob);
        self.character_mesh
            .write_vertices(queue, &self.character_scratch.vertices);
    }

    pub fn render(
        &mut self,
        gpu: &GpuContext,
        view_proj: Mat4,
        camera_pos: Vec3,
    ) -> Result<(), wgpu::SurfaceError> {
        self.uniforms.set_camera(view_proj, camera_pos);
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&self.uniforms));

        let frame = gpu.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &gpu.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            draw_mesh_buffer(&mut pass, &self.static_mesh);
            draw_mesh_buffer(&mut pass, &self.character_mesh);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_target_projects_to_screen_centre() {
        let config = CameraConfig::default();
        let mut camera = CameraState::new(Vec3::new(1.0, 3.0, 9.0), 0.0, 0.0);
        let target = Vec3::new(1.5, 0.0, 7.0);
        camera.set_position(target - camera.world_direction() * 4.5);

        let clip = view_projection(&camera, &config, 16.0 / 9.0) * target.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
