//! Render Module
//!
//! wgpu rendering for the forest scene: GPU context setup, flat-shaded
//! stand-in meshes and a single lit, fogged forward pass.

pub mod gpu_context;
pub mod mesh;
pub mod models;
pub mod scene_renderer;
pub mod uniforms;

use thiserror::Error;

pub use gpu_context::{DEPTH_FORMAT, GpuContext, GpuContextConfig};
pub use mesh::{MeshBuffer, MeshBuilder, MeshVertex, draw_mesh_buffer};
pub use scene_renderer::{SCENE_SHADER, SceneRenderer, view_projection};
pub use uniforms::SceneUniforms;

/// Failures while bringing up the GPU.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}
