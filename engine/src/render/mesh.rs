//! Mesh building
//!
//! CPU-side vertex/index assembly for flat-shaded primitives, and the GPU
//! buffers they upload into. Every primitive is built in model space and
//! transformed by a placement matrix before it is appended.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

/// Vertex for mesh rendering (position, normal, color)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 40]);

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] = [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 0,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x3,
            offset: 12,
            shader_location: 1,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: 24,
            shader_location: 2,
        },
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Accumulates triangles for one draw call.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    /// Append another builder's geometry.
    pub fn extend(&mut self, other: &MeshBuilder) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.indices.extend(other.indices.iter().map(|i| base + i));
    }

    /// Flat-shaded triangle. The normal follows the counter-clockwise winding
    /// of the transformed corners.
    pub fn push_triangle(&mut self, transform: Mat4, corners: [Vec3; 3], color: [f32; 4]) {
        let [a, b, c] = corners.map(|p| transform.transform_point3(p));
        let normal = (b - a).cross(c - a).normalize_or_zero();
        let base = self.vertices.len() as u32;
        for position in [a, b, c] {
            self.vertices.push(MeshVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    /// Flat-shaded quad from four counter-clockwise corners.
    pub fn push_quad(&mut self, transform: Mat4, corners: [Vec3; 4], color: [f32; 4]) {
        let [a, b, c, d] = corners.map(|p| transform.transform_point3(p));
        let normal = (b - a).cross(d - a).normalize_or_zero();
        let base = self.vertices.len() as u32;
        for position in [a, b, c, d] {
            self.vertices.push(MeshVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                color,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Horizontal square of edge `size` centred on the origin at height `y`.
    pub fn push_plane(&mut self, size: f32, y: f32, color: [f32; 4]) {
        let h = size * 0.5;
        self.push_quad(
            Mat4::IDENTITY,
            [
                Vec3::new(-h, y, h),
                Vec3::new(h, y, h),
                Vec3::new(h, y, -h),
                Vec3::new(-h, y, -h),
            ],
            color,
        );
    }

    /// Axis-aligned box in model space.
    pub fn push_box(&mut self, transform: Mat4, center: Vec3, half: Vec3, color: [f32; 4]) {
        let min = center - half;
        let max = center + half;
        let corner = |x: f32, y: f32, z: f32| Vec3::new(x, y, z);

        // +X, -X, +Y, -Y, +Z, -Z
        let faces = [
            [
                corner(max.x, min.y, max.z),
                corner(max.x, min.y, min.z),
                corner(max.x, max.y, min.z),
                corner(max.x, max.y, max.z),
            ],
            [
                corner(min.x, min.y, min.z),
                corner(min.x, min.y, max.z),
                corner(min.x, max.y, max.z),
                corner(min.x, max.y, min.z),
            ],
            [
                corner(min.x, max.y, max.z),
                corner(max.x, max.y, max.z),
                corner(max.x, max.y, min.z),
                corner(min.x, max.y, min.z),
            ],
            [
                corner(min.x, min.y, min.z),
                corner(max.x, min.y, min.z),
                corner(max.x, min.y, max.z),
                corner(min.x, min.y, max.z),
            ],
            [
                corner(min.x, min.y, max.z),
                corner(max.x, min.y, max.z),
                corner(max.x, max.y, max.z),
                corner(min.x, max.y, max.z),
            ],
            [
                corner(max.x, min.y, min.z),
                corner(min.x, min.y, min.z),
                corner(min.x, max.y, min.z),
                corner(max.x, max.y, min.z),
            ],
        ];
        for face in faces {
            self.push_quad(transform, face, color);
        }
    }

    /// Cone standing on `base` with its apex `height` above it.
    pub fn push_cone(
        &mut self,
        transform: Mat4,
        base: Vec3,
        radius: f32,
        height: f32,
        segments: u32,
        color: [f32; 4],
    ) {
        let apex = base + Vec3::Y * height;
        let ring = ring_points(base, radius, segments);
        for (i, &a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            self.push_triangle(transform, [a, b, apex], color);
            self.push_triangle(transform, [b, a, base], color);
        }
    }

    /// Capped cylinder standing on `base`.
    pub fn push_cylinder(
        &mut self,
        transform: Mat4,
        base: Vec3,
        radius: f32,
        height: f32,
        segments: u32,
        color: [f32; 4],
    ) {
        let up = Vec3::Y * height;
        let top = base + up;
        let ring = ring_points(base, radius, segments);
        for (i, &a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            self.push_quad(transform, [a, b, b + up, a + up], color);
            self.push_triangle(transform, [b, a, base], color);
            self.push_triangle(transform, [a + up, b + up, top], color);
        }
    }
}

/// Points on a horizontal circle, wound so that side faces built from
/// consecutive pairs face outward.
fn ring_points(center: Vec3, radius: f32, segments: u32) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = -(i as f32) / segments as f32 * std::f32::consts::TAU;
            center + Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}

/// A mesh buffer that can be drawn
pub struct MeshBuffer {
    pub label: &'static str,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    /// Vertex capacity for buffers rewritten every frame
    pub vertex_capacity: usize,
}

impl MeshBuffer {
    /// Upload a finished mesh.
    pub fn from_builder(device: &wgpu::Device, label: &'static str, mesh: &MeshBuilder) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            label,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            vertex_capacity: mesh.vertices.len(),
        }
    }

    /// Rewrite vertex positions in place. Topology must match the mesh the
    /// buffer was created from; anything beyond capacity is dropped.
    pub fn write_vertices(&self, queue: &wgpu::Queue, vertices: &[MeshVertex]) {
        let count = vertices.len().min(self.vertex_capacity);
        if count > 0 {
            queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&vertices[..count]),
            );
        }
    }
}

/// Helper to draw a mesh buffer
pub fn draw_mesh_buffer(render_pass: &mut wgpu::RenderPass<'_>, mesh_buffer: &MeshBuffer) {
    if mesh_buffer.index_count > 0 {
        render_pass.set_vertex_buffer(0, mesh_buffer.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh_buffer.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh_buffer.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_plane_faces_up() {
        let mut mesh = MeshBuilder::new();
        mesh.push_plane(50.0, -0.1, WHITE);
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 6);
        for v in &mesh.vertices {
            assert!((Vec3::from(v.normal) - Vec3::Y).length() < 1e-6);
            assert_eq!(v.position[1], -0.1);
        }
    }

    #[test]
    fn test_box_normals_point_outward() {
        let mut mesh = MeshBuilder::new();
        let center = Vec3::new(0.0, 2.0, 0.0);
        mesh.push_box(Mat4::IDENTITY, center, Vec3::splat(0.5), WHITE);
        assert_eq!(mesh.indices.len(), 36);
        for v in &mesh.vertices {
            let outward = Vec3::from(v.position) - center;
            assert!(Vec3::from(v.normal).dot(outward) > 0.0);
        }
    }

    #[test]
    fn test_cone_sides_point_outward() {
        let mut mesh = MeshBuilder::new();
        mesh.push_cone(Mat4::IDENTITY, Vec3::ZERO, 1.0, 2.0, 8, WHITE);
        // Side triangle then base triangle per segment
        let side = &mesh.vertices[0..3];
        let centroid = side
            .iter()
            .map(|v| Vec3::from(v.position))
            .sum::<Vec3>()
            / 3.0;
        let normal = Vec3::from(side[0].normal);
        assert!(normal.dot(Vec3::new(centroid.x, 0.0, centroid.z)) > 0.0);
        let base = Vec3::from(mesh.vertices[3].normal);
        assert!(base.y < -0.99);
    }

    #[test]
    fn test_transform_applies_to_normals() {
        let flip = Mat4::from_rotation_x(std::f32::consts::PI);
        let mut flipped = MeshBuilder::new();
        let corners = [
            Vec3::new(-0.5, 0.0, 0.5),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(0.5, 0.0, -0.5),
            Vec3::new(-0.5, 0.0, -0.5),
        ];
        flipped.push_quad(flip, corners, WHITE);
        assert!(flipped.vertices[0].normal[1] < -0.99);
    }

    #[test]
    fn test_extend_offsets_indices() {
        let mut a = MeshBuilder::new();
        a.push_plane(1.0, 0.0, WHITE);
        let mut b = MeshBuilder::new();
        b.push_plane(2.0, 1.0, WHITE);
        a.extend(&b);
        assert_eq!(a.vertices.len(), 8);
        assert_eq!(&a.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }
}
