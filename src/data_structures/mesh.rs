//! The hexagon mesh: CPU-side vertex data and its GPU buffers.
//!
//! The hexagon is described as a triangle fan (centre first, then the rim,
//! then the first rim vertex again to close the fan). wgpu has no fan
//! topology, so the fan is expanded into an index buffer over the same
//! vertices and drawn as a triangle list.

use cgmath::{Angle, Deg, Rad};
use wgpu::util::DeviceExt;

/// A single vertex of the hexagon. Only the position is stored; colour comes
/// from the fill uniform.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: [x, y, z],
        }
    }

    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Hand-placed hexagon fan: centre, six rim vertices counter-clockwise, and
/// the first rim vertex again to close the fan.
pub const HEXAGON_FAN: [Vertex; 8] = [
    Vertex::new(0.0, 0.0, 0.0),
    Vertex::new(0.43, 0.55, 0.0),
    Vertex::new(-0.26, 0.65, 0.0),
    Vertex::new(-0.69, 0.1, 0.0),
    Vertex::new(-0.43, -0.55, 0.0),
    Vertex::new(0.26, -0.65, 0.0),
    Vertex::new(0.69, -0.1, 0.0),
    Vertex::new(0.43, 0.55, 0.0),
];

/// Expands a triangle fan over `vertex_count` vertices into triangle list
/// indices: `[0, i, i + 1]` for every `i` in `1..vertex_count - 1`.
pub fn fan_indices(vertex_count: usize) -> Vec<u32> {
    let Ok(vertex_count) = u32::try_from(vertex_count) else {
        log::warn!("{vertex_count} vertices do not fit a 32 bit index buffer");
        return Vec::new();
    };
    if vertex_count < 3 {
        return Vec::new();
    }
    (1..vertex_count - 1).flat_map(|i| [0, i, i + 1]).collect()
}

/// A polygon described as a triangle fan.
#[derive(Clone, Debug, PartialEq)]
pub struct Hexagon {
    pub vertices: Vec<Vertex>,
}

impl Default for Hexagon {
    fn default() -> Self {
        Self {
            vertices: HEXAGON_FAN.to_vec(),
        }
    }
}

impl Hexagon {
    /// A regular hexagon centred at the origin.
    ///
    /// `rotation` is the angle of the first rim vertex, measured
    /// counter-clockwise from the positive x axis.
    pub fn regular(radius: f32, rotation: Deg<f32>) -> Self {
        let rim = (0..6).map(|k| {
            let angle: Rad<f32> = (rotation + Deg(60.0 * k as f32)).into();
            let (sin, cos) = angle.sin_cos();
            Vertex::new(radius * cos, radius * sin, 0.0)
        });
        let mut vertices = Vec::with_capacity(8);
        vertices.push(Vertex::new(0.0, 0.0, 0.0));
        vertices.extend(rim);
        vertices.push(vertices[1]);
        Self { vertices }
    }

    pub fn indices(&self) -> Vec<u32> {
        fan_indices(self.vertices.len())
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len().saturating_sub(2)
    }
}

/// The hexagon uploaded to the GPU.
///
/// Buffers are created once and released when the mesh is dropped.
#[derive(Debug)]
pub struct Mesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_indices: u32,
}

impl Mesh {
    pub fn upload(device: &wgpu::Device, hexagon: &Hexagon) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hexagon Vertex Buffer"),
            contents: bytemuck::cast_slice(&hexagon.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = hexagon.indices();
        let num_indices = indices.len() as u32;
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Hexagon Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::debug!(
            "uploaded hexagon: {} vertices, {} indices",
            hexagon.vertices.len(),
            num_indices
        );
        Self {
            vertex_buffer,
            index_buffer,
            num_indices,
        }
    }
}
