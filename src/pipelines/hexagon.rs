use wgpu::util::DeviceExt;

use crate::{
    colour::Colour,
    data_structures::mesh::Vertex,
    shader::{self, CompiledShader, ShaderSources},
};

/// Uniform shared by both hexagon shader stages.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FillUniform {
    pub colour: [f32; 4],
    pub clip_w: f32,
    // WGSL rounds the struct up to 16 byte alignment
    pub _padding: [f32; 3],
}

impl FillUniform {
    pub fn new(colour: Colour, clip_w: f32, format: wgpu::TextureFormat) -> Self {
        Self {
            colour: colour.for_format(format).to_array(),
            clip_w,
            _padding: [0.0; 3],
        }
    }
}

/// GPU side of the fill uniform: the buffer and the bind group exposing it.
#[derive(Debug)]
pub struct FillResources {
    pub uniform: FillUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub bind_group: wgpu::BindGroup,
}

impl FillResources {
    pub fn new(device: &wgpu::Device, uniform: FillUniform) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Fill Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
            label: Some("fill_bind_group_layout"),
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("fill_bind_group"),
        });

        Self {
            uniform,
            buffer,
            bind_group_layout,
            bind_group,
        }
    }
}

/// Compiles both hexagon stages, links them and builds the pipeline.
///
/// `None` means there is no usable program and the caller should keep going
/// without drawing the hexagon.
pub fn mk_hexagon_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    fill_bind_group_layout: &wgpu::BindGroupLayout,
    sources: &ShaderSources,
) -> Option<wgpu::RenderPipeline> {
    let (vertex, fragment) = shader::build_program(sources)?;

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Hexagon Pipeline Layout"),
        bind_group_layouts: &[fill_bind_group_layout],
        immediate_size: 0,
    });

    Some(mk_render_pipeline(
        device,
        &layout,
        format,
        Some(wgpu::BlendState::REPLACE),
        &[Vertex::desc()],
        &vertex,
        &fragment,
    ))
}

pub fn mk_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    color_format: wgpu::TextureFormat,
    blend: Option<wgpu::BlendState>,
    vertex_layouts: &[wgpu::VertexBufferLayout],
    vertex: &CompiledShader,
    fragment: &CompiledShader,
) -> wgpu::RenderPipeline {
    let vertex_module = vertex.create_module(device);
    let fragment_module = fragment.create_module(device);

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        cache: None,
        label: Some("Hexagon Render Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: &vertex_module,
            entry_point: Some(vertex.stage.entry_point()),
            buffers: vertex_layouts,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: Some(fragment.stage.entry_point()),
            targets: &[Some(wgpu::ColorTargetState {
                format: color_format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // GL draws both faces unless told otherwise
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState {
            count: 1,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview_mask: None,
    })
}
