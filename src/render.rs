//! Drawing the hexagon.
//!
//! [`Scene`] owns every GPU resource created for the hexagon (mesh, fill
//! uniform, pipeline). They are created once on start-up and dropped together
//! on exit. A scene does not care whether it renders into a window surface or
//! an offscreen texture; callers hand it a view and an encoder.

use crate::{
    colour::Colour,
    data_structures::mesh::Mesh,
    pipelines::hexagon::{FillResources, FillUniform, mk_hexagon_pipeline},
    settings::Settings,
};

#[derive(Debug)]
pub struct Scene {
    pub mesh: Mesh,
    pub fill: FillResources,
    /// `None` when the shaders failed to compile or link.
    pub pipeline: Option<wgpu::RenderPipeline>,
    format: wgpu::TextureFormat,
}

impl Scene {
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, settings: &Settings) -> Self {
        let mesh = Mesh::upload(device, &settings.mesh);
        let fill = FillResources::new(
            device,
            FillUniform::new(settings.fill_colour, settings.clip_w, format),
        );
        let pipeline =
            mk_hexagon_pipeline(device, format, &fill.bind_group_layout, &settings.shaders);
        if pipeline.is_none() {
            log::warn!("no shader program, frames will only be cleared");
        }
        Self {
            mesh,
            fill,
            pipeline,
            format,
        }
    }

    /// Records the clear and the hexagon draw into `encoder`.
    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_colour: Colour,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Hexagon Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_colour.to_wgpu(self.format)),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
            multiview_mask: None,
        });

        let Some(pipeline) = &self.pipeline else {
            return;
        };
        if self.mesh.num_indices == 0 {
            log::warn!("you attempted to render a mesh without triangles");
            return;
        }
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, &self.fill.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.mesh.num_indices, 0, 0..1);
    }
}

/// What the event loop should do after failing to acquire a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Configure the surface again and carry on with the next frame.
    Reconfigure,
    /// Drop this frame.
    SkipFrame,
    /// Give up and close the application.
    Fatal,
}

pub fn surface_error_action(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigure,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
    }
}
