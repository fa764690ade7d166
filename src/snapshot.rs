//! Offscreen rendering of a single frame.
//!
//! Used by the golden image tests: the scene is drawn exactly as in the window
//! but into a texture, which is then copied back to the CPU as an image.

use std::time::Duration;

use anyhow::{Context as _, anyhow};

use crate::{
    context::{mk_instance, request_gpu},
    render::Scene,
    settings::Settings,
};

/// Format of the offscreen target. sRGB, like the surface format preferred on screen.
pub const SNAPSHOT_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// Bytes per row of the readback buffer; copies need rows aligned to
/// `COPY_BYTES_PER_ROW_ALIGNMENT`.
///
/// `None` when a row of `width` pixels does not fit in a `u32`.
pub fn padded_bytes_per_row(width: u32) -> Option<u32> {
    let unpadded = width.checked_mul(4)?;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align).checked_mul(align)
}

/// Strips the row padding from a readback buffer.
pub fn unpad_rows(data: &[u8], bytes_per_row: u32, width: u32, height: u32) -> Vec<u8> {
    let padded = bytes_per_row as usize;
    let unpadded = width as usize * 4;
    data.chunks(padded)
        .take(height as usize)
        .flat_map(|row| &row[..unpadded])
        .copied()
        .collect()
}

/// Renders one frame of the hexagon without a window.
pub async fn snapshot(settings: &Settings) -> anyhow::Result<image::RgbaImage> {
    let (width, height) = (settings.width, settings.height);
    anyhow::ensure!(width > 0 && height > 0, "snapshot size must be non-zero");
    let bytes_per_row = padded_bytes_per_row(width)
        .with_context(|| format!("snapshot width {width} is too large"))?;

    let instance = mk_instance();
    let (_adapter, device, queue) = request_gpu(&instance, None).await?;
    let max_side = device.limits().max_texture_dimension_2d;
    anyhow::ensure!(
        width <= max_side && height <= max_side,
        "snapshot size {width}x{height} exceeds the device limit of {max_side}"
    );
    let scene = Scene::new(&device, SNAPSHOT_FORMAT, settings);

    let extent = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Snapshot Texture"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: SNAPSHOT_FORMAT,
        usage: wgpu::TextureUsages::COPY_SRC | wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Snapshot Readback Buffer"),
        size: bytes_per_row as wgpu::BufferAddress * height as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Snapshot Encoder"),
    });
    scene.draw(&mut encoder, &view, settings.clear_colour);
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &output_buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(bytes_per_row),
                rows_per_image: Some(height),
            },
        },
        extent,
    );
    queue.submit(std::iter::once(encoder.finish()));

    let (tx, rx) = futures_intrusive::channel::shared::oneshot_channel();
    let buffer_slice = output_buffer.slice(..);
    buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::Wait {
            submission_index: None,
            timeout: Some(Duration::from_secs(3)),
        })
        .map_err(|e| anyhow!("waiting for the GPU failed: {e}"))?;
    rx.receive()
        .await
        .context("readback callback was dropped")?
        .map_err(|e| anyhow!("failed to map the readback buffer: {e}"))?;

    let pixels = {
        let data = buffer_slice.get_mapped_range();
        unpad_rows(&data, bytes_per_row, width, height)
    };
    output_buffer.unmap();

    image::RgbaImage::from_raw(width, height, pixels)
        .context("readback buffer does not match the snapshot size")
}

/// [`snapshot`] driven to completion on a fresh tokio runtime.
#[cfg(not(target_arch = "wasm32"))]
pub fn snapshot_blocking(settings: &Settings) -> anyhow::Result<image::RgbaImage> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(snapshot(settings))
}
