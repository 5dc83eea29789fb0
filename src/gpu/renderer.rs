//! Headless phosphor renderer.
//!
//! Renders frames into an offscreen texture and reads the pixels back. Used
//! for smoke tests and benchmarks where no window exists.

use super::{
    context::{GpuContext, GpuError},
    pipeline::{PhosphorPipeline, TraceUniforms},
    uploader::TraceUploader,
};
use crate::config::ScopeConfig;
use wgpu::{Texture, TextureDescriptor, TextureView};

/// Configuration for rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub color: [f32; 3],
    pub background: [f32; 3],
    pub width: u32,
    pub height: u32,
    pub traces_per_frame: usize,
    pub alpha_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from(&ScopeConfig::default())
    }
}

impl From<&ScopeConfig> for RenderConfig {
    fn from(config: &ScopeConfig) -> Self {
        Self {
            color: config.color,
            background: config.background,
            width: config.width,
            height: config.height,
            traces_per_frame: config.traces_per_frame,
            alpha_scale: config.alpha_scale,
        }
    }
}

impl RenderConfig {
    pub fn uniforms(&self) -> TraceUniforms {
        TraceUniforms {
            color: self.color,
            alpha_scale: self.alpha_scale,
        }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        wgpu::Color {
            r: self.background[0] as f64,
            g: self.background[1] as f64,
            b: self.background[2] as f64,
            a: 1.0,
        }
    }
}

/// Headless phosphor renderer.
pub struct HeadlessRenderer {
    ctx: GpuContext,
    pipeline: PhosphorPipeline,
    uploader: TraceUploader,
    render_texture: Texture,
    render_view: TextureView,
    config: RenderConfig,
}

impl HeadlessRenderer {
    /// Create a new renderer with the given configuration.
    pub async fn new(config: RenderConfig) -> Result<Self, GpuError> {
        let ctx = GpuContext::new().await?;
        let format = wgpu::TextureFormat::Rgba8Unorm;

        let pipeline = PhosphorPipeline::new(&ctx.device, format);
        let uploader = TraceUploader::new(
            &ctx.device,
            &ctx.queue,
            &pipeline,
            config.traces_per_frame,
            config.uniforms(),
        );

        let render_texture = ctx.device.create_texture(&TextureDescriptor {
            label: Some("render_target"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });

        let render_view = render_texture.create_view(&wgpu::TextureViewDescriptor::default());

        Ok(Self {
            ctx,
            pipeline,
            uploader,
            render_texture,
            render_view,
            config,
        })
    }

    /// Render one frame of traces.
    ///
    /// Returns RGBA pixel data.
    pub fn render_frame(&self, traces: &[&[f32]]) -> Result<Vec<u8>, GpuError> {
        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        self.uploader.encode_frame(
            &self.ctx.queue,
            &mut encoder,
            &self.render_view,
            &self.pipeline,
            traces,
            self.config.clear_color(),
        );

        // Copy texture to buffer for readback
        let bytes_per_pixel = 4u32;
        let unpadded_row_bytes = self.config.width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_row_bytes = unpadded_row_bytes.div_ceil(align) * align;
        let buffer_size = (padded_row_bytes * self.config.height) as u64;

        let readback_buffer = self.ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback_buffer"),
            size: buffer_size,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.render_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &readback_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row_bytes),
                    rows_per_image: Some(self.config.height),
                },
            },
            wgpu::Extent3d {
                width: self.config.width,
                height: self.config.height,
                depth_or_array_layers: 1,
            },
        );

        self.ctx.queue.submit(std::iter::once(encoder.finish()));

        // Read back pixels
        let buffer_slice = readback_buffer.slice(..);
        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.ctx
            .device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| GpuError::Readback(e.to_string()))?;
        receiver
            .recv()
            .map_err(|e| GpuError::Readback(e.to_string()))?
            .map_err(|e| GpuError::Readback(e.to_string()))?;

        let data = buffer_slice.get_mapped_range();

        // Remove row padding if present
        let mut pixels = Vec::with_capacity((self.config.width * self.config.height * 4) as usize);
        for row in 0..self.config.height {
            let start = (row * padded_row_bytes) as usize;
            let end = start + unpadded_row_bytes as usize;
            pixels.extend_from_slice(&data[start..end]);
        }

        Ok(pixels)
    }

    /// Get the render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Shader diagnostics gathered at creation.
    pub fn diagnostics(&self) -> &[String] {
        self.pipeline.diagnostics()
    }

    /// Get GPU adapter info.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }
}

impl Drop for HeadlessRenderer {
    fn drop(&mut self) {
        self.uploader.destroy();
        self.render_texture.destroy();
    }
}
