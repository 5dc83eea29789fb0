//! Windowed phosphor renderer presenting to a winit surface.

use super::{
    context::{GpuContext, GpuError},
    pipeline::PhosphorPipeline,
    renderer::RenderConfig,
    uploader::TraceUploader,
};
use crate::app::ScopeBackend;
use std::sync::Arc;
use winit::window::Window;

/// Pick the surface format, preferring one without sRGB encoding.
///
/// Blending must happen on the stored values, as it does for the
/// `Rgba8Unorm` headless target, or faint traces come out far too bright.
pub fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|format| !format.is_srgb())
        .or_else(|| formats.first().copied())
}

/// Renderer drawing the traces into a window surface.
pub struct SurfaceRenderer {
    ctx: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    pipeline: PhosphorPipeline,
    uploader: TraceUploader,
    config: RenderConfig,
}

impl SurfaceRenderer {
    /// Create the surface, device and pipeline for `window`.
    pub async fn new(window: Arc<Window>, config: RenderConfig) -> Result<Self, GpuError> {
        let size = window.inner_size();
        let instance = GpuContext::create_instance();
        let surface = instance.create_surface(window)?;
        let ctx = GpuContext::for_surface(instance, &surface).await?;

        let caps = surface.get_capabilities(&ctx.adapter);
        let format = pick_surface_format(&caps.formats).ok_or(GpuError::UnsupportedSurface)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&ctx.device, &surface_config);

        let pipeline = PhosphorPipeline::new(&ctx.device, format);
        let uploader = TraceUploader::new(
            &ctx.device,
            &ctx.queue,
            &pipeline,
            config.traces_per_frame,
            config.uniforms(),
        );

        log::info!(
            "Surface ready: {}x{} {:?} on {}",
            surface_config.width,
            surface_config.height,
            format,
            ctx.adapter_info().name
        );

        Ok(Self {
            ctx,
            surface,
            surface_config,
            pipeline,
            uploader,
            config,
        })
    }

    /// Get GPU adapter info.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }

    fn reconfigure(&self) {
        self.surface.configure(&self.ctx.device, &self.surface_config);
    }
}

impl ScopeBackend for SurfaceRenderer {
    fn render_frame(&mut self, traces: &[&[f32]]) -> Result<usize, GpuError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.reconfigure();
                return Ok(0);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Timed out acquiring surface texture, skipping frame");
                return Ok(0);
            }
            Err(error) => return Err(error.into()),
        };

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        let drawn = self.uploader.encode_frame(
            &self.ctx.queue,
            &mut encoder,
            &view,
            &self.pipeline,
            traces,
            self.config.clear_color(),
        );

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        Ok(drawn)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.reconfigure();
    }

    fn release(self) {
        log::info!("Releasing GPU resources");
        self.uploader.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn test_pick_surface_format_prefers_linear() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(pick_surface_format(&formats), Some(TextureFormat::Bgra8Unorm));
    }

    #[test]
    fn test_pick_surface_format_falls_back_to_first() {
        let formats = [TextureFormat::Rgba8UnormSrgb, TextureFormat::Bgra8UnormSrgb];
        assert_eq!(
            pick_surface_format(&formats),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }
}
