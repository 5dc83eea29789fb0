//! Phosphor trace rendering pipeline.

use super::layouts::create_trace_layout;
use wgpu::{BindGroupLayout, Device, RenderPipeline, ShaderModule, TextureFormat};

/// WGSL source of the trace shader.
pub const PHOSPHOR_SHADER: &str = include_str!("shaders/phosphor.wgsl");

/// Uniform data passed to the fragment stage.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TraceUniforms {
    pub color: [f32; 3],
    pub alpha_scale: f32,
}

/// Compile WGSL and collect every compiler message.
///
/// Problems are logged and returned; the (possibly invalid) module is
/// returned either way so startup can carry on.
pub fn compile_shader(device: &Device, label: &str, source: &str) -> (ShaderModule, Vec<String>) {
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });

    let info = pollster::block_on(module.get_compilation_info());
    let diagnostics: Vec<String> = info
        .messages
        .iter()
        .filter(|m| !matches!(m.message_type, wgpu::CompilationMessageType::Info))
        .map(|m| match &m.location {
            Some(loc) => format!("{}:{}: {}", loc.line_number, loc.line_position, m.message),
            None => m.message.clone(),
        })
        .collect();

    for message in &diagnostics {
        log::error!("Error compiling shader {label}: {message}");
    }

    (module, diagnostics)
}

/// Phosphor trace rendering pipeline.
pub struct PhosphorPipeline {
    pub pipeline: RenderPipeline,
    pub bind_group_layout: BindGroupLayout,
    diagnostics: Vec<String>,
}

impl PhosphorPipeline {
    /// Create the pipeline targeting `format`.
    pub fn new(device: &Device, format: TextureFormat) -> Self {
        let (shader, diagnostics) = compile_shader(device, "phosphor_shader", PHOSPHOR_SHADER);

        let bind_group_layout = create_trace_layout(device);

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("phosphor_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("phosphor_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                // Vertices come from the storage buffer via vertex_index
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_group_layout,
            diagnostics,
        }
    }

    /// Compiler messages reported while building the pipeline.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// True when the shader compiled without warnings or errors.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::GpuContext;

    #[test]
    fn test_uniform_layout_matches_wgsl() {
        // vec3<f32> followed by f32 packs into 16 bytes
        assert_eq!(std::mem::size_of::<TraceUniforms>(), 16);
    }

    #[test]
    fn test_shader_declares_trace_capacity() {
        assert!(PHOSPHOR_SHADER.contains("array<f32, 400>"));
        assert!(PHOSPHOR_SHADER.contains("fn vs_main"));
        assert!(PHOSPHOR_SHADER.contains("fn fs_main"));
    }

    #[tokio::test]
    async fn test_pipeline_compiles_cleanly() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return, // Skip if no GPU
        };

        let pipeline = PhosphorPipeline::new(&ctx.device, wgpu::TextureFormat::Rgba8Unorm);
        assert!(pipeline.is_clean(), "{:?}", pipeline.diagnostics());
    }

    #[tokio::test]
    async fn test_invalid_shader_reports_without_panicking() {
        let ctx = match GpuContext::new().await {
            Ok(ctx) => ctx,
            Err(_) => return,
        };

        let (_module, diagnostics) = compile_shader(&ctx.device, "broken", "fn main( {");
        assert!(!diagnostics.is_empty());
    }
}
