//! Per-frame trace upload and draw encoding.
//!
//! All windows of a frame are staged with one `write_buffer` each, then every
//! draw is preceded by a copy of its window into the fixed 400-float storage
//! buffer the shader reads. Copies and passes share one encoder, so each draw
//! sees exactly its own window.

use super::pipeline::{PhosphorPipeline, TraceUniforms};
use super::{TRACE_LEN, TRACE_VERTICES};
use wgpu::{BindGroup, Buffer, CommandEncoder, Device, Queue, TextureView};

const TRACE_BYTES: u64 = (TRACE_LEN * std::mem::size_of::<f32>()) as u64;

/// GPU buffers backing the trace draws.
pub struct TraceUploader {
    storage_buffer: Buffer,
    staging_buffer: Buffer,
    uniform_buffer: Buffer,
    bind_group: BindGroup,
    capacity: usize,
}

impl TraceUploader {
    /// Allocate buffers for up to `capacity` traces per frame.
    pub fn new(
        device: &Device,
        queue: &Queue,
        pipeline: &PhosphorPipeline,
        capacity: usize,
        uniforms: TraceUniforms,
    ) -> Self {
        let storage_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trace_samples"),
            size: TRACE_BYTES,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trace_staging"),
            size: TRACE_BYTES * capacity.max(1) as u64,
            usage: wgpu::BufferUsages::COPY_SRC | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("trace_uniforms"),
            size: std::mem::size_of::<TraceUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("trace_bind_group"),
            layout: &pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: storage_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        Self {
            storage_buffer,
            staging_buffer,
            uniform_buffer,
            bind_group,
            capacity,
        }
    }

    /// Encode one frame: clear `target`, then draw each trace on top.
    ///
    /// Returns the number of traces drawn. Traces beyond the capacity or
    /// shorter than a full window are skipped.
    pub fn encode_frame(
        &self,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        target: &TextureView,
        pipeline: &PhosphorPipeline,
        traces: &[&[f32]],
        background: wgpu::Color,
    ) -> usize {
        if traces.len() > self.capacity {
            log::warn!(
                "Dropping {} traces over capacity {}",
                traces.len() - self.capacity,
                self.capacity
            );
        }

        let mut staged = 0u64;
        for trace in traces.iter().take(self.capacity) {
            let Some(window) = trace.get(..TRACE_LEN) else {
                log::warn!("Skipping short trace of {} samples", trace.len());
                continue;
            };
            // The window is only borrowed for the duration of this call
            queue.write_buffer(
                &self.staging_buffer,
                staged * TRACE_BYTES,
                bytemuck::cast_slice(window),
            );
            staged += 1;
        }

        {
            let _clear_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("phosphor_clear_pass"),
                color_attachments: &[Some(color_attachment(
                    target,
                    wgpu::LoadOp::Clear(background),
                ))],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        for index in 0..staged {
            encoder.copy_buffer_to_buffer(
                &self.staging_buffer,
                index * TRACE_BYTES,
                &self.storage_buffer,
                0,
                TRACE_BYTES,
            );

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("phosphor_trace_pass"),
                color_attachments: &[Some(color_attachment(target, wgpu::LoadOp::Load))],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            render_pass.set_pipeline(&pipeline.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..TRACE_VERTICES as u32, 0..1);
        }

        staged as usize
    }

    /// Free the GPU memory held by the buffers.
    pub fn destroy(&self) {
        self.storage_buffer.destroy();
        self.staging_buffer.destroy();
        self.uniform_buffer.destroy();
    }
}

fn color_attachment(
    view: &TextureView,
    load: wgpu::LoadOp<wgpu::Color>,
) -> wgpu::RenderPassColorAttachment<'_> {
    wgpu::RenderPassColorAttachment {
        view,
        resolve_target: None,
        depth_slice: None,
        ops: wgpu::Operations {
            load,
            store: wgpu::StoreOp::Store,
        },
    }
}
