//! Bind group layout builders for GPU pipelines.

use wgpu::{BindGroupLayout, BindGroupLayoutEntry, BufferBindingType, Device, ShaderStages};

/// Builder for creating bind group layouts from buffer entries.
pub struct BindGroupLayoutBuilder {
    label: Option<&'static str>,
    entries: Vec<BindGroupLayoutEntry>,
}

impl BindGroupLayoutBuilder {
    /// Create a new bind group layout builder.
    pub fn new(label: &'static str) -> Self {
        Self {
            label: Some(label),
            entries: Vec::new(),
        }
    }

    /// Add a uniform buffer entry.
    pub fn uniform(self, binding: u32, visibility: ShaderStages) -> Self {
        self.buffer(binding, visibility, BufferBindingType::Uniform)
    }

    /// Add a read-only storage buffer entry.
    pub fn storage_read(self, binding: u32, visibility: ShaderStages) -> Self {
        self.buffer(
            binding,
            visibility,
            BufferBindingType::Storage { read_only: true },
        )
    }

    fn buffer(mut self, binding: u32, visibility: ShaderStages, ty: BufferBindingType) -> Self {
        self.entries.push(BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        });
        self
    }

    /// Build the bind group layout.
    pub fn build(self, device: &Device) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: self.label,
            entries: &self.entries,
        })
    }
}

/// Create the trace bind group layout (sample storage buffer, trace uniforms).
pub fn create_trace_layout(device: &Device) -> BindGroupLayout {
    BindGroupLayoutBuilder::new("trace_bind_group_layout")
        .storage_read(0, ShaderStages::VERTEX)
        .uniform(1, ShaderStages::FRAGMENT)
        .build(device)
}
