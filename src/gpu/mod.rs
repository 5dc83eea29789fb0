//! GPU rendering using wgpu.
//!
//! Provides the phosphor trace pipeline, the per-frame uploader, and two
//! renderers on top of them: one presenting to a window surface and one
//! rendering offscreen for tests and benchmarks.

pub mod context;
pub mod layouts;
pub mod pipeline;
pub mod renderer;
pub mod surface;
pub mod uploader;

pub use context::{GpuContext, GpuError};
pub use pipeline::{PhosphorPipeline, TraceUniforms};
pub use renderer::{HeadlessRenderer, RenderConfig};
pub use surface::SurfaceRenderer;
pub use uploader::TraceUploader;

/// Samples per trace; must match the storage array declared in the shader.
pub const TRACE_LEN: usize = 400;
/// Extra samples the vertex shader reads past each vertex.
pub const TRACE_LOOKAHEAD: usize = 3;
/// Vertices drawn per trace.
pub const TRACE_VERTICES: usize = TRACE_LEN - TRACE_LOOKAHEAD;
/// Samples a window must have available in the source buffer.
pub const TRACE_SPAN: usize = TRACE_LEN + TRACE_LOOKAHEAD;
