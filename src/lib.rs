//! Phosphor Scope
//!
//! Digital phosphor oscilloscope demo rendering a synthetic signal with wgpu.
//!
//! # Features
//!
//! - Amplitude-modulated test signal with uniform noise, generated once
//! - Random or sweeping selection of 400-sample windows
//! - Hundreds of alpha-blended line strips per frame for a persistence glow
//! - Brightness driven by local signal speed in the vertex shader
//! - Windowed rendering via winit, headless rendering for tests

pub mod app;
pub mod config;
pub mod gpu;
pub mod signal;

// Re-export commonly used types
pub use app::{run, Lifecycle, LifecycleState, ScopeApp, ScopeBackend, ScopeError};
pub use config::{ConfigError, ScopeConfig};
pub use gpu::{
    GpuContext, GpuError, HeadlessRenderer, PhosphorPipeline, RenderConfig, SurfaceRenderer,
    TRACE_LEN, TRACE_LOOKAHEAD, TRACE_SPAN, TRACE_VERTICES,
};
pub use signal::{
    generate_phosphor_signal, SampleBuffer, SignalError, WindowSelector, WindowStrategy,
};
