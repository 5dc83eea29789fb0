//! Application layer: lifecycle, event handlers, and the winit window shim.
//!
//! The GPU side is reached through [`ScopeBackend`] so the handlers can be
//! driven without a window.

pub mod lifecycle;
pub mod scope;
pub mod stats;
pub mod window;

pub use lifecycle::{Lifecycle, LifecycleState};
pub use scope::ScopeApp;
pub use stats::FrameStats;
pub use window::{run, ScopeWindow};

use crate::config::ConfigError;
use crate::gpu::GpuError;
use crate::signal::SignalError;

/// Errors that can stop a scope session.
#[derive(Debug, thiserror::Error)]
pub enum ScopeError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
}

/// Rendering backend driven by [`ScopeApp`].
pub trait ScopeBackend {
    /// Clear the target and draw each trace as a line strip.
    ///
    /// Returns the number of traces drawn.
    fn render_frame(&mut self, traces: &[&[f32]]) -> Result<usize, GpuError>;

    /// Resize the render target.
    fn resize(&mut self, width: u32, height: u32);

    /// Free GPU resources. Consumes the backend, so it runs at most once.
    fn release(self);
}
