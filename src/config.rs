//! Runtime configuration for the phosphor scope.

use crate::gpu::TRACE_SPAN;
use crate::signal::WindowStrategy;

/// Errors reported by [`ScopeConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Window size must be non-zero, got {width}x{height}")]
    EmptyWindow { width: u32, height: u32 },
    #[error("Signal needs at least {needed} samples, got {got}")]
    SignalTooShort { needed: usize, got: usize },
    #[error("At least one trace must be drawn per frame")]
    NoTraces,
    #[error("Noise amplitude must be finite and non-negative, got {0}")]
    InvalidNoise(f32),
    #[error("Alpha scale must be finite and positive, got {0}")]
    InvalidAlphaScale(f32),
}

/// Configuration for a phosphor scope session.
#[derive(Debug, Clone)]
pub struct ScopeConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Length of the synthetic sample buffer.
    pub sample_count: usize,
    /// Traces drawn on top of each other every frame.
    pub traces_per_frame: usize,
    /// Half-width of the uniform noise added to the signal.
    pub noise_amplitude: f32,
    pub color: [f32; 3],
    pub background: [f32; 3],
    /// Divisor applied to the local path length when computing trace alpha.
    pub alpha_scale: f32,
    pub strategy: WindowStrategy,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            title: "Digital phosphor".to_string(),
            width: 1280,
            height: 720,
            sample_count: 1024 * 1024 * 2,
            traces_per_frame: 500,
            noise_amplitude: 0.025,
            color: [1.0, 1.0, 0.0],
            background: [0.0, 0.0, 0.0],
            alpha_scale: 120.0,
            strategy: WindowStrategy::Random,
            seed: None,
        }
    }
}

impl ScopeConfig {
    /// Check the configuration before any window or GPU object is created.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyWindow {
                width: self.width,
                height: self.height,
            });
        }
        if self.sample_count < TRACE_SPAN {
            return Err(ConfigError::SignalTooShort {
                needed: TRACE_SPAN,
                got: self.sample_count,
            });
        }
        if self.traces_per_frame == 0 {
            return Err(ConfigError::NoTraces);
        }
        if !self.noise_amplitude.is_finite() || self.noise_amplitude < 0.0 {
            return Err(ConfigError::InvalidNoise(self.noise_amplitude));
        }
        if !self.alpha_scale.is_finite() || self.alpha_scale <= 0.0 {
            return Err(ConfigError::InvalidAlphaScale(self.alpha_scale));
        }
        Ok(())
    }
}
