//! Application context shared by the load, update, render, key and close handlers.

use super::lifecycle::{Lifecycle, LifecycleState};
use super::stats::FrameStats;
use super::{ScopeBackend, ScopeError};
use crate::config::ScopeConfig;
use crate::gpu::{GpuError, TRACE_LEN};
use crate::signal::{SampleBuffer, WindowSelector};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use winit::keyboard::{Key, NamedKey};

/// State of one scope session.
///
/// Owns the sample buffer, the window selector and RNG, the lifecycle, and
/// the backend once it has been loaded.
pub struct ScopeApp<B: ScopeBackend> {
    config: ScopeConfig,
    signal: SampleBuffer,
    selector: WindowSelector,
    rng: StdRng,
    lifecycle: Lifecycle,
    backend: Option<B>,
    stats: FrameStats,
}

impl<B: ScopeBackend> ScopeApp<B> {
    /// Validate `config` and generate the sample buffer.
    pub fn new(config: ScopeConfig) -> Result<Self, ScopeError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let signal = SampleBuffer::generate(config.sample_count, config.noise_amplitude, &mut rng);
        let selector = WindowSelector::new(signal.len(), config.traces_per_frame, config.strategy)?;

        log::info!(
            "Generated {} samples, drawing {} traces per frame ({} windows)",
            signal.len(),
            selector.traces_per_frame(),
            selector.strategy().name()
        );

        Ok(Self {
            config,
            signal,
            selector,
            rng,
            lifecycle: Lifecycle::new(),
            backend: None,
            stats: FrameStats::default(),
        })
    }

    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    pub fn signal(&self) -> &SampleBuffer {
        &self.signal
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Take ownership of a freshly created backend.
    ///
    /// A backend offered after the first load is released immediately.
    pub fn on_load(&mut self, backend: B) {
        if !self.lifecycle.load() {
            log::warn!("Ignoring load in state {:?}", self.lifecycle.state());
            backend.release();
            return;
        }
        self.backend = Some(backend);
    }

    /// Per-frame bookkeeping, called before [`Self::on_render`].
    pub fn on_update(&mut self, elapsed: Duration) {
        if !self.lifecycle.is_running() {
            return;
        }
        if let Some(fps) = self.stats.record(elapsed) {
            log::debug!("{fps:.1} fps after {} frames", self.stats.total_frames());
        }
    }

    /// Draw one frame. Returns the number of traces drawn.
    pub fn on_render(&mut self) -> Result<usize, GpuError> {
        if !self.lifecycle.begin_frame() {
            return Ok(0);
        }
        let Some(backend) = self.backend.as_mut() else {
            return Ok(0);
        };

        let offsets = self.selector.frame_offsets(&mut self.rng);
        let traces: Vec<&[f32]> = offsets
            .iter()
            .filter_map(|&offset| self.signal.window(offset, TRACE_LEN))
            .collect();

        backend.render_frame(&traces)
    }

    pub fn on_resize(&mut self, width: u32, height: u32) {
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(width, height);
        }
    }

    /// Handle a key press. Returns true if the window should close now.
    pub fn on_key_down(&mut self, key: &Key) -> bool {
        match key {
            Key::Named(NamedKey::Escape) => self.request_close(),
            _ => false,
        }
    }

    /// Ask for the window to close. Returns true only for the first request.
    pub fn request_close(&mut self) -> bool {
        let first = self.lifecycle.request_close();
        if first {
            log::info!("Close requested");
        }
        first
    }

    /// Release the backend. Only the first call has any effect.
    pub fn on_close(&mut self) {
        if !self.lifecycle.close() {
            return;
        }
        if let Some(backend) = self.backend.take() {
            backend.release();
        }
    }
}

impl<B: ScopeBackend> Drop for ScopeApp<B> {
    fn drop(&mut self) {
        self.on_close();
    }
}
