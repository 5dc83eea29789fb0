//! Synthetic signal generation.
//!
//! Produces the amplitude-modulated test tone drawn by the scope: a fast sine
//! (period 41 samples) multiplied by a slow sine (period 200 samples), with a
//! small amount of uniform noise on top.

use rand::Rng;
use std::f64::consts::TAU;

/// Period of the carrier sine, in samples.
pub const CARRIER_PERIOD: f64 = 41.0;
/// Period of the modulating sine, in samples.
pub const ENVELOPE_PERIOD: f64 = 200.0;

/// Generate the phosphor test signal.
///
/// # Arguments
/// * `len` - Number of samples
/// * `noise_amplitude` - Noise is drawn uniformly from `[-noise_amplitude, noise_amplitude)`
/// * `rng` - Source of the noise term
pub fn generate_phosphor_signal<R: Rng>(
    len: usize,
    noise_amplitude: f32,
    rng: &mut R,
) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            let carrier = (t / CARRIER_PERIOD * TAU).sin();
            let envelope = (t / ENVELOPE_PERIOD * TAU).sin();
            let noise = if noise_amplitude > 0.0 {
                rng.gen_range(-noise_amplitude..noise_amplitude)
            } else {
                0.0
            };
            (carrier * envelope) as f32 + noise
        })
        .collect()
}

/// Immutable sample buffer generated once at startup.
///
/// Hands out borrowed windows for upload; never mutated after construction.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    samples: Box<[f32]>,
}

impl SampleBuffer {
    /// Generate a new buffer of `len` samples.
    pub fn generate<R: Rng>(len: usize, noise_amplitude: f32, rng: &mut R) -> Self {
        Self::from_samples(generate_phosphor_signal(len, noise_amplitude, rng))
    }

    /// Wrap existing samples.
    pub fn from_samples(samples: Vec<f32>) -> Self {
        Self {
            samples: samples.into_boxed_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Borrow `len` samples starting at `offset`, or `None` if that runs past the end.
    pub fn window(&self, offset: usize, len: usize) -> Option<&[f32]> {
        let end = offset.checked_add(len)?;
        self.samples.get(offset..end)
    }
}
