//! Selection of the sample windows drawn each frame.
//!
//! Every offset handed out leaves room for a full trace plus the shader's
//! forward-difference lookahead, so `offset + TRACE_SPAN <= len` always holds.

use crate::gpu::{TRACE_LEN, TRACE_SPAN};
use rand::Rng;

/// Number of trace-aligned bases a sweep starts from.
pub const SWEEP_BASE_SLOTS: usize = 800;

/// Errors that can occur when building a [`WindowSelector`].
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Signal of {len} samples cannot hold a {span}-sample window")]
    TooShort { len: usize, span: usize },
    #[error("Sweep of {traces} traces needs {needed} samples, signal has {len}")]
    SweepTooLong {
        traces: usize,
        needed: usize,
        len: usize,
    },
}

/// How offsets are chosen within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowStrategy {
    /// Every trace starts at an independent uniformly random offset.
    #[default]
    Random,
    /// One random trace-aligned base per frame; traces then walk consecutive windows.
    Sweep,
}

impl WindowStrategy {
    /// Get the strategy name.
    pub fn name(&self) -> &'static str {
        match self {
            WindowStrategy::Random => "random",
            WindowStrategy::Sweep => "sweep",
        }
    }
}

/// Picks in-bounds window offsets over a sample buffer of fixed length.
#[derive(Debug, Clone)]
pub struct WindowSelector {
    strategy: WindowStrategy,
    traces_per_frame: usize,
    max_offset: usize,
    sweep_slots: usize,
}

impl WindowSelector {
    /// Create a selector for a buffer of `len` samples.
    pub fn new(
        len: usize,
        traces_per_frame: usize,
        strategy: WindowStrategy,
    ) -> Result<Self, SignalError> {
        if len < TRACE_SPAN {
            return Err(SignalError::TooShort {
                len,
                span: TRACE_SPAN,
            });
        }
        let max_offset = len - TRACE_SPAN;

        let sweep_slots = match strategy {
            WindowStrategy::Random => 0,
            WindowStrategy::Sweep => {
                // Last trace of the sweep starts (traces - 1) windows after the base
                let sweep_len = traces_per_frame.saturating_sub(1) * TRACE_LEN;
                if sweep_len > max_offset {
                    return Err(SignalError::SweepTooLong {
                        traces: traces_per_frame,
                        needed: sweep_len + TRACE_SPAN,
                        len,
                    });
                }
                ((max_offset - sweep_len) / TRACE_LEN + 1).min(SWEEP_BASE_SLOTS)
            }
        };

        Ok(Self {
            strategy,
            traces_per_frame,
            max_offset,
            sweep_slots,
        })
    }

    pub fn strategy(&self) -> WindowStrategy {
        self.strategy
    }

    pub fn traces_per_frame(&self) -> usize {
        self.traces_per_frame
    }

    /// Largest offset that can be returned.
    pub fn max_offset(&self) -> usize {
        self.max_offset
    }

    /// Uniformly random offset in `0..=max_offset`.
    pub fn random_offset<R: Rng>(&self, rng: &mut R) -> usize {
        rng.gen_range(0..=self.max_offset)
    }

    /// Offsets for every trace of one frame.
    pub fn frame_offsets<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        match self.strategy {
            WindowStrategy::Random => (0..self.traces_per_frame)
                .map(|_| self.random_offset(rng))
                .collect(),
            WindowStrategy::Sweep => {
                let base = rng.gen_range(0..self.sweep_slots) * TRACE_LEN;
                (0..self.traces_per_frame)
                    .map(|i| base + i * TRACE_LEN)
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_short_buffer() {
        let result = WindowSelector::new(TRACE_SPAN - 1, 1, WindowStrategy::Random);
        assert!(matches!(result, Err(SignalError::TooShort { .. })));
    }

    #[test]
    fn test_exact_fit_only_offers_zero() {
        let selector = WindowSelector::new(TRACE_SPAN, 4, WindowStrategy::Random).unwrap();
        assert_eq!(selector.max_offset(), 0);

        let mut rng = StdRng::seed_from_u64(3);
        assert!(selector.frame_offsets(&mut rng).iter().all(|&o| o == 0));
    }

    #[test]
    fn test_random_offsets_stay_in_bounds() {
        let len = 10_000;
        let selector = WindowSelector::new(len, 500, WindowStrategy::Random).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            let offsets = selector.frame_offsets(&mut rng);
            assert_eq!(offsets.len(), 500);
            assert!(offsets.iter().all(|&o| o + TRACE_SPAN <= len));
        }
    }

    #[test]
    fn test_sweep_is_aligned_and_consecutive() {
        let len = 2_097_152;
        let selector = WindowSelector::new(len, 500, WindowStrategy::Sweep).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let offsets = selector.frame_offsets(&mut rng);
        assert_eq!(offsets[0] % TRACE_LEN, 0);
        for pair in offsets.windows(2) {
            assert_eq!(pair[1] - pair[0], TRACE_LEN);
        }
        assert!(offsets.last().unwrap() + TRACE_SPAN <= len);
    }

    #[test]
    fn test_sweep_base_limited_to_slot_range() {
        let selector = WindowSelector::new(2_097_152, 500, WindowStrategy::Sweep).unwrap();
        assert_eq!(selector.strategy(), WindowStrategy::Sweep);
        assert_eq!(selector.traces_per_frame(), 500);

        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let base = selector.frame_offsets(&mut rng)[0];
            assert_eq!(base % TRACE_LEN, 0);
            assert!(base < SWEEP_BASE_SLOTS * TRACE_LEN);
        }
    }

    #[test]
    fn test_sweep_on_small_buffer_uses_fitting_slots() {
        // Room for exactly two bases: 0 and TRACE_LEN
        let len = TRACE_LEN * 3 + TRACE_SPAN;
        let selector = WindowSelector::new(len, 3, WindowStrategy::Sweep).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            let offsets = selector.frame_offsets(&mut rng);
            assert!(offsets[0] <= TRACE_LEN);
            assert!(offsets.last().unwrap() + TRACE_SPAN <= len);
        }
    }

    #[test]
    fn test_sweep_rejects_too_many_traces() {
        let result = WindowSelector::new(TRACE_LEN * 10, 11, WindowStrategy::Sweep);
        assert!(matches!(result, Err(SignalError::SweepTooLong { .. })));
    }
}
