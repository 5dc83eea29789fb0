//! Integration tests for signal generation and window selection.

use phosphor_scope::signal::{SampleBuffer, WindowSelector, WindowStrategy};
use phosphor_scope::{ScopeConfig, TRACE_LEN, TRACE_SPAN};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn default_buffer(seed: u64) -> SampleBuffer {
    let config = ScopeConfig::default();
    SampleBuffer::generate(
        config.sample_count,
        config.noise_amplitude,
        &mut StdRng::seed_from_u64(seed),
    )
}

#[test]
fn test_default_buffer_length_and_bounds() {
    let buffer = default_buffer(1);
    assert_eq!(buffer.len(), 1 << 21);

    // |sin * sin| <= 1, plus at most the noise amplitude
    let peak = buffer
        .as_slice()
        .iter()
        .map(|s| s.abs())
        .fold(0.0f32, f32::max);
    assert!(peak <= 1.025 + 1e-6, "peak = {}", peak);
    assert!(peak > 0.9, "Modulated tone should reach near full scale, peak = {}", peak);

    assert!(buffer.as_slice().iter().all(|s| s.is_finite()));
}

#[test]
fn test_default_buffer_is_centered() {
    let buffer = default_buffer(2);
    let mean: f64 =
        buffer.as_slice().iter().map(|&s| s as f64).sum::<f64>() / buffer.len() as f64;
    assert!(mean.abs() < 0.01, "mean = {}", mean);
}

#[test]
fn test_random_windows_never_read_out_of_bounds() {
    let buffer = default_buffer(3);
    let selector = WindowSelector::new(buffer.len(), 500, WindowStrategy::Random).unwrap();
    let mut rng = StdRng::seed_from_u64(4);

    for _ in 0..50 {
        for offset in selector.frame_offsets(&mut rng) {
            assert!(offset + TRACE_SPAN <= buffer.len());
            assert_eq!(buffer.window(offset, TRACE_LEN).map(<[f32]>::len), Some(TRACE_LEN));
        }
    }
}

#[test]
fn test_sweep_windows_never_read_out_of_bounds() {
    let buffer = default_buffer(5);
    let selector = WindowSelector::new(buffer.len(), 500, WindowStrategy::Sweep).unwrap();
    let mut rng = StdRng::seed_from_u64(6);

    for _ in 0..200 {
        let offsets = selector.frame_offsets(&mut rng);
        assert_eq!(offsets.len(), 500);
        let last = *offsets.last().unwrap();
        assert!(last + TRACE_SPAN <= buffer.len());
    }
}

#[test]
fn test_random_offsets_reach_both_ends() {
    // Tiny range so both extremes are hit quickly
    let len = TRACE_SPAN + 3;
    let selector = WindowSelector::new(len, 200, WindowStrategy::Random).unwrap();
    let offsets = selector.frame_offsets(&mut StdRng::seed_from_u64(8));

    assert!(offsets.contains(&0));
    assert!(offsets.contains(&3));
    assert!(offsets.iter().all(|&o| o <= 3));
}
