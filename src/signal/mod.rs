//! Synthetic signal and window selection.
//!
//! This module provides:
//! - The amplitude-modulated test signal with uniform noise
//! - An immutable sample buffer handing out borrowed windows
//! - In-bounds window selection (random or sweeping)

pub mod synth;
pub mod window;

pub use synth::{generate_phosphor_signal, SampleBuffer};
pub use window::{SignalError, WindowSelector, WindowStrategy};
