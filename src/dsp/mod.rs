//! Low-level DSP primitives used by the render nodes.
//!
//! These components are allocation-free once constructed and realtime-safe,
//! so voices can embed them directly. They only do the signal math; note
//! handling and composition live in [`crate::nodes`].

/// State-variable filter with low/high/band-pass responses.
pub mod filter;
/// Phase-accumulating oscillator and white noise.
pub mod oscillator;
/// Linear breakpoint automation (setValueAtTime / linearRampToValueAtTime).
pub mod ramp;
/// Custom waveforms built from Fourier coefficients.
pub mod wavetable;

pub use oscillator::Waveform;
pub use wavetable::PeriodicWave;
