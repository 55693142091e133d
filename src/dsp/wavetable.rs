use std::f32::consts::TAU;
use std::sync::Arc;

use crate::error::SchedulerError;

const TABLE_SIZE: usize = 2048;

/// One cycle of a custom waveform, built by additive synthesis.
///
/// `real[k]` and `imag[k]` are the cosine and sine amplitudes of harmonic
/// `k`. Term 0 (DC) is ignored. The resulting cycle is normalised so its peak
/// is 1. Clones share the table.
#[derive(Debug, Clone)]
pub struct PeriodicWave {
    table: Arc<[f32]>,
}

impl PeriodicWave {
    pub fn new(real: &[f32], imag: &[f32]) -> Result<Self, SchedulerError> {
        if real.len() != imag.len() || real.len() < 2 {
            return Err(SchedulerError::InvalidConfig(
                "periodic wave needs matching real/imag terms, at least two each",
            ));
        }

        let mut table = vec![0.0f32; TABLE_SIZE];
        for (i, sample) in table.iter_mut().enumerate() {
            let phase = i as f32 / TABLE_SIZE as f32;
            *sample = real
                .iter()
                .zip(imag)
                .enumerate()
                .skip(1)
                .map(|(k, (re, im))| {
                    let w = TAU * k as f32 * phase;
                    re * w.cos() + im * w.sin()
                })
                .sum();
        }

        let peak = table.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        if peak > 0.0 {
            for sample in table.iter_mut() {
                *sample /= peak;
            }
        }

        Ok(Self {
            table: table.into(),
        })
    }

    /// Bright organ-like cycle used by the sweep voice.
    pub fn organ() -> Self {
        let real = [0.0, 0.4, 0.4, 1.0, 1.0, 1.0, 0.3, 0.7, 0.6, 0.5, 0.9, 0.8];
        let imag = [0.0; 12];
        match Self::new(&real, &imag) {
            Ok(wave) => wave,
            Err(_) => unreachable!("organ coefficients are well-formed"),
        }
    }

    /// Linearly interpolated value at `phase` in [0, 1).
    #[inline]
    pub fn sample(&self, phase: f32) -> f32 {
        let position = phase * TABLE_SIZE as f32;
        let index = position as usize % TABLE_SIZE;
        let next = (index + 1) % TABLE_SIZE;
        let frac = position - position.floor();
        self.table[index] + (self.table[next] - self.table[index]) * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sine_harmonic_is_a_sine() {
        let wave = PeriodicWave::new(&[0.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(wave.sample(0.0).abs() < 1e-4);
        assert!((wave.sample(0.25) - 1.0).abs() < 1e-3);
        assert!((wave.sample(0.75) + 1.0).abs() < 1e-3);
    }

    #[test]
    fn normalised_to_unit_peak() {
        let wave = PeriodicWave::organ();
        let peak = (0..TABLE_SIZE)
            .map(|i| wave.sample(i as f32 / TABLE_SIZE as f32).abs())
            .fold(0.0f32, f32::max);
        assert!((peak - 1.0).abs() < 1e-3);
    }

    #[test]
    fn mismatched_terms_are_rejected() {
        assert!(PeriodicWave::new(&[0.0, 1.0], &[0.0]).is_err());
        assert!(PeriodicWave::new(&[0.0], &[0.0]).is_err());
    }
}
