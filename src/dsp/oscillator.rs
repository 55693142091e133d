use std::f32::consts::TAU;

use crate::nodes::RenderCtx;

use super::wavetable::PeriodicWave;

/*
Phase Accumulator
=================

Every periodic waveform here is a function of a single phase value in [0, 1).
Each sample the phase advances by `frequency / sample_rate` and wraps, and the
waveform maps phase to amplitude:

  sine       sin(2π·phase)
  square     +1 for the first half cycle, -1 for the second
  sawtooth   ramps -1 → +1 over the cycle
  triangle   -1 → +1 → -1 over the cycle
  custom     table lookup into a PeriodicWave

Noise ignores phase and draws from a xorshift generator instead.
*/

#[derive(Debug, Clone)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
    Triangle,
    Noise,
    Custom(PeriodicWave),
}

/// Xorshift32 white noise in [-1, 1).
#[derive(Debug, Clone)]
pub struct Noise {
    state: u32,
}

impl Noise {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

impl Default for Noise {
    fn default() -> Self {
        Self::new(0x1234_5678)
    }
}

#[derive(Debug, Clone)]
pub struct OscillatorBlock {
    waveform: Waveform,
    phase: f32,
    noise: Noise,
}

impl OscillatorBlock {
    pub fn new(waveform: Waveform) -> Self {
        Self {
            waveform,
            phase: 0.0,
            noise: Noise::default(),
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn square() -> Self {
        Self::new(Waveform::Square)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    pub fn triangle() -> Self {
        Self::new(Waveform::Triangle)
    }

    pub fn noise() -> Self {
        Self::new(Waveform::Noise)
    }

    pub fn custom(wave: PeriodicWave) -> Self {
        Self::new(Waveform::Custom(wave))
    }

    pub fn waveform(&self) -> &Waveform {
        &self.waveform
    }

    /// Restart the cycle so every note begins at the same phase.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    #[inline]
    fn next_sample(&mut self, increment: f32) -> f32 {
        let phase = self.phase;
        let value = match &self.waveform {
            Waveform::Sine => (TAU * phase).sin(),
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
            Waveform::Noise => self.noise.next_sample(),
            Waveform::Custom(wave) => wave.sample(phase),
        };

        self.phase += increment;
        self.phase -= self.phase.floor();
        value
    }

    /// Fill `out` at `ctx.frequency`.
    pub fn render(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let increment = ctx.frequency / ctx.sample_rate;
        for sample in out.iter_mut() {
            *sample = self.next_sample(increment);
        }
    }
}
