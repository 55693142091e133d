use crate::{
    dsp::{oscillator::OscillatorBlock, wavetable::PeriodicWave},
    nodes::node::{GraphNode, RenderCtx},
};

/*
Audio Oscillator
================

The raw sound source of a voice. Drum voices play at a fixed pitch, so most
oscillators here are built with `with_frequency`; without it the node follows
`ctx.frequency`.

  let tone  = OscNode::sine().with_frequency(880.0);
  let organ = OscNode::custom(PeriodicWave::organ()).with_frequency(380.0);
  let hiss  = OscNode::noise();

Every note_on restarts the cycle, so repeated hits sound identical.
*/

pub struct OscNode {
    osc: OscillatorBlock,
    /// Fixed frequency (Hz). If Some, ignores ctx.frequency.
    frequency: Option<f32>,
}

impl OscNode {
    fn new(osc: OscillatorBlock) -> Self {
        Self {
            osc,
            frequency: None,
        }
    }

    pub fn sine() -> Self {
        Self::new(OscillatorBlock::sine())
    }

    pub fn square() -> Self {
        Self::new(OscillatorBlock::square())
    }

    pub fn sawtooth() -> Self {
        Self::new(OscillatorBlock::sawtooth())
    }

    pub fn triangle() -> Self {
        Self::new(OscillatorBlock::triangle())
    }

    pub fn noise() -> Self {
        Self::new(OscillatorBlock::noise())
    }

    pub fn custom(wave: PeriodicWave) -> Self {
        Self::new(OscillatorBlock::custom(wave))
    }

    /// Play at a fixed pitch regardless of the render context.
    pub fn with_frequency(mut self, frequency: f32) -> Self {
        self.frequency = Some(frequency);
        self
    }
}

impl GraphNode for OscNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        match self.frequency {
            Some(frequency) => {
                let fixed = RenderCtx { frequency, ..*ctx };
                self.osc.render(out, &fixed);
            }
            None => self.osc.render(out, ctx),
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    #[test]
    fn fixed_frequency_ignores_context() {
        let sample_rate = 48_000.0;
        let ctx = RenderCtx::from_freq(sample_rate, 110.0, 1.0);
        let mut osc = OscNode::sine().with_frequency(880.0);

        let mut buffer = vec![0.0f32; 64];
        osc.note_on(&ctx);
        osc.render_block(&mut buffer, &ctx);

        let n = 7;
        let expected = (TAU * 880.0 * n as f32 / sample_rate).sin();
        assert!((buffer[n] - expected).abs() < 1e-4, "got {}", buffer[n]);
    }
}
