use crate::{
    dsp::oscillator::OscillatorBlock,
    nodes::node::{GraphNode, RenderCtx},
};

/// Low frequency oscillator for gain modulation.
///
/// Output is unipolar (0.0 to 1.0) so it can be used directly as a gain
/// signal with `.amplify()`: a square LFO chops the signal on and off, a sine
/// LFO gives tremolo. Frequency is fixed and ignores the note context.
pub struct LfoNode {
    osc: OscillatorBlock,
    frequency: f32,
}

impl LfoNode {
    pub fn sine(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::sine(),
            frequency,
        }
    }

    pub fn square(frequency: f32) -> Self {
        Self {
            osc: OscillatorBlock::square(),
            frequency,
        }
    }
}

impl GraphNode for LfoNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        let lfo_ctx = RenderCtx {
            frequency: self.frequency,
            ..*ctx
        };
        self.osc.render(out, &lfo_ctx);

        for sample in out.iter_mut() {
            *sample = 0.5 * (*sample + 1.0);
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.osc.reset();
    }
}
