use crate::{
    dsp::ramp::Ramp,
    nodes::node::{GraphNode, RenderCtx},
};

/// Plays a [`Ramp`] as a gain signal, starting at `note_on`.
///
/// Silent and inactive until triggered, and again once the ramp's length has
/// elapsed; that end point is what frees the voice.
pub struct RampNode {
    ramp: Ramp,
    elapsed_samples: u64,
    triggered: bool,
}

impl RampNode {
    pub fn new(ramp: Ramp) -> Self {
        Self {
            ramp,
            elapsed_samples: 0,
            triggered: false,
        }
    }

    fn elapsed(&self, sample_rate: f32) -> f32 {
        (self.elapsed_samples as f64 / sample_rate as f64) as f32
    }
}

impl GraphNode for RampNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        if !self.triggered {
            out.fill(0.0);
            return;
        }

        for sample in out.iter_mut() {
            *sample = self.ramp.value_at(self.elapsed(ctx.sample_rate));
            self.elapsed_samples += 1;
        }

        if self.elapsed(ctx.sample_rate) >= self.ramp.length() {
            self.triggered = false;
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.elapsed_samples = 0;
        self.triggered = true;
    }

    fn is_active(&self) -> bool {
        self.triggered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_until_triggered() {
        let ctx = RenderCtx::from_freq(1_000.0, 440.0, 1.0);
        let mut node = RampNode::new(Ramp::gate(1.0));

        let mut buffer = vec![1.0; 16];
        node.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|&s| s == 0.0));
        assert!(!node.is_active());

        node.note_on(&ctx);
        assert!(node.is_active());
        node.render_block(&mut buffer, &ctx);
        assert!(buffer.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn goes_inactive_after_length() {
        let ctx = RenderCtx::from_freq(1_000.0, 440.0, 1.0);
        let mut node = RampNode::new(Ramp::starting_at(0.0).line_to(0.05, 1.0).until(0.1));
        node.note_on(&ctx);

        let mut buffer = vec![0.0; 64];
        node.render_block(&mut buffer, &ctx);
        assert!(node.is_active());
        assert!((buffer[25] - 0.5).abs() < 1e-3);

        node.render_block(&mut buffer, &ctx);
        assert!(!node.is_active());
        assert!(buffer[36..].iter().all(|&s| s == 0.0));
    }
}
