use crate::{
    nodes::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// `signal × gain`, sample by sample.
///
/// The gain side decides the lifetime: once it goes inactive the product is
/// silent, whatever the signal is doing.
pub struct Amplify<N, M> {
    pub signal: N,
    pub gain: M,
    temp_buffer: Vec<f32>,
}

impl<N, M> Amplify<N, M> {
    pub fn new(signal: N, gain: M) -> Self {
        Self {
            signal,
            gain,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
        }
    }
}

impl<N: GraphNode, M: GraphNode> GraphNode for Amplify<N, M> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.signal.render_block(out, ctx);

        // Slice temp buffer to match output size (RT-safe, no allocation)
        let frames = &mut self.temp_buffer[..out.len()];
        frames.fill(0.0);
        self.gain.render_block(frames, ctx);

        for (o, g) in out.iter_mut().zip(frames.iter()) {
            *o *= *g;
        }
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.signal.note_on(ctx);
        self.gain.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.gain.is_active()
    }
}
