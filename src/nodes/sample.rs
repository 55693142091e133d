use std::sync::Arc;

use crate::nodes::node::{GraphNode, RenderCtx};

/// One-shot playback of a mono buffer at a given rate.
///
/// The buffer is assumed to be at the engine's sample rate. Rates other than
/// 1.0 read it with linear interpolation, shifting pitch and length together.
pub struct SampleNode {
    buffer: Arc<[f32]>,
    playback_rate: f64,
    position: f64,
    playing: bool,
}

impl SampleNode {
    pub fn new(buffer: Arc<[f32]>, playback_rate: f32) -> Self {
        Self {
            buffer,
            playback_rate: playback_rate.max(0.0) as f64,
            position: 0.0,
            playing: false,
        }
    }

    #[inline]
    fn read(&self, position: f64) -> f32 {
        let index = position as usize;
        let frac = (position - index as f64) as f32;
        let current = self.buffer[index];
        let next = self.buffer.get(index + 1).copied().unwrap_or(0.0);
        current + (next - current) * frac
    }
}

impl GraphNode for SampleNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let len = self.buffer.len() as f64;

        for sample in out.iter_mut() {
            if self.playing && self.position < len {
                *sample = self.read(self.position);
                self.position += self.playback_rate;
            } else {
                *sample = 0.0;
            }
        }

        if self.position >= len || self.playback_rate == 0.0 {
            self.playing = false;
        }
    }

    fn note_on(&mut self, _ctx: &RenderCtx) {
        self.position = 0.0;
        self.playing = !self.buffer.is_empty();
    }

    fn is_active(&self) -> bool {
        self.playing
    }
}
