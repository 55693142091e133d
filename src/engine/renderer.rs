use std::sync::atomic::Ordering;
use std::sync::Arc;

use rtrb::Consumer;

use crate::{
    graph::ContextState,
    nodes::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

use super::{Shared, Trigger};

/// Voices expected to overlap at once; beyond this the mix still works but
/// the audio thread has to grow its vectors.
const VOICE_CAPACITY: usize = 64;

/// Audio-side end of the engine. Move it into the output callback.
pub struct Renderer {
    rx: Consumer<Trigger>,
    shared: Arc<Shared>,
    sample_rate: f32,
    /// Received but not yet started, in arrival order
    pending: Vec<Trigger>,
    voices: Vec<Box<dyn GraphNode>>,
    temp_buffer: Vec<f32>,
    master_gain: f32,
}

impl Renderer {
    pub(super) fn new(rx: Consumer<Trigger>, shared: Arc<Shared>, sample_rate: f32) -> Self {
        Self {
            rx,
            shared,
            sample_rate,
            pending: Vec::with_capacity(VOICE_CAPACITY),
            voices: Vec::with_capacity(VOICE_CAPACITY),
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            master_gain: 0.5,
        }
    }

    pub fn with_gain(mut self, gain: f32) -> Self {
        self.master_gain = gain;
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Voices currently sounding.
    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    fn ctx(&self) -> RenderCtx {
        RenderCtx::from_freq(self.sample_rate, 440.0, 1.0)
    }

    /// Render one mono block and advance the audio clock by its length.
    ///
    /// While the engine is suspended or closed the block is silent and the
    /// clock stands still. Each trigger starts on its exact frame: the block
    /// is split at trigger boundaries so a voice begins mid-block rather than
    /// at the block's first sample.
    pub fn process(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        if self.shared.state() != ContextState::Running {
            return;
        }

        while let Ok(trigger) = self.rx.pop() {
            self.pending.push(trigger);
        }

        let block_start = self.shared.frames();
        let mut offset = 0;
        while offset < out.len() {
            let now = block_start + offset as u64;
            self.start_due(now);

            let mut end = (offset + MAX_BLOCK_SIZE).min(out.len());
            let next_trigger = self.pending.iter().map(|t| t.frame).filter(|&f| f > now).min();
            if let Some(frame) = next_trigger {
                end = end.min((frame - block_start) as usize);
            }

            self.mix_voices(&mut out[offset..end]);
            offset = end;
        }

        self.voices.retain(|voice| voice.is_active());

        for sample in out.iter_mut() {
            *sample = (*sample * self.master_gain).clamp(-1.0, 1.0);
        }

        self.shared.add_frames(out.len() as u64);
    }

    fn start_due(&mut self, now: u64) {
        let ctx = self.ctx();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].frame <= now {
                let mut trigger = self.pending.swap_remove(i);
                if trigger.frame < now {
                    self.shared.late_triggers.fetch_add(1, Ordering::Relaxed);
                }
                trigger.voice.note_on(&ctx);
                self.voices.push(trigger.voice);
            } else {
                i += 1;
            }
        }
    }

    fn mix_voices(&mut self, out: &mut [f32]) {
        let ctx = self.ctx();
        for voice in self.voices.iter_mut() {
            let frames = &mut self.temp_buffer[..out.len()];
            frames.fill(0.0);
            voice.render_block(frames, &ctx);

            for (o, v) in out.iter_mut().zip(frames.iter()) {
                *o += *v;
            }
        }
    }
}
