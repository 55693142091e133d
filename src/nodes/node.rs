/// Context passed to nodes during rendering
///
/// - sample_rate: Audio sample rate (e.g., 48000.0)
/// - frequency: Pitch to render (Hz); fixed-pitch nodes ignore it
/// - velocity: Intensity, 0.0-1.0
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frequency: f32,
    pub velocity: f32,
}

impl RenderCtx {
    pub fn from_freq(sample_rate: f32, frequency: f32, velocity: f32) -> Self {
        Self {
            sample_rate,
            frequency,
            velocity,
        }
    }
}

/// Core trait for render nodes
///
/// A voice is a tree of nodes that is triggered once with `note_on` and
/// rendered block by block until it reports itself inactive.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Triggered when the sound starts. Default does nothing.
    fn note_on(&mut self, _ctx: &RenderCtx) {}

    /// Whether this node still produces sound.
    ///
    /// Free-running sources (oscillators, LFOs) are always active; envelopes
    /// and buffers decide when a voice is finished.
    fn is_active(&self) -> bool {
        true
    }
}

impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        (**self).note_on(ctx)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
