use crate::nodes::node::{GraphNode, RenderCtx};

/// Serial chain: render the source, then process it in place with the effect.
///
/// ```text
///   [Source] ──→ [Effect] ──→ output
/// ```
pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn note_on(&mut self, ctx: &RenderCtx) {
        self.source.note_on(ctx);
        self.effect.note_on(ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}
